use crate::models::{AppData, Dataset, DatasetKind};
use crate::parser::parse_csv;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_seed_path(kind: DatasetKind) -> PathBuf {
    let (var, default) = match kind {
        DatasetKind::Habit => ("HABITS_CSV_PATH", "data/habits.csv"),
        DatasetKind::Health => ("HEALTH_CSV_PATH", "data/health.csv"),
    };

    env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

pub async fn load_seed(path: &Path, kind: DatasetKind) -> Dataset {
    match fs::read_to_string(path).await {
        Ok(text) => {
            let groups = parse_csv(&text, kind);
            info!("seeded {kind:?} dataset from {}: {} keys", path.display(), groups.len());
            Dataset { groups }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Dataset::default(),
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            Dataset::default()
        }
    }
}

pub async fn load_app_data() -> AppData {
    AppData {
        habits: load_seed(&resolve_seed_path(DatasetKind::Habit), DatasetKind::Habit).await,
        health: load_seed(&resolve_seed_path(DatasetKind::Health), DatasetKind::Health).await,
    }
}
