use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Habit,
    Health,
}

/// One dated occurrence for a key. `date` and `value` keep the raw CSV text:
/// presence views compare date strings verbatim and the numeric summary
/// re-derives the value, so neither is normalized at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub type KeyGroups = BTreeMap<String, Vec<Entry>>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub groups: KeyGroups,
}

#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub habits: Dataset,
    pub health: Dataset,
}

impl AppData {
    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Habit => &self.habits,
            DatasetKind::Health => &self.health,
        }
    }

    pub fn dataset_mut(&mut self, kind: DatasetKind) -> &mut Dataset {
        match kind {
            DatasetKind::Habit => &mut self.habits,
            DatasetKind::Health => &mut self.health,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub kind: DatasetKind,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadResponse {
    pub kind: DatasetKind,
    pub keys: usize,
    pub entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct KindQuery {
    pub kind: DatasetKind,
}

#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub kind: DatasetKind,
    pub key: String,
    pub start: String,
}

#[derive(Debug, Deserialize)]
pub struct StreakQuery {
    pub kind: DatasetKind,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub key: String,
    pub start: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub start: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateResponse {
    pub key: String,
    pub rate: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub key: String,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub key: String,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitStat {
    pub key: String,
    pub rate: u32,
    pub streak: u32,
    pub done_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStat {
    pub key: String,
    pub rate: u32,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub start: String,
    pub today: String,
    pub habits: Vec<HabitStat>,
    pub health: Vec<HealthStat>,
}
