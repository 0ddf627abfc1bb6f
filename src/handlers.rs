use crate::errors::AppError;
use crate::models::{
    AppData, DatasetKind, Entry, KeyGroups, KindQuery, LoadRequest, LoadResponse, RateQuery,
    RateResponse, StatsQuery, StatsResponse, StreakQuery, StreakResponse, SummaryQuery,
    SummaryResponse,
};
use crate::parser::parse_csv;
use crate::state::AppState;
use crate::stats::{build_stats, completion_rate, current_streak, numeric_summary, parse_day, today};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{Duration, NaiveDate};
use tracing::info;

const DEFAULT_RANGE_DAYS: i64 = 7;

pub async fn index() -> Html<String> {
    Html(render_index(&today().to_string()))
}

pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<KindQuery>,
) -> Result<Json<KeyGroups>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.dataset(query.kind).groups.clone()))
}

pub async fn get_rate(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<RateResponse>, AppError> {
    let start = parse_start(&query.start)?;
    let data = state.data.lock().await;
    let entries = group_entries(&data, query.kind, &query.key)?;

    Ok(Json(RateResponse {
        rate: completion_rate(entries, start, today()),
        key: query.key,
    }))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Query(query): Query<StreakQuery>,
) -> Result<Json<StreakResponse>, AppError> {
    let data = state.data.lock().await;
    let entries = group_entries(&data, query.kind, &query.key)?;

    Ok(Json(StreakResponse {
        streak: current_streak(entries, today()),
        key: query.key,
    }))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let start = parse_start(&query.start)?;
    let data = state.data.lock().await;
    let entries = group_entries(&data, DatasetKind::Health, &query.key)?;
    let summary = numeric_summary(entries, start, today());

    Ok(Json(SummaryResponse {
        key: query.key,
        min: summary.min,
        max: summary.max,
        avg: summary.avg,
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let now = today();
    let start = match query.start.as_deref() {
        Some(raw) => parse_start(raw)?,
        None => now - Duration::days(DEFAULT_RANGE_DAYS),
    };

    let data = state.data.lock().await;
    Ok(Json(build_stats(&data, start, now)))
}

pub async fn load(
    State(state): State<AppState>,
    Json(payload): Json<LoadRequest>,
) -> Result<Json<LoadResponse>, AppError> {
    let groups = parse_csv(&payload.text, payload.kind);
    let keys = groups.len();
    let entries = groups.values().map(Vec::len).sum();

    let mut data = state.data.lock().await;
    data.dataset_mut(payload.kind).groups = groups;
    info!("replaced {:?} dataset: {keys} keys, {entries} entries", payload.kind);

    Ok(Json(LoadResponse {
        kind: payload.kind,
        keys,
        entries,
    }))
}

fn parse_start(raw: &str) -> Result<NaiveDate, AppError> {
    parse_day(raw).ok_or_else(|| AppError::bad_request(format!("invalid start date: {raw}")))
}

fn group_entries<'a>(
    data: &'a AppData,
    kind: DatasetKind,
    key: &str,
) -> Result<&'a [Entry], AppError> {
    data.dataset(kind)
        .groups
        .get(key)
        .map(Vec::as_slice)
        .ok_or_else(|| AppError::not_found(format!("unknown key: {key}")))
}
