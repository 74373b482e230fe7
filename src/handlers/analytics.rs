use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::analytics::streaks::StreakKind;
use crate::database::filter::MatchFilter;
use crate::errors::{AppError, FieldIssue, Result};
use crate::models::analytics::{HeadToHeadResponse, LeadersResponse, LeagueTableResponse, StreaksResponse};
use crate::models::matches::parse_iso_datetime;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct TableQuery {
    #[validate(
        required(message = "competition is required"),
        length(min = 1, message = "competition must not be empty")
    )]
    pub competition: Option<String>,
    #[validate(
        required(message = "season is required"),
        length(min = 1, message = "season must not be empty")
    )]
    pub season: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScorersQuery {
    pub competition: Option<String>,
    pub season: Option<String>,
    pub limit: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreaksQuery {
    pub competition: Option<String>,
    pub season: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HeadToHeadQuery {
    #[validate(
        required(message = "team_a is required"),
        length(min = 1, message = "team_a must not be empty")
    )]
    pub team_a: Option<String>,
    #[validate(
        required(message = "team_b is required"),
        length(min = 1, message = "team_b must not be empty")
    )]
    pub team_b: Option<String>,
    pub limit: Option<String>,
}

pub async fn league_table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Json<LeagueTableResponse>> {
    let start_time = std::time::Instant::now();

    query
        .validate()
        .map_err(|e| AppError::validation_with("competition and season are required", &e))?;
    let (Some(competition), Some(season)) = (query.competition, query.season) else {
        return Err(AppError::validation("competition and season are required"));
    };
    let (date_from, date_to) = parse_window(query.date_from.as_deref(), query.date_to.as_deref())?;

    tracing::info!("📊 GET /api/v1/tables competition={} season={}", competition, season);

    let scope = MatchFilter::scoped(Some(competition.clone()), Some(season.clone())).within(date_from, date_to);
    let table = state.analytics.league_table(scope).await?;

    tracing::info!("✅ Built table of {} teams in {:?}", table.len(), start_time.elapsed());
    Ok(Json(LeagueTableResponse {
        competition_id: competition,
        season_id: season,
        table,
    }))
}

pub async fn top_scorers(
    State(state): State<AppState>,
    Query(query): Query<ScorersQuery>,
) -> Result<Json<LeadersResponse>> {
    let start_time = std::time::Instant::now();

    let limit = parse_limit(query.limit.as_deref(), state.default_limit)?;
    let (date_from, date_to) = parse_window(query.date_from.as_deref(), query.date_to.as_deref())?;
    let scope = MatchFilter::scoped(non_empty(query.competition), non_empty(query.season)).within(date_from, date_to);

    tracing::info!(
        "⚽ GET /api/v1/leaders/scorers competition={:?} season={:?} limit={}",
        scope.competition_id,
        scope.season_id,
        limit
    );

    let leaders = state.analytics.top_scorers(scope, limit).await?;

    tracing::info!("✅ Ranked {} scorers in {:?}", leaders.len(), start_time.elapsed());
    Ok(Json(LeadersResponse { leaders }))
}

pub async fn streaks(
    State(state): State<AppState>,
    Query(query): Query<StreaksQuery>,
) -> Result<Json<StreaksResponse>> {
    let start_time = std::time::Instant::now();

    let kind = query
        .kind
        .as_deref()
        .and_then(|raw| raw.parse::<StreakKind>().ok())
        .ok_or_else(|| AppError::validation("type must be win, loss, or clean_sheet"))?;
    let (date_from, date_to) = parse_window(query.date_from.as_deref(), query.date_to.as_deref())?;
    let scope = MatchFilter::scoped(non_empty(query.competition), non_empty(query.season)).within(date_from, date_to);

    tracing::info!(
        "🔥 GET /api/v1/streaks type={} competition={:?} season={:?}",
        kind,
        scope.competition_id,
        scope.season_id
    );

    let streaks = state.analytics.streaks(scope, kind).await?;

    tracing::info!("✅ Computed {} {} streaks in {:?}", streaks.len(), kind, start_time.elapsed());
    Ok(Json(StreaksResponse { kind, streaks }))
}

pub async fn head_to_head(
    State(state): State<AppState>,
    Query(query): Query<HeadToHeadQuery>,
) -> Result<Json<HeadToHeadResponse>> {
    let start_time = std::time::Instant::now();

    query
        .validate()
        .map_err(|e| AppError::validation_with("team_a and team_b are required", &e))?;
    let (Some(team_a), Some(team_b)) = (query.team_a, query.team_b) else {
        return Err(AppError::validation("team_a and team_b are required"));
    };
    let limit = parse_limit(query.limit.as_deref(), state.default_limit)?;

    tracing::info!("🤝 GET /api/v1/h2h team_a={} team_b={} limit={}", team_a, team_b, limit);

    let matches = state.analytics.head_to_head(&team_a, &team_b, limit).await?;

    tracing::info!("✅ Found {} meetings in {:?}", matches.len(), start_time.elapsed());
    Ok(Json(HeadToHeadResponse {
        team_a,
        team_b,
        matches,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid_field(field: &str, issue: &str) -> AppError {
    AppError::Validation {
        message: format!("{} {}", field, issue),
        details: vec![FieldIssue {
            field: field.to_string(),
            issue: issue.to_string(),
        }],
    }
}

fn parse_limit(raw: Option<&str>, default: i64) -> Result<i64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| invalid_field("limit", "must be an integer")),
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => parse_iso_datetime(value)
            .map(Some)
            .ok_or_else(|| invalid_field(field, "must be an ISO date or timestamp")),
    }
}

fn parse_window(
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    Ok((parse_bound("date_from", date_from)?, parse_bound("date_to", date_to)?))
}
