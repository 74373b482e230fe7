use axum::{routing::get, Router};

use crate::handlers::analytics;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // GET /api/v1/tables?competition=&season= - League table for one season
        .route("/tables", get(analytics::league_table))
        // GET /api/v1/leaders/scorers?competition=&season=&limit= - Top scorers
        .route("/leaders/scorers", get(analytics::top_scorers))
        // GET /api/v1/streaks?type=win|loss|clean_sheet - Longest run per team
        .route("/streaks", get(analytics::streaks))
        // GET /api/v1/h2h?team_a=&team_b=&limit= - Meetings between two teams
        .route("/h2h", get(analytics::head_to_head))
}
