use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument};

use crate::crud::{self, Validate};
use crate::error::AppResult;
use crate::orm::{rfc3339, Document, Filter, Sort};
use crate::response::{success, success_empty};
use crate::state::AppState;

use super::dto::{
    expand_week, DailyAssignment, UpdateAssignmentRequest, WeeklyAssignmentRequest, COLLECTION,
};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(list_assignments).post(create_assignment))
        .route("/assignments/weekly", get(get_weekly_assignments).post(create_weekly_assignments))
        .route(
            "/assignments/:id",
            get(get_assignment).put(update_assignment).delete(delete_assignment),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsQuery {
    pub customer_id: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub end_date: Option<OffsetDateTime>,
}

/// Inclusive date-range filter shared by the listing endpoints.
pub(crate) fn date_range_filter(
    customer_id: Option<&str>,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> Filter {
    let mut filter = Filter::new();
    if let Some(customer_id) = customer_id {
        filter = filter.eq("customerId", customer_id);
    }
    if let Some(start) = start {
        filter = filter.gte("date", rfc3339(start));
    }
    if let Some(end) = end {
        filter = filter.lte("date", rfc3339(end));
    }
    filter
}

#[instrument(skip(state, payload))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<DailyAssignment>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, COLLECTION, &payload).await?;
    info!(assignment_id = %created.id, customer_id = %payload.customer_id, "assignment created");
    Ok(success("assignment", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let assignment = crud::get_document(&state.db, COLLECTION, &id, "Assignment").await?;
    Ok(success("assignment", assignment.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAssignmentRequest>,
) -> AppResult<Json<Value>> {
    let updated = crud::update_document(&state.db, COLLECTION, &id, &payload, "Assignment").await?;
    info!(assignment_id = %updated.id, "assignment updated");
    Ok(success("assignment", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, COLLECTION, &id, "Assignment").await?;
    info!(%id, "assignment deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
) -> AppResult<Json<Value>> {
    let filter = date_range_filter(query.customer_id.as_deref(), query.start_date, query.end_date);
    let sort = Sort::new().asc("date");
    let assignments = crud::list_documents(&state.db, COLLECTION, &filter, &sort).await?;
    Ok(success("assignments", assignments))
}

#[instrument(skip(state, payload))]
pub async fn create_weekly_assignments(
    State(state): State<AppState>,
    Json(payload): Json<WeeklyAssignmentRequest>,
) -> AppResult<Json<Value>> {
    payload.validate()?;
    let week = expand_week(&payload);
    let created = repo::insert_many(&state.db, &week).await?;
    info!(
        customer_id = %payload.customer_id,
        count = created.len(),
        "weekly assignments created"
    );
    let assignments: Vec<Value> = created.into_iter().map(Document::into_json).collect();
    Ok(success("assignments", assignments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyQuery {
    pub customer_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub week_start: OffsetDateTime,
}

#[instrument(skip(state))]
pub async fn get_weekly_assignments(
    State(state): State<AppState>,
    Query(query): Query<WeeklyQuery>,
) -> AppResult<Json<Value>> {
    let week_end = query.week_start + Duration::days(6);
    let filter = date_range_filter(
        Some(query.customer_id.as_str()),
        Some(query.week_start),
        Some(week_end),
    );
    let sort = Sort::new().asc("date");
    let assignments = crud::list_documents(&state.db, COLLECTION, &filter, &sort).await?;
    Ok(success("assignments", assignments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn range_filter_is_inclusive_on_both_ends() {
        let filter = date_range_filter(
            Some("cust-1"),
            Some(datetime!(2026-08-02 00:00:00 UTC)),
            Some(datetime!(2026-08-08 00:00:00 UTC)),
        );
        let clauses = filter.clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].0, "customerId");
        assert_eq!(clauses[1].0, "date");
        assert_eq!(clauses[2].0, "date");
    }

    #[test]
    fn absent_bounds_leave_no_clauses() {
        let filter = date_range_filter(None, None, None);
        assert!(filter.is_empty());
    }
}
