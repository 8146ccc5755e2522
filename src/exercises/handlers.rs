use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::crud;
use crate::error::AppResult;
use crate::orm::{Filter, Sort};
use crate::response::{success, success_empty};
use crate::state::AppState;

use super::dto::{Exercise, UpdateExerciseRequest, COLLECTION};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route("/exercises/:id", get(get_exercise).put(update_exercise).delete(delete_exercise))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExercisesQuery {
    pub muscle_group: Option<String>,
}

#[instrument(skip(state, payload))]
pub async fn create_exercise(
    State(state): State<AppState>,
    Json(payload): Json<Exercise>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, COLLECTION, &payload).await?;
    info!(exercise_id = %created.id, "exercise created");
    Ok(success("exercise", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let exercise = crud::get_document(&state.db, COLLECTION, &id, "Exercise").await?;
    Ok(success("exercise", exercise.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateExerciseRequest>,
) -> AppResult<Json<Value>> {
    let updated = crud::update_document(&state.db, COLLECTION, &id, &payload, "Exercise").await?;
    info!(exercise_id = %updated.id, "exercise updated");
    Ok(success("exercise", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, COLLECTION, &id, "Exercise").await?;
    info!(%id, "exercise deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ListExercisesQuery>,
) -> AppResult<Json<Value>> {
    let mut filter = Filter::new();
    if let Some(group) = &query.muscle_group {
        filter = filter.contains("muscleGroups", group);
    }
    let sort = Sort::new().asc("name");
    let exercises = crud::list_documents(&state.db, COLLECTION, &filter, &sort).await?;
    Ok(success("exercises", exercises))
}
