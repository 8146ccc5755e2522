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

use super::dto::{
    ExerciseTemplate, MealTemplate, UpdateExerciseTemplateRequest, UpdateMealTemplateRequest,
    EXERCISE_COLLECTION, MEAL_COLLECTION,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/templates/meal", get(list_meal_templates).post(create_meal_template))
        .route(
            "/templates/meal/:id",
            get(get_meal_template).put(update_meal_template).delete(delete_meal_template),
        )
        .route("/templates/exercise", get(list_exercise_templates).post(create_exercise_template))
        .route(
            "/templates/exercise/:id",
            get(get_exercise_template)
                .put(update_exercise_template)
                .delete(delete_exercise_template),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    pub trainer_id: Option<String>,
}

fn creator_filter(query: &ListTemplatesQuery) -> Filter {
    match &query.trainer_id {
        Some(trainer_id) => Filter::new().eq("createdBy", trainer_id.as_str()),
        None => Filter::new(),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_meal_template(
    State(state): State<AppState>,
    Json(payload): Json<MealTemplate>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, MEAL_COLLECTION, &payload).await?;
    info!(template_id = %created.id, "meal template created");
    Ok(success("template", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_meal_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let template = crud::get_document(&state.db, MEAL_COLLECTION, &id, "Template").await?;
    Ok(success("template", template.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_meal_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMealTemplateRequest>,
) -> AppResult<Json<Value>> {
    let updated =
        crud::update_document(&state.db, MEAL_COLLECTION, &id, &payload, "Template").await?;
    info!(template_id = %updated.id, "meal template updated");
    Ok(success("template", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_meal_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, MEAL_COLLECTION, &id, "Template").await?;
    info!(%id, "meal template deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_meal_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> AppResult<Json<Value>> {
    let filter = creator_filter(&query);
    let sort = Sort::new().desc("createdAt");
    let templates = crud::list_documents(&state.db, MEAL_COLLECTION, &filter, &sort).await?;
    Ok(success("templates", templates))
}

#[instrument(skip(state, payload))]
pub async fn create_exercise_template(
    State(state): State<AppState>,
    Json(payload): Json<ExerciseTemplate>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, EXERCISE_COLLECTION, &payload).await?;
    info!(template_id = %created.id, "exercise template created");
    Ok(success("template", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_exercise_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let template = crud::get_document(&state.db, EXERCISE_COLLECTION, &id, "Template").await?;
    Ok(success("template", template.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_exercise_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateExerciseTemplateRequest>,
) -> AppResult<Json<Value>> {
    let updated =
        crud::update_document(&state.db, EXERCISE_COLLECTION, &id, &payload, "Template").await?;
    info!(template_id = %updated.id, "exercise template updated");
    Ok(success("template", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_exercise_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, EXERCISE_COLLECTION, &id, "Template").await?;
    info!(%id, "exercise template deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_exercise_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> AppResult<Json<Value>> {
    let filter = creator_filter(&query);
    let sort = Sort::new().desc("createdAt");
    let templates = crud::list_documents(&state.db, EXERCISE_COLLECTION, &filter, &sort).await?;
    Ok(success("templates", templates))
}
