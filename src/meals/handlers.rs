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

use super::dto::{Meal, MealType, UpdateMealRequest, COLLECTION};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/:id", get(get_meal).put(update_meal).delete(delete_meal))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMealsQuery {
    pub meal_type: Option<MealType>,
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    Json(payload): Json<Meal>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, COLLECTION, &payload).await?;
    info!(meal_id = %created.id, "meal created");
    Ok(success("meal", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let meal = crud::get_document(&state.db, COLLECTION, &id, "Meal").await?;
    Ok(success("meal", meal.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMealRequest>,
) -> AppResult<Json<Value>> {
    let updated = crud::update_document(&state.db, COLLECTION, &id, &payload, "Meal").await?;
    info!(meal_id = %updated.id, "meal updated");
    Ok(success("meal", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, COLLECTION, &id, "Meal").await?;
    info!(%id, "meal deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<ListMealsQuery>,
) -> AppResult<Json<Value>> {
    let mut filter = Filter::new();
    if let Some(meal_type) = query.meal_type {
        filter = filter.eq("mealType", meal_type.as_str());
    }
    let sort = Sort::new().asc("name");
    let meals = crud::list_documents(&state.db, COLLECTION, &filter, &sort).await?;
    Ok(success("meals", meals))
}
