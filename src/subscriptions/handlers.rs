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

use super::dto::{Subscription, SubscriptionStatus, UpdateSubscriptionRequest, COLLECTION};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", get(list_subscriptions).post(create_subscription))
        .route(
            "/subscriptions/:id",
            get(get_subscription).put(update_subscription).delete(delete_subscription),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionsQuery {
    pub customer_id: Option<String>,
    pub status: Option<SubscriptionStatus>,
}

#[instrument(skip(state, payload))]
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(payload): Json<Subscription>,
) -> AppResult<Json<Value>> {
    let created = crud::create_document(&state.db, COLLECTION, &payload).await?;
    info!(
        subscription_id = %created.id,
        customer_id = %payload.customer_id,
        "subscription created"
    );
    Ok(success("subscription", created.into_json()))
}

#[instrument(skip(state))]
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let subscription = crud::get_document(&state.db, COLLECTION, &id, "Subscription").await?;
    Ok(success("subscription", subscription.into_json()))
}

#[instrument(skip(state, payload))]
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> AppResult<Json<Value>> {
    let updated =
        crud::update_document(&state.db, COLLECTION, &id, &payload, "Subscription").await?;
    info!(subscription_id = %updated.id, "subscription updated");
    Ok(success("subscription", updated.into_json()))
}

#[instrument(skip(state))]
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, COLLECTION, &id, "Subscription").await?;
    info!(%id, "subscription deleted");
    Ok(success_empty())
}

#[instrument(skip(state))]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> AppResult<Json<Value>> {
    let mut filter = Filter::new();
    if let Some(customer_id) = &query.customer_id {
        filter = filter.eq("customerId", customer_id.as_str());
    }
    if let Some(status) = query.status {
        filter = filter.eq("status", status.as_str());
    }
    let sort = Sort::new().desc("createdAt");
    let subscriptions = crud::list_documents(&state.db, COLLECTION, &filter, &sort).await?;
    Ok(success("subscriptions", subscriptions))
}
