//! Card handlers

use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cardswap_core::{CardRequest, MessageResponse, UserCards};

pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<CardRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.cards.add_card(&req.name, &req.user_name).await?;

    Ok(Json(MessageResponse::new(format!(
        "Card '{}' added for user '{}'",
        req.name, req.user_name
    ))))
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> ApiResult<Json<UserCards>> {
    Ok(Json(state.cards.list_cards(&user_name).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Json(req): Json<CardRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.cards.delete_card(&req.name, &req.user_name).await?;

    Ok(Json(MessageResponse::new(format!(
        "Card '{}' removed for user '{}'",
        req.name, req.user_name
    ))))
}
