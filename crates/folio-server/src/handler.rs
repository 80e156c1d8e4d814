use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use folio_protocol::{
    AddBlockRequest, BlockResponse, CreatePostRequest, CreatePostResponse, HealthResponse,
    MoveBlockRequest, SuccessResponse, UpdateBlockRequest,
};
use folio_types::{BlockId, Post, PostId};

use crate::error::ServerResult;
use crate::service::EditService;

pub type AppState = Arc<EditService>;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn list_posts(State(service): State<AppState>) -> Json<Vec<Post>> {
    Json(service.list_posts().await)
}

pub async fn get_post(
    State(service): State<AppState>,
    Path(post_id): Path<String>,
) -> ServerResult<Json<Post>> {
    Ok(Json(service.get_post(&PostId::from(post_id)).await?))
}

pub async fn get_post_by_slug(
    State(service): State<AppState>,
    Path(slug): Path<String>,
) -> ServerResult<Json<Post>> {
    Ok(Json(service.get_post_by_slug(&slug).await?))
}

pub async fn create_post(
    State(service): State<AppState>,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<CreatePostResponse>)> {
    let Json(req) = body?;
    let post = service.create_post(req).await?;
    Ok((StatusCode::CREATED, Json(CreatePostResponse { post })))
}

pub async fn update_block(
    State(service): State<AppState>,
    Path((post_id, block_id)): Path<(String, String)>,
    body: Result<Json<UpdateBlockRequest>, JsonRejection>,
) -> ServerResult<Json<BlockResponse>> {
    let Json(req) = body?;
    let block = service
        .update_block(&PostId::from(post_id), &BlockId::from(block_id), &req.content)
        .await?;
    Ok(Json(BlockResponse::ok(block)))
}

pub async fn delete_block(
    State(service): State<AppState>,
    Path((post_id, block_id)): Path<(String, String)>,
) -> ServerResult<Json<SuccessResponse>> {
    service
        .delete_block(&PostId::from(post_id), &BlockId::from(block_id))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn add_block(
    State(service): State<AppState>,
    Path(post_id): Path<String>,
    body: Result<Json<AddBlockRequest>, JsonRejection>,
) -> ServerResult<Json<BlockResponse>> {
    let Json(req) = body?;
    let block = service.add_block(&PostId::from(post_id), req).await?;
    Ok(Json(BlockResponse::ok(block)))
}

pub async fn move_block(
    State(service): State<AppState>,
    Path((post_id, block_id)): Path<(String, String)>,
    body: Result<Json<MoveBlockRequest>, JsonRejection>,
) -> ServerResult<Json<BlockResponse>> {
    let Json(req) = body?;
    let block = service
        .move_block(&PostId::from(post_id), &BlockId::from(block_id), req.direction)
        .await?;
    Ok(Json(BlockResponse::ok(block)))
}
