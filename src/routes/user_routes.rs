//! Rutas de usuarios
//!
//! /login es pública; el resto exige token y el alta/desactivación
//! además exige rol admin.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::middleware::auth::{self, AuthenticatedUser};
use crate::models::user::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdatePasswordRequest, UpdateUserRequest,
    UserListResponse, UserResponse,
};
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_user))
        .route("/deactivate_account/:id", put(deactivate_account))
        .route_layer(middleware::from_fn(auth::verify_is_admin));

    let authenticated = Router::new()
        .route("/all", get(get_all_users))
        .route("/", get(get_user_by_email))
        .route("/:id", put(update_user_info))
        .route("/update_password/:id", put(update_user_password))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state, auth::validate_token));

    Router::new().route("/login", post(login)).merge(authenticated)
}

fn service(state: &AppState) -> UserService {
    UserService::new(state.pool.clone(), JwtConfig::from(&state.config))
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = service(&state).login(request).await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let response = service(&state).create(request).await?;
    Ok(Json(response))
}

async fn get_all_users(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserListResponse>>, AppError> {
    let response = service(&state).list(&actor).await?;
    Ok(Json(response))
}

async fn get_user_by_email(
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<ApiResponse<UserListResponse>>, AppError> {
    let email = params.email.unwrap_or_default();
    let response = service(&state).find_by_email(&email).await?;
    Ok(Json(response))
}

async fn update_user_info(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let response = service(&state).update_profile(&actor, id, request).await?;
    Ok(Json(response))
}

async fn update_user_password(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = service(&state)
        .update_password(&actor, id, &request.password)
        .await?;
    Ok(Json(response))
}

async fn deactivate_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = service(&state).deactivate(id).await?;
    Ok(Json(response))
}
