//! Rutas de membresías usuario-proyecto
//!
//! Todo el recurso es de admin o manager, lecturas incluidas.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::middleware::auth::{self, AuthenticatedUser};
use crate::models::user_project::{
    AddMembersRequest, ProjectMembersResponse, UserProject, UserProjectsResponse,
};
use crate::services::user_project_service::UserProjectService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_project_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(add_user_to_project))
        .route("/project/:id", get(get_users_by_project))
        .route("/user/:id", get(get_projects_by_user))
        .route("/:id", delete(remove_user_from_project))
        .route_layer(middleware::from_fn(auth::verify_is_admin_or_manager))
        .route_layer(middleware::from_fn_with_state(state, auth::validate_token))
}

async fn add_user_to_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<AddMembersRequest>,
) -> Result<Json<ApiResponse<Vec<UserProject>>>, AppError> {
    let response = UserProjectService::new(state.pool.clone())
        .add_members(&actor, request)
        .await?;
    Ok(Json(response))
}

async fn get_users_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectMembersResponse>>, AppError> {
    let response = UserProjectService::new(state.pool.clone())
        .list_users_by_project(project_id)
        .await?;
    Ok(Json(response))
}

async fn get_projects_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserProjectsResponse>>, AppError> {
    let response = UserProjectService::new(state.pool.clone())
        .list_projects_by_user(user_id)
        .await?;
    Ok(Json(response))
}

async fn remove_user_from_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(membership_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = UserProjectService::new(state.pool.clone())
        .remove_member(&actor, membership_id)
        .await?;
    Ok(Json(response))
}
