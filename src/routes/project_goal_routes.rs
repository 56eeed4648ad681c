//! Rutas de metas de proyecto
//!
//! GET /:id lista las metas del proyecto :id. Las escrituras exigen
//! admin o manager.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::middleware::auth::{self, AuthenticatedUser};
use crate::models::project_goal::{
    CreateProjectGoalRequest, ProjectGoal, ProjectGoalListResponse, UpdateProjectGoalRequest,
};
use crate::services::project_goal_service::ProjectGoalService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_project_goal_router(state: AppState) -> Router<AppState> {
    let admin_or_manager = Router::new()
        .route("/", post(create_project_goal))
        .route("/:id", put(update_project_goal))
        .route("/:id", delete(delete_project_goal))
        .route_layer(middleware::from_fn(auth::verify_is_admin_or_manager));

    Router::new()
        .route("/:id", get(get_project_goals_by_project))
        .merge(admin_or_manager)
        .route_layer(middleware::from_fn_with_state(state, auth::validate_token))
}

async fn get_project_goals_by_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectGoalListResponse>>, AppError> {
    let response = ProjectGoalService::new(state.pool.clone())
        .list_by_project(&actor, project_id)
        .await?;
    Ok(Json(response))
}

async fn create_project_goal(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<CreateProjectGoalRequest>,
) -> Result<Json<ApiResponse<ProjectGoal>>, AppError> {
    let response = ProjectGoalService::new(state.pool.clone())
        .create(&actor, request)
        .await?;
    Ok(Json(response))
}

async fn update_project_goal(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectGoalRequest>,
) -> Result<Json<ApiResponse<ProjectGoal>>, AppError> {
    let response = ProjectGoalService::new(state.pool.clone())
        .update(&actor, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_project_goal(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = ProjectGoalService::new(state.pool.clone())
        .delete(&actor, id)
        .await?;
    Ok(Json(response))
}
