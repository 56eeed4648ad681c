//! Rutas de proyectos
//!
//! Todas exigen token; las escrituras además exigen admin o manager.
//! El borrado es un PUT: oculta el proyecto, no elimina la fila.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::middleware::auth::{self, AuthenticatedUser};
use crate::models::project::{
    CreateProjectRequest, FilteredProjectsResponse, Project, ProjectFilters, ProjectListResponse,
    ProjectResponse, UpdateProjectRequest,
};
use crate::services::project_service::ProjectService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_project_router(state: AppState) -> Router<AppState> {
    let admin_or_manager = Router::new()
        .route("/", post(create_project))
        .route("/:id", put(update_project))
        .route("/delete_project/:id", put(delete_project))
        .route_layer(middleware::from_fn(auth::verify_is_admin_or_manager));

    Router::new()
        .route("/all", get(get_all_projects))
        .route("/filters", get(get_filtered_projects))
        .route("/:id", get(get_one_project))
        .merge(admin_or_manager)
        .route_layer(middleware::from_fn_with_state(state, auth::validate_token))
}

async fn get_all_projects(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProjectListResponse>>, AppError> {
    let response = ProjectService::new(state.pool.clone()).list(&actor).await?;
    Ok(Json(response))
}

async fn get_filtered_projects(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Query(filters): Query<ProjectFilters>,
) -> Result<Json<ApiResponse<FilteredProjectsResponse>>, AppError> {
    let response = ProjectService::new(state.pool.clone())
        .filter(&actor, filters)
        .await?;
    Ok(Json(response))
}

async fn get_one_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let response = ProjectService::new(state.pool.clone())
        .get_by_id(&actor, id)
        .await?;
    Ok(Json(response))
}

async fn create_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let response = ProjectService::new(state.pool.clone())
        .create(&actor, request)
        .await?;
    Ok(Json(response))
}

async fn update_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let response = ProjectService::new(state.pool.clone())
        .update(&actor, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_project(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = ProjectService::new(state.pool.clone())
        .hide(&actor, id)
        .await?;
    Ok(Json(response))
}
