//! Rutas de departamentos
//!
//! El listado exige token; las escrituras además exigen admin.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::middleware::auth;
use crate::models::department::{Department, DepartmentListResponse, DepartmentRequest};
use crate::services::department_service::DepartmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_department_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_department))
        .route("/:id", put(update_department))
        .route("/:id", delete(delete_department))
        .route_layer(middleware::from_fn(auth::verify_is_admin));

    Router::new()
        .route("/all", get(get_all_departments))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state, auth::validate_token))
}

async fn get_all_departments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DepartmentListResponse>>, AppError> {
    let response = DepartmentService::new(state.pool.clone()).list().await?;
    Ok(Json(response))
}

async fn create_department(
    State(state): State<AppState>,
    Json(request): Json<DepartmentRequest>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    let response = DepartmentService::new(state.pool.clone())
        .create(request)
        .await?;
    Ok(Json(response))
}

async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DepartmentRequest>,
) -> Result<Json<ApiResponse<Department>>, AppError> {
    let response = DepartmentService::new(state.pool.clone())
        .update(id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = DepartmentService::new(state.pool.clone())
        .delete(id)
        .await?;
    Ok(Json(response))
}
