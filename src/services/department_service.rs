//! Servicio de departamentos
//!
//! CRUD simple; las rutas lo exponen solo a admin.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::messages::{
    DEPARTMENT_DELETED, DEPARTMENT_NOT_FOUND, DEPARTMENT_UPDATED, INVALID_DEPARTMENT,
};
use crate::models::department::{Department, DepartmentListResponse, DepartmentRequest};
use crate::repositories::department_repository::DepartmentRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_not_empty;

pub struct DepartmentService {
    repository: DepartmentRepository,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DepartmentRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<ApiResponse<DepartmentListResponse>> {
        let departments = self.repository.list_all().await?;

        Ok(ApiResponse::success_data(DepartmentListResponse {
            nb_hits: departments.len(),
            departments,
        }))
    }

    pub async fn create(&self, request: DepartmentRequest) -> AppResult<ApiResponse<Department>> {
        if validate_not_empty(&request.department_name).is_err() {
            return Err(AppError::BadRequest(INVALID_DEPARTMENT.to_string()));
        }

        let department = self.repository.create(request.department_name.trim()).await?;

        tracing::info!("Department created: {}", department.id);
        Ok(ApiResponse::success_data(department))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: DepartmentRequest,
    ) -> AppResult<ApiResponse<Department>> {
        if validate_not_empty(&request.department_name).is_err() {
            return Err(AppError::BadRequest(INVALID_DEPARTMENT.to_string()));
        }

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(DEPARTMENT_NOT_FOUND.to_string()));
        }

        let department = self
            .repository
            .update(id, request.department_name.trim())
            .await?;

        Ok(ApiResponse::success_data_and_msg(department, DEPARTMENT_UPDATED))
    }

    /// Borrado físico: un FK pendiente (usuarios o proyectos que apuntan
    /// al departamento) se reporta como Conflict, no como 500.
    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(DEPARTMENT_NOT_FOUND.to_string()));
        }

        self.repository.delete(id).await?;

        tracing::info!("Department deleted: {}", id);
        Ok(ApiResponse::success_msg(DEPARTMENT_DELETED))
    }
}
