//! Servicio de proyectos
//!
//! Listados acotados por rol, lookup con chequeo de departamento,
//! filtros combinables, alta, actualización parcial y ocultamiento
//! (el borrado de un proyecto nunca elimina la fila).

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::messages::{
    DEPARTMENT_NOT_FOUND, FILTERS_APPLIED, INVALID_DATE, INVALID_DATES, MISSING_FIELDS,
    NO_FILTER_APPLIED, PROJECT_DELETED, PROJECT_NOT_FOUND, PROJECT_UPDATED, USER_NOT_FOUND,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::project::{
    CreateProjectRequest, DateType, FilteredProjectsResponse, Project, ProjectFilters,
    ProjectLifecycle, ProjectListResponse, ProjectResponse, ProjectWithRelations,
    UpdateProjectRequest,
};
use crate::models::user::Role;
use crate::repositories::department_repository::DepartmentRepository;
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::authorization::{self, ListScope};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

pub struct ProjectService {
    projects: ProjectRepository,
    users: UserRepository,
    departments: DepartmentRepository,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            departments: DepartmentRepository::new(pool),
        }
    }

    /// Listado de proyectos visibles: admin y manager ven todos, los
    /// empleados solo los de su departamento.
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
    ) -> AppResult<ApiResponse<ProjectListResponse>> {
        let rows = self
            .rows_for_scope(authorization::project_list_scope(
                actor.role,
                actor.department_id,
            ))
            .await?;

        let projects: Vec<ProjectResponse> = rows.into_iter().map(ProjectResponse::from).collect();
        Ok(ApiResponse::success_data(ProjectListResponse {
            nb_hits: projects.len(),
            projects,
        }))
    }

    pub async fn get_by_id(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> AppResult<ApiResponse<ProjectResponse>> {
        let row = self
            .projects
            .find_visible_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))?;

        authorization::can_view_project(actor.role, actor.department_id, row.department_id)
            .into_result()?;

        Ok(ApiResponse::success_data(ProjectResponse::from(row)))
    }

    /// Filtros combinables por departamento, estado y rango de fechas.
    /// Sin criterios el listado vuelve completo (dentro del alcance del
    /// actor) con el tag "No filter was applied.".
    pub async fn filter(
        &self,
        actor: &AuthenticatedUser,
        filters: ProjectFilters,
    ) -> AppResult<ApiResponse<FilteredProjectsResponse>> {
        if filters.is_empty() {
            let rows = self
                .rows_for_scope(authorization::project_list_scope(
                    actor.role,
                    actor.department_id,
                ))
                .await?;
            return Ok(filtered_response(rows, NO_FILTER_APPLIED));
        }

        let date_range = parse_date_range(
            filters.date_type,
            filters.start.as_deref(),
            filters.end.as_deref(),
        )?;

        // Los empleados quedan anclados a su departamento; el criterio
        // de departamento del request solo aplica a admin y manager.
        let department_id = match actor.role {
            Role::Admin | Role::Manager => match filters.department {
                Some(department_id) => {
                    if self
                        .departments
                        .find_by_id(department_id)
                        .await?
                        .is_none()
                    {
                        return Err(AppError::NotFound(DEPARTMENT_NOT_FOUND.to_string()));
                    }
                    Some(department_id)
                }
                None => None,
            },
            Role::Employee | Role::BigBoss => match actor.department_id {
                Some(department_id) => Some(department_id),
                None => return Ok(filtered_response(Vec::new(), FILTERS_APPLIED)),
            },
        };

        let rows = self
            .projects
            .filter_visible(department_id, filters.status, date_range)
            .await?;

        Ok(filtered_response(rows, FILTERS_APPLIED))
    }

    /// Alta de proyecto: el admin debe indicar departamento, al manager
    /// se le fuerza el suyo.
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateProjectRequest,
    ) -> AppResult<ApiResponse<Project>> {
        request.validate()?;

        let department_id = authorization::department_for_new_project(
            actor.role,
            actor.department_id,
            request.department_id,
        )?;

        if self.users.find_active_by_id(request.user_id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }
        if self.departments.find_by_id(department_id).await?.is_none() {
            return Err(AppError::NotFound(DEPARTMENT_NOT_FOUND.to_string()));
        }

        let project = self.projects.create(&request, department_id).await?;

        tracing::info!("Project created: {}", project.id);
        Ok(ApiResponse::success_data(project))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateProjectRequest,
    ) -> AppResult<ApiResponse<Project>> {
        if request.is_empty() {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }

        let existing = self
            .projects
            .find_visible_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))?;

        authorization::can_mutate_project(actor.role, actor.department_id, existing.department_id)
            .into_result()?;

        let project = self.projects.update(id, &request).await?;

        Ok(ApiResponse::success_data_and_msg(project, PROJECT_UPDATED))
    }

    /// Ocultar un proyecto: deja de servirse en cualquier lectura, la
    /// fila y sus metas se conservan.
    pub async fn hide(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> AppResult<ApiResponse<()>> {
        let existing = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))?;

        // Un proyecto ya oculto es indistinguible de uno inexistente
        if existing.lifecycle() == ProjectLifecycle::Hidden {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        authorization::can_mutate_project(actor.role, actor.department_id, existing.department_id)
            .into_result()?;

        let hidden = self.projects.hide(id).await?;
        if !hidden {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        tracing::info!("Project hidden: {}", id);
        Ok(ApiResponse::success_msg(PROJECT_DELETED))
    }

    async fn rows_for_scope(&self, scope: ListScope) -> AppResult<Vec<ProjectWithRelations>> {
        match scope {
            ListScope::All => self.projects.list_visible().await,
            ListScope::Department(department_id) => {
                self.projects.list_visible_by_department(department_id).await
            }
            ListScope::Nothing => Ok(Vec::new()),
        }
    }
}

/// El campo de fecha y su rango van juntos o no van: date_type sin
/// rango completo (o un rango suelto) es un request inválido.
fn parse_date_range(
    date_type: Option<DateType>,
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<Option<(DateType, NaiveDate, NaiveDate)>> {
    match (date_type, start, end) {
        (None, None, None) => Ok(None),
        (Some(date_type), Some(start), Some(end)) => {
            let start =
                validate_date(start).map_err(|_| AppError::BadRequest(INVALID_DATE.to_string()))?;
            let end =
                validate_date(end).map_err(|_| AppError::BadRequest(INVALID_DATE.to_string()))?;
            Ok(Some((date_type, start, end)))
        }
        _ => Err(AppError::BadRequest(INVALID_DATES.to_string())),
    }
}

fn filtered_response(
    rows: Vec<ProjectWithRelations>,
    additional_info: &str,
) -> ApiResponse<FilteredProjectsResponse> {
    let projects: Vec<ProjectResponse> = rows.into_iter().map(ProjectResponse::from).collect();
    ApiResponse::success_data(FilteredProjectsResponse {
        additional_info: additional_info.to_string(),
        nb_hits: projects.len(),
        projects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_absent() {
        assert!(parse_date_range(None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_date_range_complete() {
        let range = parse_date_range(
            Some(DateType::StartDate),
            Some("2024-01-01"),
            Some("2024-06-30"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(range.0, DateType::StartDate);
        assert!(range.1 < range.2);
    }

    #[test]
    fn test_date_range_partial_is_rejected() {
        // date_type sin rango, o rango sin date_type
        assert!(parse_date_range(Some(DateType::EndDate), None, None).is_err());
        assert!(parse_date_range(None, Some("2024-01-01"), Some("2024-06-30")).is_err());
        assert!(parse_date_range(Some(DateType::EndDate), Some("2024-01-01"), None).is_err());
    }

    #[test]
    fn test_date_range_bad_format_is_rejected() {
        assert!(parse_date_range(
            Some(DateType::StartDate),
            Some("01/01/2024"),
            Some("2024-06-30"),
        )
        .is_err());
    }
}
