//! Servicio de membresías usuario-proyecto
//!
//! Alta de uno o varios miembros, baja por id de membresía y listados
//! cruzados. El alta por lote es todo o nada.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::messages::{
    ADD_USER_TO_PROJECT, PROJECT_NOT_FOUND, REGISTER_NOT_FOUND, REMOVE_USER_FROM_PROJECT,
    USERS_NOT_FOUND_IN_PROJECT, USER_NOT_FOUND, USER_REGISTERED_IN_PROJECT,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user_project::{
    AddMembersRequest, MemberIds, ProjectMembersResponse, UserProject, UserProjectsResponse,
};
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::user_project_repository::UserProjectRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::authorization;
use crate::utils::errors::{AppError, AppResult};

pub struct UserProjectService {
    memberships: UserProjectRepository,
    projects: ProjectRepository,
    users: UserRepository,
}

impl UserProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            memberships: UserProjectRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Agregar uno o varios usuarios a un proyecto. Con un solo id, un
    /// usuario inexistente es 404; con una lista, los ids sin usuario
    /// activo se descartan y el resto entra en una sola transacción.
    pub async fn add_members(
        &self,
        actor: &AuthenticatedUser,
        request: AddMembersRequest,
    ) -> AppResult<ApiResponse<Vec<UserProject>>> {
        let project = self
            .projects
            .find_visible_by_id(request.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))?;

        authorization::can_mutate_project(actor.role, actor.department_id, project.department_id)
            .into_result()?;

        let memberships = match request.user_id {
            MemberIds::One(user_id) => {
                if self.users.find_active_by_id(user_id).await?.is_none() {
                    return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
                }
                if self.memberships.exists(user_id, request.project_id).await? {
                    return Err(AppError::BadRequest(USER_REGISTERED_IN_PROJECT.to_string()));
                }
                vec![self.memberships.add_member(user_id, request.project_id).await?]
            }
            MemberIds::Many(user_ids) => {
                let existing = self.users.filter_existing_active(&user_ids).await?;
                if existing.is_empty() {
                    return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
                }
                self.memberships
                    .add_members(&existing, request.project_id)
                    .await?
            }
        };

        tracing::info!(
            "{} member(s) added to project {}",
            memberships.len(),
            request.project_id
        );
        Ok(ApiResponse::success_data_and_msg(
            memberships,
            ADD_USER_TO_PROJECT,
        ))
    }

    /// Baja de una membresía: misma regla de propiedad que el alta, el
    /// manager solo toca proyectos de su departamento.
    pub async fn remove_member(
        &self,
        actor: &AuthenticatedUser,
        membership_id: Uuid,
    ) -> AppResult<ApiResponse<()>> {
        let membership = self
            .memberships
            .find_with_project_department(membership_id)
            .await?
            .ok_or_else(|| AppError::NotFound(REGISTER_NOT_FOUND.to_string()))?;

        authorization::can_mutate_project(
            actor.role,
            actor.department_id,
            membership.department_id,
        )
        .into_result()?;

        self.memberships.delete(membership_id).await?;

        tracing::info!("Membership removed: {}", membership_id);
        Ok(ApiResponse::success_msg(REMOVE_USER_FROM_PROJECT))
    }

    /// Miembros de un proyecto. Sin miembros responde 404, no un
    /// listado vacío.
    pub async fn list_users_by_project(
        &self,
        project_id: Uuid,
    ) -> AppResult<ApiResponse<ProjectMembersResponse>> {
        if self.projects.find_visible_by_id(project_id).await?.is_none() {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        let users = self.memberships.list_users_by_project(project_id).await?;
        if users.is_empty() {
            return Err(AppError::NotFound(USERS_NOT_FOUND_IN_PROJECT.to_string()));
        }

        Ok(ApiResponse::success_data(ProjectMembersResponse {
            nb_hits: users.len(),
            users,
        }))
    }

    /// Proyectos visibles a los que pertenece un usuario.
    pub async fn list_projects_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<ApiResponse<UserProjectsResponse>> {
        if self.users.find_active_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let projects = self.memberships.list_projects_by_user(user_id).await?;
        if projects.is_empty() {
            return Err(AppError::NotFound(USERS_NOT_FOUND_IN_PROJECT.to_string()));
        }

        Ok(ApiResponse::success_data(UserProjectsResponse {
            nb_hits: projects.len(),
            projects,
        }))
    }
}
