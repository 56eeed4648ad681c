//! Servicio de metas de proyecto
//!
//! Lecturas por proyecto y escrituras bajo el presupuesto de valores
//! (services::goal_budget). La propiedad del manager se chequea contra
//! el departamento del proyecto dueño de la meta.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::messages::{
    MISSING_FIELDS, NO_PROJECT_GOAL_ASSOCIATED_TO_THIS_PROJECT, PROJECT_GOAL_DELETED,
    PROJECT_GOAL_NOT_FOUND, PROJECT_GOAL_UPDATED, PROJECT_NOT_FOUND,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::project::ProjectWithRelations;
use crate::models::project_goal::{
    CreateProjectGoalRequest, ProjectGoal, ProjectGoalListResponse, UpdateProjectGoalRequest,
};
use crate::repositories::project_goal_repository::ProjectGoalRepository;
use crate::repositories::project_repository::ProjectRepository;
use crate::services::authorization;
use crate::services::goal_budget::GoalBudget;
use crate::utils::errors::{AppError, AppResult};

pub struct ProjectGoalService {
    goals: ProjectGoalRepository,
    projects: ProjectRepository,
    budget: GoalBudget,
}

impl ProjectGoalService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            goals: ProjectGoalRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            budget: GoalBudget::new(pool),
        }
    }

    /// Metas de un proyecto. Un proyecto sin metas responde 404, no un
    /// listado vacío.
    pub async fn list_by_project(
        &self,
        actor: &AuthenticatedUser,
        project_id: Uuid,
    ) -> AppResult<ApiResponse<ProjectGoalListResponse>> {
        let project = self.visible_project(project_id).await?;

        let goals = self.goals.list_by_project(project_id).await?;
        if goals.is_empty() {
            return Err(AppError::NotFound(
                NO_PROJECT_GOAL_ASSOCIATED_TO_THIS_PROJECT.to_string(),
            ));
        }

        authorization::can_view_project_goals(
            actor.role,
            actor.department_id,
            project.department_id,
        )
        .into_result()?;

        Ok(ApiResponse::success_data(ProjectGoalListResponse {
            nb_hits: goals.len(),
            project_goals: goals,
        }))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateProjectGoalRequest,
    ) -> AppResult<ApiResponse<ProjectGoal>> {
        request.validate()?;

        let project = self.visible_project(request.project_id).await?;

        authorization::can_mutate_project(actor.role, actor.department_id, project.department_id)
            .into_result()?;

        let goal = self
            .budget
            .create_goal(request.project_id, &request.goal_name, request.goal_value)
            .await?;

        tracing::info!("Project goal created: {} on {}", goal.id, goal.project_id);
        Ok(ApiResponse::success_data(goal))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        goal_id: Uuid,
        request: UpdateProjectGoalRequest,
    ) -> AppResult<ApiResponse<ProjectGoal>> {
        if request.goal_name.is_none()
            && request.goal_value.is_none()
            && request.is_completed.is_none()
        {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }

        let goal = self
            .goals
            .find_on_visible_project(goal_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_GOAL_NOT_FOUND.to_string()))?;

        let project = self.visible_project(goal.project_id).await?;
        authorization::can_mutate_project(actor.role, actor.department_id, project.department_id)
            .into_result()?;

        let updated = self.budget.update_goal(&goal, &request).await?;

        Ok(ApiResponse::success_data_and_msg(updated, PROJECT_GOAL_UPDATED))
    }

    /// Borrado físico de la meta; libera su valor del presupuesto.
    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        goal_id: Uuid,
    ) -> AppResult<ApiResponse<()>> {
        let goal = self
            .goals
            .find_on_visible_project(goal_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_GOAL_NOT_FOUND.to_string()))?;

        let project = self.visible_project(goal.project_id).await?;
        authorization::can_mutate_project(actor.role, actor.department_id, project.department_id)
            .into_result()?;

        self.goals.delete(goal_id).await?;

        tracing::info!("Project goal deleted: {}", goal_id);
        Ok(ApiResponse::success_msg(PROJECT_GOAL_DELETED))
    }

    async fn visible_project(&self, project_id: Uuid) -> AppResult<ProjectWithRelations> {
        self.projects
            .find_visible_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }
}
