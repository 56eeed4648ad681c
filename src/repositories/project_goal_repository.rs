//! Repositorio de metas de proyecto
//!
//! Las escrituras que tocan el presupuesto de valores viven en
//! services::goal_budget, dentro de una transacción por proyecto.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project_goal::ProjectGoal;
use crate::utils::errors::AppError;

pub struct ProjectGoalRepository {
    pool: PgPool,
}

impl ProjectGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<ProjectGoal>, AppError> {
        let goals = sqlx::query_as::<_, ProjectGoal>(
            r#"
            SELECT * FROM pp_project_goal
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(goals)
    }

    /// Busca una meta cuyo proyecto siga visible; una meta de un
    /// proyecto oculto no se sirve por ninguna lectura normal.
    pub async fn find_on_visible_project(
        &self,
        goal_id: Uuid,
    ) -> Result<Option<ProjectGoal>, AppError> {
        let goal = sqlx::query_as::<_, ProjectGoal>(
            r#"
            SELECT g.* FROM pp_project_goal g
            JOIN pp_project p ON p.id = g.project_id
            WHERE g.id = $1 AND p.is_visible = TRUE
            "#,
        )
        .bind(goal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(goal)
    }

    pub async fn delete(&self, goal_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pp_project_goal WHERE id = $1")
            .bind(goal_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(())
    }
}
