//! Invariante de presupuesto de metas
//!
//! La suma de goal_value de las metas de un proyecto nunca supera 100.
//! Las escrituras que tocan el presupuesto corren en una transacción
//! que primero bloquea la fila del proyecto (SELECT ... FOR UPDATE):
//! dos altas concurrentes sobre el mismo proyecto se serializan y la
//! segunda valida contra el total ya confirmado, nunca contra una
//! lectura obsoleta.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::messages::{INVALID_PROJECT_GOAL_VALUE, PROJECT_GOAL_NOT_FOUND, PROJECT_NOT_FOUND};
use crate::models::project_goal::{ProjectGoal, UpdateProjectGoalRequest};
use crate::utils::errors::{AppError, AppResult};

/// Regla pura del presupuesto: con un total ya asignado de
/// `current_total`, ¿cabe una meta de valor `candidate`?
///
/// Total en 100 o más: no queda espacio, se rechaza cualquier valor.
pub fn budget_allows(current_total: i32, candidate: i32) -> bool {
    if current_total >= 100 {
        return false;
    }
    current_total + candidate <= 100
}

pub struct GoalBudget {
    pool: PgPool,
}

impl GoalBudget {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una meta validando el presupuesto dentro de la transacción
    pub async fn create_goal(
        &self,
        project_id: Uuid,
        goal_name: &str,
        goal_value: i32,
    ) -> AppResult<ProjectGoal> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_database)?;

        lock_project(&mut tx, project_id).await?;

        let current_total = sum_goal_values(&mut tx, project_id, None).await?;
        if !budget_allows(current_total, goal_value) {
            return Err(AppError::BadRequest(INVALID_PROJECT_GOAL_VALUE.to_string()));
        }

        let goal = sqlx::query_as::<_, ProjectGoal>(
            r#"
            INSERT INTO pp_project_goal (
                id, goal_name, goal_value, is_completed, project_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, FALSE, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(goal_name)
        .bind(goal_value)
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_database)?;

        tx.commit().await.map_err(AppError::from_database)?;
        Ok(goal)
    }

    /// Actualización parcial de una meta. Si cambia el valor, el
    /// presupuesto se valida excluyendo el valor anterior de esta
    /// misma meta (se compara contra el total de las demás).
    pub async fn update_goal(
        &self,
        goal: &ProjectGoal,
        fields: &UpdateProjectGoalRequest,
    ) -> AppResult<ProjectGoal> {
        let mut tx = self.pool.begin().await.map_err(AppError::from_database)?;

        lock_project(&mut tx, goal.project_id).await?;

        if let Some(new_value) = fields.goal_value {
            let others_total = sum_goal_values(&mut tx, goal.project_id, Some(goal.id)).await?;
            if !budget_allows(others_total, new_value) {
                return Err(AppError::BadRequest(INVALID_PROJECT_GOAL_VALUE.to_string()));
            }
        }

        let updated = sqlx::query_as::<_, ProjectGoal>(
            r#"
            UPDATE pp_project_goal
            SET goal_name = COALESCE($2, goal_name),
                goal_value = COALESCE($3, goal_value),
                is_completed = COALESCE($4, is_completed),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(goal.id)
        .bind(fields.goal_name.as_deref())
        .bind(fields.goal_value)
        .bind(fields.is_completed)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from_database)?
        // La meta pudo borrarse entre la lectura del servicio y esta
        // transacción; se reporta igual que una inexistente.
        .ok_or_else(|| AppError::NotFound(PROJECT_GOAL_NOT_FOUND.to_string()))?;

        tx.commit().await.map_err(AppError::from_database)?;
        Ok(updated)
    }
}

/// Bloquear la fila del proyecto para serializar las escrituras de
/// metas por proyecto. El proyecto debe seguir visible.
async fn lock_project(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: Uuid,
) -> AppResult<()> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM pp_project WHERE id = $1 AND is_visible = TRUE FOR UPDATE",
    )
    .bind(project_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::from_database)?;

    match row {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string())),
    }
}

/// Total asignado a un proyecto, opcionalmente excluyendo una meta
/// (la que se está actualizando).
async fn sum_goal_values(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: Uuid,
    excluding_goal_id: Option<Uuid>,
) -> AppResult<i32> {
    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(goal_value), 0)
        FROM pp_project_goal
        WHERE project_id = $1 AND ($2::uuid IS NULL OR id <> $2)
        "#,
    )
    .bind(project_id)
    .bind(excluding_goal_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(AppError::from_database)?;

    Ok(total.0 as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_sequence() {
        // 50, luego 40, el intento de 20 se rechaza (90 + 20 > 100)
        assert!(budget_allows(0, 50));
        assert!(budget_allows(50, 40));
        assert!(!budget_allows(90, 20));
    }

    #[test]
    fn test_budget_exact_boundary() {
        assert!(budget_allows(90, 10));
        assert!(!budget_allows(90, 11));
    }

    #[test]
    fn test_budget_full_rejects_everything() {
        assert!(!budget_allows(100, 0));
        assert!(!budget_allows(100, 1));
        assert!(!budget_allows(120, 0));
    }

    #[test]
    fn test_budget_update_excludes_own_value() {
        // metas A=30 y B=20: al actualizar A se compara contra el
        // total de las demás (20), no contra el total completo (50)
        let others_total = 20;
        assert!(budget_allows(others_total, 70)); // 20 + 70 = 90
        assert!(budget_allows(others_total, 80)); // justo en 100
        assert!(!budget_allows(others_total, 81)); // 101, se rechaza
    }
}
