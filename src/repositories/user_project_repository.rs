//! Repositorio de membresías usuario-proyecto
//!
//! El par (user_id, project_id) es único; el alta por lote corre en
//! una sola transacción y se revierte completa ante un duplicado.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::messages::{USERS_REGISTERED_IN_PROJECT, USER_REGISTERED_IN_PROJECT};
use crate::models::user_project::{
    MembershipWithDepartment, MembershipWithProject, MembershipWithUser, UserProject,
};
use crate::utils::errors::AppError;

pub struct UserProjectRepository {
    pool: PgPool,
}

impl UserProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Membresía junto al departamento del proyecto dueño; la baja
    /// necesita ese departamento para el chequeo de propiedad.
    pub async fn find_with_project_department(
        &self,
        id: Uuid,
    ) -> Result<Option<MembershipWithDepartment>, AppError> {
        let membership = sqlx::query_as::<_, MembershipWithDepartment>(
            r#"
            SELECT up.id, up.user_id, up.project_id, p.department_id
            FROM pp_user_project up
            JOIN pp_project p ON p.id = up.project_id
            WHERE up.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(membership)
    }

    pub async fn exists(&self, user_id: Uuid, project_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pp_user_project WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(result.0)
    }

    pub async fn add_member(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<UserProject, AppError> {
        let membership = sqlx::query_as::<_, UserProject>(
            r#"
            INSERT INTO pp_user_project (id, user_id, project_id, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_to_bad_request(e, USER_REGISTERED_IN_PROJECT))?;

        Ok(membership)
    }

    /// Alta por lote: todo o nada. Cualquier usuario ya registrado
    /// aborta la transacción completa.
    pub async fn add_members(
        &self,
        user_ids: &[Uuid],
        project_id: Uuid,
    ) -> Result<Vec<UserProject>, AppError> {
        let mut tx: Transaction<'_, Postgres> =
            self.pool.begin().await.map_err(AppError::from_database)?;

        let mut memberships = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let membership = sqlx::query_as::<_, UserProject>(
                r#"
                INSERT INTO pp_user_project (id, user_id, project_id, created_at)
                VALUES ($1, $2, $3, NOW())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| duplicate_to_bad_request(e, USERS_REGISTERED_IN_PROJECT))?;

            memberships.push(membership);
        }

        tx.commit().await.map_err(AppError::from_database)?;
        Ok(memberships)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pp_user_project WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(())
    }

    pub async fn list_users_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<MembershipWithUser>, AppError> {
        let members = sqlx::query_as::<_, MembershipWithUser>(
            r#"
            SELECT up.id, u.id AS user_id, u.first_name, u.last_name,
                   u.email, u.availability, u.job, u.role
            FROM pp_user_project up
            JOIN pp_user u ON u.id = up.user_id
            JOIN pp_project p ON p.id = up.project_id
            WHERE up.project_id = $1 AND p.is_visible = TRUE AND u.active = TRUE
            ORDER BY up.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(members)
    }

    pub async fn list_projects_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<MembershipWithProject>, AppError> {
        let projects = sqlx::query_as::<_, MembershipWithProject>(
            r#"
            SELECT up.id, p.id AS project_id, p.project_name, p.start_date,
                   p.project_status, p.department_id
            FROM pp_user_project up
            JOIN pp_project p ON p.id = up.project_id
            WHERE up.user_id = $1 AND p.is_visible = TRUE
            ORDER BY up.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(projects)
    }
}

/// El unique (user_id, project_id) violado se reporta como BadRequest
/// con el mensaje de "ya registrado", no como Conflict genérico.
fn duplicate_to_bad_request(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::BadRequest(message.to_string());
        }
    }
    AppError::from_database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    // El camino 23505 requiere un DatabaseError real de Postgres; aquí
    // se cubre el resto: cualquier otro error pasa intacto al traductor
    // general y no se disfraza de "ya registrado".
    #[test]
    fn test_non_duplicate_errors_pass_through() {
        let err = duplicate_to_bad_request(sqlx::Error::RowNotFound, USER_REGISTERED_IN_PROJECT);
        assert!(matches!(err, AppError::Database(_)));

        let err = duplicate_to_bad_request(sqlx::Error::PoolClosed, USERS_REGISTERED_IN_PROJECT);
        assert!(!matches!(err, AppError::BadRequest(_)));
    }
}
