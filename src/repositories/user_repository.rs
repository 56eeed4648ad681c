//! Repositorio de usuarios
//!
//! Todas las lecturas normales filtran por active = TRUE: una cuenta
//! desactivada existe en la tabla pero no se vuelve a servir.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::messages::USER_NOT_FOUND;
use crate::models::user::{Role, UpdateUserRequest, User};
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM pp_user WHERE id = $1 AND active = TRUE")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_database)?;

        Ok(user)
    }

    /// Lookup sin filtro de actividad; el estado de la cuenta lo decide
    /// el servicio a partir de User::account_state.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM pp_user WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(user)
    }

    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM pp_user WHERE email = $1 AND active = TRUE")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_database)?;

        Ok(user)
    }

    pub async fn rut_exists(&self, rut: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pp_user WHERE rut = $1)")
                .bind(rut)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from_database)?;

        Ok(result.0)
    }

    /// De un conjunto de ids, los que corresponden a usuarios activos.
    /// Los ids sin usuario se descartan en silencio.
    pub async fn filter_existing_active(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM pp_user WHERE id = ANY($1) AND active = TRUE")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from_database)?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    pub async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM pp_user WHERE active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(users)
    }

    pub async fn list_active_by_department(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM pp_user
            WHERE department_id = $1 AND active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(users)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        rut: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        phone: &str,
        job: &str,
        role: Role,
        department_id: Uuid,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO pp_user (
                id, rut, first_name, last_name, email, password_hash,
                phone, job, role, department_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rut)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(job)
        .bind(role)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(user)
    }

    /// Actualización parcial del perfil: solo los campos presentes
    pub async fn update_profile(
        &self,
        id: Uuid,
        fields: &UpdateUserRequest,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE pp_user
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                url_avatar = COALESCE($6, url_avatar),
                updated_at = NOW()
            WHERE id = $1 AND active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.first_name.as_deref())
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .bind(fields.url_avatar.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        // La cuenta pudo desactivarse entre el chequeo del servicio y
        // este UPDATE; se reporta igual que una inexistente.
        user.ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE pp_user SET password_hash = $2, updated_at = NOW() WHERE id = $1 AND active = TRUE",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(())
    }

    /// Soft delete: la fila se conserva para la historia referencial
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pp_user SET active = FALSE, updated_at = NOW() WHERE id = $1 AND active = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(result.rows_affected() > 0)
    }
}
