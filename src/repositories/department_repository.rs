//! Repositorio de departamentos

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::messages::DEPARTMENT_NOT_FOUND;
use crate::models::department::Department;
use crate::utils::errors::AppError;

pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM pp_department ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(departments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, AppError> {
        let department =
            sqlx::query_as::<_, Department>("SELECT * FROM pp_department WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from_database)?;

        Ok(department)
    }

    pub async fn create(&self, name: &str) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO pp_department (id, department_name, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(department)
    }

    pub async fn update(&self, id: Uuid, name: &str) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE pp_department
            SET department_name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        department.ok_or_else(|| AppError::NotFound(DEPARTMENT_NOT_FOUND.to_string()))
    }

    /// Borrado físico; si algún usuario o proyecto referencia el
    /// departamento, el FK 23503 se traduce a Conflict.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pp_department WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(())
    }
}
