//! Repositorio de proyectos
//!
//! Las lecturas normales filtran por is_visible = TRUE: un proyecto
//! oculto existe en la tabla pero queda fuera de todo listado y lookup.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::messages::PROJECT_NOT_FOUND;
use crate::models::project::{
    CreateProjectRequest, DateType, Project, ProjectStatus, ProjectWithRelations,
    UpdateProjectRequest,
};
use crate::utils::errors::AppError;

/// SELECT base con creador y departamento unidos
const PROJECT_SELECT: &str = r#"
SELECT p.id, p.project_name, p.start_date, p.end_date, p.estimated_end_date,
       p.project_status, p.is_visible, p.created_at, p.updated_at,
       u.id AS creator_id, u.first_name, u.last_name, u.email,
       u.availability, u.job, u.role,
       d.id AS department_id, d.department_name
FROM pp_project p
JOIN pp_user u ON u.id = p.creator_user_id
JOIN pp_department d ON d.id = p.department_id
"#;

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_visible(&self) -> Result<Vec<ProjectWithRelations>, AppError> {
        let sql = format!("{PROJECT_SELECT} WHERE p.is_visible = TRUE ORDER BY p.created_at DESC");
        let projects = sqlx::query_as::<_, ProjectWithRelations>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(projects)
    }

    pub async fn list_visible_by_department(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<ProjectWithRelations>, AppError> {
        let sql = format!(
            "{PROJECT_SELECT} WHERE p.is_visible = TRUE AND p.department_id = $1 \
             ORDER BY p.created_at DESC"
        );
        let projects = sqlx::query_as::<_, ProjectWithRelations>(&sql)
            .bind(department_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(projects)
    }

    pub async fn find_visible_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ProjectWithRelations>, AppError> {
        let sql = format!("{PROJECT_SELECT} WHERE p.id = $1 AND p.is_visible = TRUE");
        let project = sqlx::query_as::<_, ProjectWithRelations>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(project)
    }

    /// Lookup sin filtro de visibilidad; el ciclo de vida lo decide el
    /// servicio a partir de Project::lifecycle.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM pp_project WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(project)
    }

    /// Listado filtrado: predicados opcionales sobre departamento, estado
    /// y rango inclusivo en el campo de fecha elegido. El nombre de la
    /// columna de fecha viene de DateType, nunca del request.
    pub async fn filter_visible(
        &self,
        department_id: Option<Uuid>,
        status: Option<ProjectStatus>,
        date_range: Option<(DateType, NaiveDate, NaiveDate)>,
    ) -> Result<Vec<ProjectWithRelations>, AppError> {
        let mut sql = format!("{PROJECT_SELECT} WHERE p.is_visible = TRUE");
        let mut idx = 0u8;

        if department_id.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND p.department_id = ${idx}"));
        }
        if status.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND p.project_status = ${idx}"));
        }
        if let Some((date_type, _, _)) = date_range {
            sql.push_str(&format!(
                " AND p.{} BETWEEN ${} AND ${}",
                date_type.column(),
                idx + 1,
                idx + 2
            ));
        }
        sql.push_str(" ORDER BY p.created_at DESC");

        let mut query = sqlx::query_as::<_, ProjectWithRelations>(&sql);
        if let Some(department_id) = department_id {
            query = query.bind(department_id);
        }
        if let Some(status) = status {
            query = query.bind(status);
        }
        if let Some((_, start, end)) = date_range {
            query = query.bind(start).bind(end);
        }

        let projects = query
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_database)?;

        Ok(projects)
    }

    pub async fn create(
        &self,
        request: &CreateProjectRequest,
        department_id: Uuid,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO pp_project (
                id, project_name, start_date, end_date, estimated_end_date,
                project_status, creator_user_id, department_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.project_name)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.estimated_end_date)
        .bind(request.project_status)
        .bind(request.user_id)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(project)
    }

    /// Actualización parcial: solo los campos presentes
    pub async fn update(
        &self,
        id: Uuid,
        fields: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE pp_project
            SET project_name = COALESCE($2, project_name),
                end_date = COALESCE($3, end_date),
                estimated_end_date = COALESCE($4, estimated_end_date),
                project_status = COALESCE($5, project_status),
                updated_at = NOW()
            WHERE id = $1 AND is_visible = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.project_name.as_deref())
        .bind(fields.end_date)
        .bind(fields.estimated_end_date)
        .bind(fields.project_status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        // El proyecto pudo ocultarse entre el chequeo del servicio y
        // este UPDATE; se reporta igual que uno inexistente.
        project.ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    /// Soft delete: oculta el proyecto, la fila se conserva
    pub async fn hide(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE pp_project
            SET is_visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_visible = TRUE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_database)?;

        Ok(result.rows_affected() > 0)
    }
}
