//! Modelo de Project
//!
//! Este módulo contiene el struct Project que mapea a la tabla pp_project,
//! su ciclo de vida de visibilidad y los DTOs de proyecto.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Availability, Role};

/// Estado del proyecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pp_project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    Canceled,
    Postponed,
}

/// Campo de fecha sobre el que se aplica un filtro por rango
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    StartDate,
    EndDate,
    EstimatedEndDate,
}

impl DateType {
    /// Nombre de columna sobre el que filtra, fijo y sin datos del request
    pub fn column(&self) -> &'static str {
        match self {
            DateType::StartDate => "start_date",
            DateType::EndDate => "end_date",
            DateType::EstimatedEndDate => "estimated_end_date",
        }
    }
}

/// Ciclo de vida de visibilidad: el "borrado" de un proyecto lo oculta,
/// nunca elimina la fila.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLifecycle {
    Active,
    Hidden,
}

/// Project - mapea a la tabla pp_project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub project_status: ProjectStatus,
    pub is_visible: bool,
    pub creator_user_id: Uuid,
    pub department_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn lifecycle(&self) -> ProjectLifecycle {
        if self.is_visible {
            ProjectLifecycle::Active
        } else {
            ProjectLifecycle::Hidden
        }
    }
}

/// Fila de proyecto con creador y departamento ya unidos
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithRelations {
    pub id: Uuid,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub project_status: ProjectStatus,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub availability: Availability,
    pub job: Option<String>,
    pub role: Role,
    pub department_id: Uuid,
    pub department_name: String,
}

/// Resumen del creador embebido en las respuestas de proyecto
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreatorInfo {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub availability: Availability,
    pub job: Option<String>,
    pub role: Role,
}

/// Resumen del departamento embebido en las respuestas de proyecto
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDepartmentInfo {
    pub department_id: Uuid,
    pub department_name: String,
}

/// Response de proyecto para la API
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub project_status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: ProjectCreatorInfo,
    pub department: ProjectDepartmentInfo,
}

impl From<ProjectWithRelations> for ProjectResponse {
    fn from(row: ProjectWithRelations) -> Self {
        Self {
            id: row.id,
            project_name: row.project_name,
            start_date: row.start_date,
            end_date: row.end_date,
            estimated_end_date: row.estimated_end_date,
            project_status: row.project_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: ProjectCreatorInfo {
                user_id: row.creator_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                availability: row.availability,
                job: row.job,
                role: row.role,
            },
            department: ProjectDepartmentInfo {
                department_id: row.department_id,
                department_name: row.department_name,
            },
        }
    }
}

/// Request para crear un proyecto
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub project_status: ProjectStatus,
    /// Creador del proyecto
    pub user_id: Uuid,
    /// Requerido para admin, ignorado para manager (se fuerza el suyo)
    pub department_id: Option<Uuid>,
}

/// Request para actualizar un proyecto (parcial)
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub project_name: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub project_status: Option<ProjectStatus>,
}

impl UpdateProjectRequest {
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none()
            && self.end_date.is_none()
            && self.estimated_end_date.is_none()
            && self.project_status.is_none()
    }
}

/// Criterios del endpoint de filtros
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilters {
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<ProjectStatus>,
    pub department: Option<Uuid>,
    pub date_type: Option<DateType>,
}

impl ProjectFilters {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.status.is_none()
            && self.department.is_none()
            && self.date_type.is_none()
    }
}

/// Response del endpoint de filtros, con el tag informativo
#[derive(Debug, Serialize)]
pub struct FilteredProjectsResponse {
    pub additional_info: String,
    pub nb_hits: usize,
    pub projects: Vec<ProjectResponse>,
}

/// Response de listado de proyectos
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub nb_hits: usize,
    pub projects: Vec<ProjectResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(is_visible: bool) -> Project {
        Project {
            id: Uuid::new_v4(),
            project_name: "Plataforma interna".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: None,
            estimated_end_date: None,
            project_status: ProjectStatus::InProgress,
            is_visible,
            creator_user_id: Uuid::new_v4(),
            department_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_lifecycle_follows_visibility() {
        assert_eq!(project(true).lifecycle(), ProjectLifecycle::Active);
        assert_eq!(project(false).lifecycle(), ProjectLifecycle::Hidden);
    }
}
