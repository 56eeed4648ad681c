//! Modelo de Department
//!
//! Mapea a la tabla pp_department.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub department_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o renombrar un departamento
#[derive(Debug, Deserialize, Validate)]
pub struct DepartmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub department_name: String,
}

/// Response de listado de departamentos
#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub nb_hits: usize,
    pub departments: Vec<Department>,
}
