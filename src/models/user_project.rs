//! Modelo de UserProject (membresía usuario-proyecto)
//!
//! Mapea a la tabla pp_user_project; el par (user_id, project_id) es único.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::project::ProjectStatus;
use crate::models::user::{Availability, Role};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request para agregar miembros: un id o una lista de ids
#[derive(Debug, Deserialize)]
pub struct AddMembersRequest {
    pub user_id: MemberIds,
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MemberIds {
    One(Uuid),
    Many(Vec<Uuid>),
}

/// Fila de membresía con el departamento del proyecto dueño, para el
/// chequeo de propiedad antes de una baja
#[derive(Debug, Clone, FromRow)]
pub struct MembershipWithDepartment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub department_id: Uuid,
}

/// Fila de membresía con el usuario unido (listado por proyecto)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MembershipWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub availability: Availability,
    pub job: Option<String>,
    pub role: Role,
}

/// Fila de membresía con el proyecto unido (listado por usuario)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MembershipWithProject {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub project_status: ProjectStatus,
    pub department_id: Uuid,
}

/// Response de membresías por proyecto
#[derive(Debug, Serialize)]
pub struct ProjectMembersResponse {
    pub nb_hits: usize,
    pub users: Vec<MembershipWithUser>,
}

/// Response de membresías por usuario
#[derive(Debug, Serialize)]
pub struct UserProjectsResponse {
    pub nb_hits: usize,
    pub projects: Vec<MembershipWithProject>,
}
