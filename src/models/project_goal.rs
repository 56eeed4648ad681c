//! Modelo de ProjectGoal
//!
//! Mapea a la tabla pp_project_goal. El valor de una meta es un peso
//! sobre una escala 0-100; la suma por proyecto nunca supera 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectGoal {
    pub id: Uuid,
    pub goal_name: String,
    pub goal_value: i32,
    pub is_completed: bool,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una meta: los tres campos son obligatorios
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectGoalRequest {
    pub project_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub goal_name: String,
    #[validate(range(min = 0, max = 100))]
    pub goal_value: i32,
}

/// Request para actualizar una meta (parcial)
#[derive(Debug, Deserialize)]
pub struct UpdateProjectGoalRequest {
    pub goal_name: Option<String>,
    pub goal_value: Option<i32>,
    pub is_completed: Option<bool>,
}

/// Response de listado de metas de un proyecto
#[derive(Debug, Serialize)]
pub struct ProjectGoalListResponse {
    pub nb_hits: usize,
    pub project_goals: Vec<ProjectGoal>,
}
