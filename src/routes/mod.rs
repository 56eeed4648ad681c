//! Rutas de la API
//!
//! Un router por recurso, montados bajo /api/v1.

pub mod department_routes;
pub mod project_goal_routes;
pub mod project_routes;
pub mod user_project_routes;
pub mod user_routes;
