//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL y los DTOs de cada recurso.

pub mod department;
pub mod project;
pub mod project_goal;
pub mod user;
pub mod user_project;
