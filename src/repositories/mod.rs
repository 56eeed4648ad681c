//! Repositorios de acceso a datos

pub mod department_repository;
pub mod project_goal_repository;
pub mod project_repository;
pub mod user_project_repository;
pub mod user_repository;
