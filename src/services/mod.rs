pub mod authorization;
pub mod department_service;
pub mod goal_budget;
pub mod project_goal_service;
pub mod project_service;
pub mod user_project_service;
pub mod user_service;
