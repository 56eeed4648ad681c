//! Catálogo de mensajes de la API
//!
//! Mensajes fijos por condición, compartidos entre servicios y tests.

pub const NO_TOKEN_PROVIDED: &str = "No token provided.";
pub const TOKEN_EXPIRED: &str = "Token has expired.";
pub const INVALID_TOKEN: &str = "Invalid token.";
pub const USER_NOT_FOUND: &str = "The user does not exist.";
pub const USER_UNAUTHORIZED: &str = "User not authorized to do this action.";
pub const CONFLICT_DELETE_RECORD: &str =
    "This record cannot be deleted until conflicts are resolved.";
pub const CONFLICT_EMAIL_IN_USE: &str = "This email is already in use.";
pub const ROUTE_NOT_FOUND: &str = "Route does not exist.";
pub const MISSING_FIELDS: &str = "Some required fields are missing.";
pub const INVALID_FIRST_NAME: &str = "Please enter a valid first name.";
pub const INVALID_LAST_NAME: &str = "Please enter a valid last name.";
pub const INVALID_JOB: &str = "Please enter a valid job.";
pub const INVALID_RUT: &str = "Please enter a valid rut with the format: XXXXXXX-X";
pub const INVALID_EMAIL: &str = "Please enter a valid email.";
pub const INVALID_PHONE: &str = "Please enter a valid phone.";
pub const INVALID_PASSWORD: &str = "Invalid password.";
pub const INVALID_DEPARTMENT_ID: &str = "Invalid department id.";
pub const INVALID_DEPARTMENT: &str = "Please enter a valid department.";
pub const DEPARTMENT_UPDATED: &str = "Department updated successfully.";
pub const DEPARTMENT_DELETED: &str = "Department deleted successfully.";
pub const DEPARTMENT_NOT_FOUND: &str = "Department not found.";
pub const USER_UPDATED: &str = "User updated successfully.";
pub const USER_DELETED: &str = "User account deactivated successfully.";
pub const PROJECT_UPDATED: &str = "Project updated successfully.";
pub const PROJECT_DELETED: &str = "Project deleted successfully.";
pub const PROJECT_NOT_FOUND: &str = "Project not found.";
pub const PROJECT_GOAL_NOT_FOUND: &str = "Project goal not found.";
pub const PROJECT_GOAL_UPDATED: &str = "Project goal updated successfully.";
pub const PROJECT_GOAL_DELETED: &str = "Project goal deleted successfully.";
pub const ADD_USER_TO_PROJECT: &str = "Users added to the project successfully.";
pub const REMOVE_USER_FROM_PROJECT: &str = "User successfully removed from the project.";
pub const MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT: &str =
    "Manager department must be the same as project department.";
pub const UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT: &str =
    "this project belongs to another department, you can't access.";
pub const NO_PROJECT_GOAL_ASSOCIATED_TO_THIS_PROJECT: &str =
    "There is not project goal associated with this project.";
pub const INVALID_PROJECT_GOAL_VALUE: &str =
    "the value cannot be 100 or add up to more than 100.";
pub const USER_REGISTERED_IN_PROJECT: &str =
    "The user is already registered in this project.";
pub const USERS_REGISTERED_IN_PROJECT: &str =
    "One or more users are already registered in this project.";
pub const REGISTER_NOT_FOUND: &str = "Register not found.";
pub const USERS_NOT_FOUND_IN_PROJECT: &str =
    "No users associated with this project have been found.";
pub const INVALID_DATE: &str = "Invalid date, must be in yyyy-mm-dd format.";
pub const NO_FILTER_APPLIED: &str = "No filter was applied.";
pub const FILTERS_APPLIED: &str = "One or more filters was applied.";
pub const INVALID_DATES: &str = "Invalid dates.";
