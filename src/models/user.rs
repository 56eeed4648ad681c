//! Modelo de User
//!
//! Este módulo contiene el struct User que mapea a la tabla pp_user,
//! los enums de rol/disponibilidad y los DTOs de usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Roles del sistema, de menor a mayor privilegio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pp_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
    Admin,
    /// Reservado: definido en el dominio pero sin reglas propias todavía.
    /// No se pliega a admin ni a manager.
    BigBoss,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::BigBoss => "big_boss",
        }
    }
}

/// Disponibilidad del usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pp_availability", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    OnVacation,
    NotAvailable,
}

/// Estado de la cuenta: activa o desactivada (soft delete)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Active,
    Deactivated,
}

/// User - mapea a la tabla pp_user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub job: Option<String>,
    pub url_avatar: Option<String>,
    pub active: bool,
    pub availability: Availability,
    pub role: Role,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn account_state(&self) -> AccountState {
        if self.active {
            AccountState::Active
        } else {
            AccountState::Deactivated
        }
    }
}

/// Request para crear un nuevo usuario (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    pub phone: String,
    pub job: String,
    pub role: Role,
    pub department_id: Uuid,
}

/// Request para actualizar el perfil (parcial, self o admin)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url_avatar: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.url_avatar.is_none()
    }
}

/// Request de cambio de contraseña
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response de login: token + identidad mínima
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub user_email: String,
}

/// Response de usuario para la API (sin password_hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub job: Option<String>,
    pub url_avatar: Option<String>,
    pub availability: Availability,
    pub role: Role,
    pub department_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            rut: user.rut,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            job: user.job,
            url_avatar: user.url_avatar,
            availability: user.availability,
            role: user.role,
            department_id: user.department_id,
            created_at: user.created_at,
        }
    }
}

/// Response de listado de usuarios
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub nb_hits: usize,
    pub users: Vec<UserResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(active: bool) -> User {
        User {
            id: Uuid::new_v4(),
            rut: "12345678-5".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana.rojas@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            phone: None,
            job: None,
            url_avatar: None,
            active,
            availability: Availability::Available,
            role: Role::Employee,
            department_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_user_request(password: &str) -> CreateUserRequest {
        CreateUserRequest {
            rut: "12345678-5".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana.rojas@example.com".to_string(),
            password: password.to_string(),
            phone: "+56912345678".to_string(),
            job: "Analista".to_string(),
            role: Role::Employee,
            department_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_account_state_follows_active_flag() {
        assert_eq!(user(true).account_state(), AccountState::Active);
        assert_eq!(user(false).account_state(), AccountState::Deactivated);
    }

    #[test]
    fn test_new_user_password_length() {
        assert!(new_user_request("12345").validate().is_err());
        assert!(new_user_request("123456").validate().is_ok());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::BigBoss.as_str(), "big_boss");
        assert_eq!(Role::Employee.as_str(), "employee");
    }
}
