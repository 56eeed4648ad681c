//! Servicio de usuarios
//!
//! Login, alta (solo admin), actualización de perfil, desactivación y
//! listados acotados por rol.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::messages::{
    INVALID_DEPARTMENT, INVALID_EMAIL, INVALID_FIRST_NAME, INVALID_JOB, INVALID_LAST_NAME,
    INVALID_PASSWORD, INVALID_PHONE, INVALID_RUT, MISSING_FIELDS, USER_DELETED, USER_NOT_FOUND,
    USER_UPDATED,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{
    AccountState, CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest,
    UserListResponse, UserResponse,
};
use crate::repositories::department_repository::DepartmentRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::authorization::{self, ListScope};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{
    validate_email_pattern, validate_not_empty, validate_phone_pattern, validate_rut_pattern,
};

pub struct UserService {
    users: UserRepository,
    departments: DepartmentRepository,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            departments: DepartmentRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }

        let user = self
            .users
            .find_active_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !password_ok {
            return Err(AppError::Unauthorized(INVALID_PASSWORD.to_string()));
        }

        let token = generate_token(user.id, &self.jwt)?;

        tracing::info!("User logged in: {}", user.id);
        Ok(ApiResponse::success_data(LoginResponse {
            token,
            user_id: user.id,
            user_email: user.email,
        }))
    }

    /// Listado de usuarios activos según el alcance del actor: admin ve
    /// todos, manager y empleado solo su departamento.
    pub async fn list(&self, actor: &AuthenticatedUser) -> AppResult<ApiResponse<UserListResponse>> {
        let users = match authorization::list_scope(actor.role, actor.department_id) {
            ListScope::All => self.users.list_active().await?,
            ListScope::Department(department_id) => {
                self.users.list_active_by_department(department_id).await?
            }
            ListScope::Nothing => Vec::new(),
        };

        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Ok(ApiResponse::success_data(UserListResponse {
            nb_hits: users.len(),
            users,
        }))
    }

    /// Búsqueda por email: responde un listado (vacío o de uno), no 404.
    pub async fn find_by_email(&self, email: &str) -> AppResult<ApiResponse<UserListResponse>> {
        if email.trim().is_empty() {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }

        let users: Vec<UserResponse> = self
            .users
            .find_active_by_email(email)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        Ok(ApiResponse::success_data(UserListResponse {
            nb_hits: users.len(),
            users,
        }))
    }

    /// Alta de usuario (solo admin). Las validaciones corren en el orden
    /// del formulario y la primera que falla corta el flujo.
    pub async fn create(&self, request: CreateUserRequest) -> AppResult<ApiResponse<UserResponse>> {
        if validate_not_empty(&request.first_name).is_err() {
            return Err(AppError::BadRequest(INVALID_FIRST_NAME.to_string()));
        }
        if validate_not_empty(&request.last_name).is_err() {
            return Err(AppError::BadRequest(INVALID_LAST_NAME.to_string()));
        }
        if validate_not_empty(&request.job).is_err() {
            return Err(AppError::BadRequest(INVALID_JOB.to_string()));
        }
        if !validate_rut_pattern(&request.rut) {
            return Err(AppError::BadRequest(INVALID_RUT.to_string()));
        }
        // Un rut ya registrado se reporta igual que uno mal formado
        if self.users.rut_exists(&request.rut).await? {
            return Err(AppError::BadRequest(INVALID_RUT.to_string()));
        }
        if !validate_email_pattern(&request.email) {
            return Err(AppError::BadRequest(INVALID_EMAIL.to_string()));
        }
        if !validate_phone_pattern(&request.phone) {
            return Err(AppError::BadRequest(INVALID_PHONE.to_string()));
        }
        if request.validate().is_err() {
            return Err(AppError::BadRequest(INVALID_PASSWORD.to_string()));
        }
        if self
            .departments
            .find_by_id(request.department_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(INVALID_DEPARTMENT.to_string()));
        }

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        // Email duplicado -> Conflict desde el repositorio
        let user = self
            .users
            .create(
                &request.rut,
                &request.first_name,
                &request.last_name,
                &request.email,
                &password_hash,
                &request.phone,
                &request.job,
                request.role,
                request.department_id,
            )
            .await?;

        tracing::info!("User created: {}", user.id);
        Ok(ApiResponse::success_data(UserResponse::from(user)))
    }

    /// Actualización parcial del perfil: el propio usuario o un admin.
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        target_id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<UserResponse>> {
        if request.is_empty() {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }
        if let Some(ref email) = request.email {
            if !validate_email_pattern(email) {
                return Err(AppError::BadRequest(INVALID_EMAIL.to_string()));
            }
        }
        if let Some(ref phone) = request.phone {
            if !validate_phone_pattern(phone) {
                return Err(AppError::BadRequest(INVALID_PHONE.to_string()));
            }
        }

        if self.users.find_active_by_id(target_id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        authorization::can_update_user(actor.role, actor.user_id, target_id).into_result()?;

        let user = self.users.update_profile(target_id, &request).await?;

        Ok(ApiResponse::success_data_and_msg(
            UserResponse::from(user),
            USER_UPDATED,
        ))
    }

    /// Cambio de contraseña: el propio usuario o un admin.
    pub async fn update_password(
        &self,
        actor: &AuthenticatedUser,
        target_id: Uuid,
        new_password: &str,
    ) -> AppResult<ApiResponse<()>> {
        if new_password.len() < 6 {
            return Err(AppError::BadRequest(INVALID_PASSWORD.to_string()));
        }

        if self.users.find_active_by_id(target_id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        authorization::can_update_user(actor.role, actor.user_id, target_id).into_result()?;

        let password_hash =
            hash(new_password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;
        self.users.update_password(target_id, &password_hash).await?;

        tracing::info!("Password updated for user {}", target_id);
        Ok(ApiResponse::success_msg(USER_UPDATED))
    }

    /// Soft delete: la cuenta queda inactiva y fuera de toda lectura
    /// normal. Una cuenta ya desactivada responde 404, igual que una
    /// inexistente.
    pub async fn deactivate(&self, user_id: Uuid) -> AppResult<ApiResponse<()>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        if user.account_state() == AccountState::Deactivated {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let deactivated = self.users.deactivate(user_id).await?;
        if !deactivated {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        tracing::info!("User deactivated: {}", user_id);
        Ok(ApiResponse::success_msg(USER_DELETED))
    }
}
