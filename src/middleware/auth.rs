//! Middleware de autenticación JWT
//!
//! Este módulo valida el token Bearer, recarga al usuario desde la base
//! (debe seguir activo) e inyecta AuthenticatedUser en las extensions.
//! También define los gates de rol por ruta.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::dto::messages::{INVALID_TOKEN, NO_TOKEN_PROVIDED, USER_NOT_FOUND, USER_UNAUTHORIZED};
use crate::models::user::Role;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
    pub department_id: Option<Uuid>,
}

/// Middleware de autenticación: sin token -> 403, token inválido -> 400,
/// token de una cuenta desactivada -> 404 (la cuenta ya no se sirve).
pub async fn validate_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_token_from_header)
        .ok_or_else(|| AppError::Forbidden(NO_TOKEN_PROVIDED.to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest(INVALID_TOKEN.to_string()))?;

    let user = UserRepository::new(state.pool.clone())
        .find_active_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        role: user.role,
        department_id: user.department_id,
    });

    Ok(next.run(request).await)
}

/// Gate de rutas de solo admin
pub async fn verify_is_admin(
    Extension(actor): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if actor.role != Role::Admin {
        tracing::warn!(
            "{} ({}) hit an admin route",
            actor.user_id,
            actor.role.as_str()
        );
        return Err(AppError::Unauthorized(USER_UNAUTHORIZED.to_string()));
    }
    Ok(next.run(request).await)
}

/// Gate de rutas de admin o manager
pub async fn verify_is_admin_or_manager(
    Extension(actor): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if actor.role != Role::Admin && actor.role != Role::Manager {
        return Err(AppError::Unauthorized(USER_UNAUTHORIZED.to_string()));
    }
    Ok(next.run(request).await)
}
