//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación, CORS y
//! rate limiting.

pub mod auth;
pub mod cors;
pub mod rate_limit;
