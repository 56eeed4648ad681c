//! DTOs compartidos de la API

pub mod api_response;
pub mod messages;
