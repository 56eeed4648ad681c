//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno.

pub mod environment;

pub use environment::*;
