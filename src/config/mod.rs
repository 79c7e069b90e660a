//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y el tarifario.

pub mod environment;
pub mod rates;

pub use environment::*;
