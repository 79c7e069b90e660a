//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar identificadores
//! de vehículos antes de que lleguen al ledger.

use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar un identificador de vehículo (matrícula)
///
/// El identificador es opaco y sensible a mayúsculas; solo se exige que
/// tenga contenido y que no contenga saltos de línea, que romperían el
/// formato por bloques del snapshot.
pub fn validate_vehicle_identifier(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;

    if value.contains(['\n', '\r']) {
        let mut error = ValidationError::new("single_line");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
