//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos:
//! rut con dígito verificador, email, teléfono y fechas.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref RUT_REGEX: Regex = Regex::new(r"^\d{1,8}-[\dkK]$").unwrap();
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,12}$").unwrap();
}

/// Calcular el dígito verificador de un rut (módulo 11)
///
/// Los pesos ciclan 2..7 de derecha a izquierda; resto 0 -> '0',
/// resto 1 -> 'K', cualquier otro -> 11 - resto.
fn calculate_rut_verifier(number: &str) -> char {
    let mut sum: u32 = 0;
    let mut mul: u32 = 2;

    for c in number.chars().rev() {
        let digit = c.to_digit(10).unwrap_or(0);
        sum += digit * mul;
        if mul % 7 == 0 {
            mul = 2;
        } else {
            mul += 1;
        }
    }

    match sum % 11 {
        0 => '0',
        1 => 'K',
        res => char::from_digit(11 - res, 10).unwrap_or('0'),
    }
}

/// Validar formato de rut XXXXXXX-X y su dígito verificador
pub fn validate_rut_pattern(rut: &str) -> bool {
    if !RUT_REGEX.is_match(rut) {
        return false;
    }

    let clean = rut.replace('-', "").to_uppercase();
    let number = &clean[..clean.len() - 1];
    let verifier = clean.chars().last().unwrap_or('0');

    verifier == calculate_rut_verifier(number)
}

/// Validar formato de email
pub fn validate_email_pattern(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validar formato de teléfono
pub fn validate_phone_pattern(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Validar y convertir string a fecha yyyy-mm-dd
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rut_verifier_digits() {
        // 12345678 -> suma ponderada 138, 138 % 11 = 6, 11 - 6 = 5
        assert_eq!(calculate_rut_verifier("12345678"), '5');
        // 1 -> 1*2 = 2, 2 % 11 = 2, 11 - 2 = 9
        assert_eq!(calculate_rut_verifier("1"), '9');
    }

    #[test]
    fn test_validate_rut_pattern_valid() {
        // rut construido con su verificador correcto
        let verifier = calculate_rut_verifier("12345678");
        let rut = format!("12345678-{}", verifier);
        assert!(validate_rut_pattern(&rut));
    }

    #[test]
    fn test_validate_rut_pattern_flipped_verifier() {
        let verifier = calculate_rut_verifier("12345678");
        // cualquier otro dígito verificador invalida el rut
        for candidate in "0123456789K".chars() {
            if candidate != verifier {
                let rut = format!("12345678-{}", candidate);
                assert!(!validate_rut_pattern(&rut), "rut {} should be invalid", rut);
            }
        }
    }

    #[test]
    fn test_validate_rut_pattern_bad_format() {
        assert!(!validate_rut_pattern("123456789-1")); // 9 dígitos
        assert!(!validate_rut_pattern("1234567"));
        assert!(!validate_rut_pattern("abc-1"));
        assert!(!validate_rut_pattern("1234567-z"));
    }

    #[test]
    fn test_validate_rut_pattern_k_verifier() {
        // buscar un número cuyo verificador sea K y validarlo
        for n in 1..1000u32 {
            let number = n.to_string();
            if calculate_rut_verifier(&number) == 'K' {
                assert!(validate_rut_pattern(&format!("{}-K", number)));
                assert!(validate_rut_pattern(&format!("{}-k", number)));
                return;
            }
        }
        panic!("no rut with K verifier found below 1000");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email_pattern("test@example.com"));
        assert!(!validate_email_pattern("invalid-email"));
        assert!(!validate_email_pattern("test@"));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone_pattern("+56912345678"));
        assert!(validate_phone_pattern("9123456"));
        assert!(!validate_phone_pattern("123"));
        assert!(!validate_phone_pattern("12345678901234567"));
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15-01-2024").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }
}
