use std::sync::LazyLock;

use escolar_common::{Error, Result};
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static MATRICULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}$").expect("valid matricula regex"));

/// Validation of user-facing fields the schema stores: CPF check digits,
/// password complexity, email and matrícula formats.
pub struct InputValidator;

impl InputValidator {
    /// CPF check-digit validation. Expects exactly 11 digits; sequences of
    /// a single repeated digit are invalid even when their check digits
    /// work out.
    pub fn is_valid_cpf(cpf: &str) -> bool {
        let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 11 || cpf.chars().any(|c| !c.is_ascii_digit()) {
            return false;
        }
        if digits.iter().all(|d| *d == digits[0]) {
            return false;
        }
        let check = |len: usize| -> u32 {
            let weight = (len + 1) as u32;
            let sum: u32 = digits[..len]
                .iter()
                .enumerate()
                .map(|(i, d)| d * (weight - i as u32))
                .sum();
            (sum * 10) % 11 % 10
        };
        check(9) == digits[9] && check(10) == digits[10]
    }

    pub fn validate_cpf(cpf: &str) -> Result<()> {
        if Self::is_valid_cpf(cpf) {
            Ok(())
        } else {
            Err(Error::Validation(format!("invalid CPF: {cpf}")))
        }
    }

    /// Password policy: at least 8 characters with upper, lower, digit and
    /// a symbol.
    pub fn validate_senha(senha: &str) -> Result<()> {
        if senha.chars().count() < 8 {
            return Err(Error::Validation(
                "password must have at least 8 characters".into(),
            ));
        }
        let has_upper = senha.chars().any(|c| c.is_uppercase());
        let has_lower = senha.chars().any(|c| c.is_lowercase());
        let has_digit = senha.chars().any(|c| c.is_ascii_digit());
        let has_symbol = senha.chars().any(|c| !c.is_alphanumeric());
        if has_upper && has_lower && has_digit && has_symbol {
            Ok(())
        } else {
            Err(Error::Validation(
                "password must mix upper and lower case, digits and symbols".into(),
            ))
        }
    }

    pub fn validate_email(email: &str) -> Result<()> {
        if EMAIL_RE.is_match(email) {
            Ok(())
        } else {
            Err(Error::Validation(format!("invalid email: {email}")))
        }
    }

    /// Matrícula format: enrollment year, dash, sequential number.
    pub fn validate_matricula(matricula: &str) -> Result<()> {
        if MATRICULA_RE.is_match(matricula) {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "invalid matrícula: {matricula}"
            )))
        }
    }
}
