//! Field rules -- pure logic, no table access.
//!
//! Each rule takes the normalized text of one cell and returns either the
//! coerced value or a human-readable reason. Invalid input is an ordinary
//! `Err`, never a panic.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use validator::ValidateEmail;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the part of an email address before `@`.
pub const MAX_EMAIL_LOCAL_PART: usize = 50;

static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s]+$").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([0-9]{2}\)\s?[0-9]{5}-[0-9]{4}$").expect("valid regex"));
static CPF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("valid regex"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));
static FORECAST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}\.[0-9]$").expect("valid regex"));

/// Reason attached to a rejected value.
pub type RuleResult<T> = Result<T, String>;

// ---------------------------------------------------------------------------
// Text rules
// ---------------------------------------------------------------------------

/// Returns `true` if `value` is made only of letters and whitespace.
pub fn is_letters_and_spaces(value: &str) -> bool {
    LETTERS_RE.is_match(value)
}

pub fn text(value: &str, max_chars: Option<usize>) -> RuleResult<String> {
    if !is_letters_and_spaces(value) {
        return Err("deve conter apenas letras e espaços".to_string());
    }
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            return Err(format!("deve conter no máximo {max} caracteres"));
        }
    }
    Ok(value.to_string())
}

/// Email address with a bounded local part and a dotted domain.
///
/// The local-part length is checked first so an overlong but otherwise
/// well-formed address gets the more specific message. Only the local part
/// is bounded; the address as a whole has no length cap.
pub fn email(value: &str) -> RuleResult<String> {
    let local_part = value.split('@').next().unwrap_or_default();
    if local_part.chars().count() > MAX_EMAIL_LOCAL_PART {
        return Err(format!(
            "a parte local do email deve ter no máximo {MAX_EMAIL_LOCAL_PART} caracteres"
        ));
    }
    let address = value.to_string();
    if !address.validate_email() || !has_dotted_domain(&address) {
        return Err("deve ser um endereço de email válido".to_string());
    }
    Ok(address)
}

/// Single-label hosts such as `ana@intranet` are not deliverable addresses.
fn has_dotted_domain(address: &str) -> bool {
    match address.rsplit_once('@') {
        Some((_, domain)) => {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// List and choice rules
// ---------------------------------------------------------------------------

/// Split on any of `delimiters`, trimming items and dropping empty ones.
pub fn split_list(value: &str, delimiters: &[char]) -> Vec<String> {
    value
        .split(|c: char| delimiters.contains(&c))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn list(value: &str, delimiters: &[char], max_items: usize) -> RuleResult<Vec<String>> {
    let items = split_list(value, delimiters);
    if items.len() > max_items {
        return Err(format!("deve conter no máximo {max_items} itens"));
    }
    if let Some(bad) = items.iter().find(|item| !is_letters_and_spaces(item)) {
        return Err(format!(
            "cada item deve conter apenas letras e espaços (item inválido: '{bad}')"
        ));
    }
    Ok(items)
}

/// `sim` / `não`, case-insensitive. Nothing else is accepted.
pub fn yes_no(value: &str) -> RuleResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "sim" => Ok(true),
        "não" => Ok(false),
        _ => Err(format!("valor inválido '{value}', use 'Sim' ou 'Não'")),
    }
}

/// Case-insensitive membership in `choices`; the original text is kept.
pub fn choice(value: &str, choices: &[&str]) -> RuleResult<String> {
    if !is_letters_and_spaces(value) {
        return Err("deve conter apenas letras e espaços".to_string());
    }
    let lowered = value.trim().to_lowercase();
    if choices.iter().any(|c| *c == lowered) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "valor inválido '{value}', use um de: {}",
            choices.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Date and number rules
// ---------------------------------------------------------------------------

/// `YYYY-MM-DD` that names a real day. Shape and calendar are both checked.
pub fn date(value: &str) -> RuleResult<NaiveDate> {
    if !DATE_RE.is_match(value) {
        return Err("deve estar no formato AAAA-MM-DD".to_string());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "data inválida".to_string())
}

pub fn graduation_forecast(value: &str) -> RuleResult<String> {
    if FORECAST_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("deve estar no formato AAAA.X, ex: 2024.1".to_string())
    }
}

pub fn integer(value: &str, range: Option<(i64, i64)>) -> RuleResult<i64> {
    let number: i64 = value
        .parse()
        .map_err(|_| "deve ser um número inteiro".to_string())?;
    match range {
        Some((min, max)) if number < min || number > max => {
            Err(format!("deve estar entre {min} e {max}"))
        }
        _ => Ok(number),
    }
}

// ---------------------------------------------------------------------------
// Contact and document rules
// ---------------------------------------------------------------------------

pub fn phone(value: &str) -> RuleResult<String> {
    if PHONE_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("deve estar no formato (XX) XXXXX-XXXX".to_string())
    }
}

pub fn cpf(value: &str) -> RuleResult<String> {
    if CPF_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("deve estar no formato XXX.XXX.XXX-XX".to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
