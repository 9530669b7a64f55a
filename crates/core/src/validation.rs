//! Input validation for sign-up credentials and lead contact fields.
//!
//! These checks run before any storage round-trip; a request that fails
//! here must never reach the database.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum account password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Pattern for acceptable e-mail addresses: `local@domain.tld`, no whitespace.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Pattern for acceptable account mobile numbers: digits only, 10 to 15 of them.
const MOBILE_PATTERN: &str = r"^[0-9]{10,15}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MOBILE_PATTERN).expect("valid regex"));

/// Validate the shape of an e-mail address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("E-mail must not be empty".into()));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid e-mail address"
        )));
    }
    Ok(())
}

/// Validate an account mobile number: 10 to 15 digits, nothing else.
///
/// This applies to sign-up only. Lead contact numbers are free text
/// (they routinely carry `+`, dashes, and spaces) and are checked for
/// non-emptiness via [`validate_lead_fields`].
pub fn validate_account_mobile(mobile: &str) -> Result<(), CoreError> {
    if mobile.is_empty() {
        return Err(CoreError::Validation(
            "Mobile number must not be empty".into(),
        ));
    }
    if !MOBILE_RE.is_match(mobile) {
        return Err(CoreError::Validation(
            "Mobile number must be 10 to 15 digits".into(),
        ));
    }
    Ok(())
}

/// Validate account password strength (length only, matching the sign-up form).
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate the user-supplied contact fields of a lead.
///
/// All three are required at creation and full update; the status label
/// is deliberately not checked here because the data layer treats it as
/// opaque text.
pub fn validate_lead_fields(name: &str, mobile: &str, email: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Lead name must not be empty".into()));
    }
    if mobile.trim().is_empty() {
        return Err(CoreError::Validation(
            "Lead mobile number must not be empty".into(),
        ));
    }
    if email.trim().is_empty() {
        return Err(CoreError::Validation(
            "Lead e-mail must not be empty".into(),
        ));
    }
    validate_email(email)
}
