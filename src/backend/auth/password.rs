/**
 * Password Policy Validation
 *
 * Validates candidate passwords against the account policy before they are
 * forwarded to the hosted auth provider. Every failed rule produces its own
 * message so the client can show the full list at once.
 */

/// Special characters the policy accepts
const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Validate a password against the account policy
///
/// Rules: at least 8 characters, at least one uppercase letter, one
/// lowercase letter, one digit, and one special character from
/// `!@#$%^&*`.
///
/// # Returns
///
/// `Ok(())` when the password satisfies every rule, otherwise `Err` with
/// one message per failed rule.
pub fn validate_password(password: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        errors.push(
            "Password must contain at least one special character (!@#$%^&*)".to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
