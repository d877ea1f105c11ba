//! Form validation. Invalid forms never reach the network; the screens show
//! the message inline instead.

pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs an interior dot.
    domain
        .rsplit_once('.')
        .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
        .unwrap_or(false)
}

/// At least 8 characters with at least one letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Strength score 0..=4 from length and character-class variety.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let mut score = 0u8;
    let len = password.chars().count();
    if len >= 8 {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    (score / 2).min(4)
}

pub fn password_strength_label(strength: u8) -> &'static str {
    match strength {
        0 => "Very Weak",
        1 => "Weak",
        2 => "Medium",
        3 => "Strong",
        _ => "Very Strong",
    }
}

/// First missing field's message, if any. Fields are `(value, message)`.
pub fn first_missing<'a>(fields: &[(&str, &'a str)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| *message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("nadia@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("nadia@example"));
        assert!(!is_valid_email("nadia example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("nadia@"));
        assert!(!is_valid_email("nadia"));
        assert!(!is_valid_email("nadia@.com"));
    }

    #[test]
    fn password_rule() {
        assert!(is_valid_password("abcdef12"));
        assert!(!is_valid_password("abcdefgh"));
        assert!(!is_valid_password("12345678"));
        assert!(!is_valid_password("ab12"));
    }

    #[test]
    fn strength_scores_monotonically() {
        assert_eq!(password_strength(""), 0);
        let weak = password_strength("abcdefgh");
        let strong = password_strength("Abcdefgh1234!");
        assert!(weak < strong);
        assert!(strong <= 4);
        assert_eq!(password_strength_label(4), "Very Strong");
    }

    #[test]
    fn missing_field_reports_first() {
        let fields = [("nadia", "Username is required"), ("  ", "Password is required")];
        assert_eq!(first_missing(&fields), Some("Password is required"));
        let full = [("a", "x"), ("b", "y")];
        assert_eq!(first_missing(&full), None);
    }
}
