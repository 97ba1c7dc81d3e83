//! Input validation shared by the API handlers and the page forms.

/// Validate a post payload: both fields must contain something.
pub fn validate_post(title: &str, content: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if title.trim().is_empty() {
        errors.push("Title must not be empty".to_string());
    }
    if content.trim().is_empty() {
        errors.push("Content must not be empty".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a comment payload.
pub fn validate_comment(content: &str) -> Result<(), Vec<String>> {
    if content.trim().is_empty() {
        Err(vec!["Comment must not be empty".to_string()])
    } else {
        Ok(())
    }
}

/// Validate registration input.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push("Username must not be empty".to_string());
    }
    if email.is_empty() || !email.contains('@') {
        errors.push("Invalid email address".to_string());
    }
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_requires_title_and_content() {
        assert!(validate_post("Title", "Body").is_ok());

        let errors = validate_post("", "Body").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Title"));

        // Whitespace-only counts as empty.
        let errors = validate_post("   ", "\n\t").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_comment_requires_content() {
        assert!(validate_comment("Nice post!").is_ok());
        assert!(validate_comment("  ").is_err());
    }

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("alice", "alice@example.com", "longenough").is_ok());

        let errors = validate_registration("", "not-an-email", "short").unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
