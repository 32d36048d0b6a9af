use medlens::infrastructure::observability::sanitize_prompt;

#[test]
fn given_short_prompt_when_sanitizing_then_returned_trimmed() {
    assert_eq!(sanitize_prompt("  What does HbA1c mean?  "), "What does HbA1c mean?");
}

#[test]
fn given_empty_prompt_when_sanitizing_then_placeholder() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncated_with_length() {
    let prompt = "é".repeat(150);
    let sanitized = sanitize_prompt(&prompt);
    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_redacted() {
    let sanitized = sanitize_prompt("use client_secret=abc123 and Bearer xyz");
    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("xyz"));
    assert!(sanitized.contains("client_secret=[REDACTED]"));
}

#[test]
fn given_repeated_secret_when_sanitizing_then_every_occurrence_redacted() {
    let sanitized = sanitize_prompt("api_key=one api_key=two");
    assert_eq!(sanitized, "api_key=[REDACTED] api_key=[REDACTED]");
}
