//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns
///   `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => parse_with_default(var, &v, default),
        Err(_) => default,
    }
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: &str,
    default: T,
) -> T {
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(var, value = %raw, default = %default, "invalid env var value, using default");
            default
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_value() {
        let result: u32 = parse_with_default("TEST_VAR", "42", 10);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_invalid_value() {
        let result: u32 = parse_with_default("TEST_VAR", "banana", 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_empty_value() {
        let result: u32 = parse_with_default("TEST_VAR", "", 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_missing_var_uses_default() {
        let result: u32 = env_parse_with_default("CASEINTAKE_TEST_MISSING_98273", 10);
        assert_eq!(result, 10);
    }
}
