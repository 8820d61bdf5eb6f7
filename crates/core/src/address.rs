//! Alias address composition.

/// Build the public alias address for `prefix` under the configured domain.
///
/// ```
/// use aliasly_core::address::alias_address;
///
/// assert_eq!(alias_address("sales", "aliasme.ovh"), "sales@aliasme.ovh");
/// ```
pub fn alias_address(prefix: &str, domain: &str) -> String {
    format!("{prefix}@{domain}")
}

/// Check that `prefix` can serve as the local part of an alias address.
///
/// Returns a human-readable reason when it cannot.
pub fn validate_alias_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("alias_prefix must not be empty".to_string());
    }
    if prefix.contains('@') {
        return Err("alias_prefix must not contain '@'".to_string());
    }
    if prefix.chars().any(char::is_whitespace) {
        return Err("alias_prefix must not contain whitespace".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_prefix_and_domain() {
        assert_eq!(alias_address("shop.news", "example.org"), "shop.news@example.org");
    }

    #[test]
    fn accepts_plain_prefix() {
        assert!(validate_alias_prefix("sales").is_ok());
        assert!(validate_alias_prefix("first.last-2024").is_ok());
    }

    #[test]
    fn rejects_bad_prefixes() {
        assert!(validate_alias_prefix("").is_err());
        assert!(validate_alias_prefix("a@b").is_err());
        assert!(validate_alias_prefix("two words").is_err());
    }
}
