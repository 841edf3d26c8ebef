//! Redacting wrapper for credential values
//!
//! Credentials are injected through configuration and passed around as
//! [`Secret`]s so that `Debug` output (logs, error contexts, panics) never
//! leaks them. There is deliberately no `Display` impl; callers must go
//! through [`Secret::expose`] at the point of use.

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying value (e.g. to build a request)
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let secret = Secret::new("super-sensitive");
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("super-sensitive"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = Secret::new("token-123");
        assert_eq!(secret.expose(), "token-123");
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Secret::default().is_empty());
    }
}
