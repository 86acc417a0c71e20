//! Secret-bearing text
//!
//! Credentials are kept in [`Secret`] so that their content cannot reach a
//! log line, a diagnostic screen or a serialized snapshot by accident.
//! Reading the value requires an explicit [`Secret::expose`].

use core::fmt;

use heapless::String;

/// Bounded text whose content is never printed
#[derive(Clone, PartialEq, Eq)]
pub struct Secret<const N: usize> {
    value: String<N>,
}

impl<const N: usize> Secret<N> {
    pub(crate) fn new(value: String<N>) -> Self {
        Self { value }
    }

    /// Borrow the secret value
    ///
    /// Only hand this to the component that transmits the credential.
    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    /// Whether the secret is empty (e.g. an open WiFi network)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }
}

impl<const N: usize> fmt::Debug for Secret<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Secret<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn test_debug_is_redacted() {
        let mut value: String<16> = String::new();
        value.push_str("hunter2").unwrap();
        let secret = Secret::new(value);

        let printed = format!("{:?}", secret);
        assert_eq!(printed, "Secret(<redacted>)");
        assert!(!printed.contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(secret.len(), 7);
    }

    #[test]
    fn test_empty_secret() {
        let secret: Secret<8> = Secret::new(String::new());
        assert!(secret.is_empty());
    }
}
