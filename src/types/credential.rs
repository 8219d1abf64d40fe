// src/types/credential.rs
//! The bearer credential captured from (or supplied for) the source API.

use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// Leading framing an operator-pasted header value may carry:
    /// an optional "Authorization:" label and an optional "Bearer"/"Bearer:"
    /// scheme, in any case, with arbitrary interior whitespace.
    static ref CREDENTIAL_FRAMING: Regex =
        Regex::new(r"(?i)^\s*(?:authorization\s*:\s*)?(?:bearer\s*:?\s*)?")
            .expect("Failed to compile credential framing regex - this is a bug in the code");
}

/// An opaque bearer credential in canonical `Bearer: <token>` form.
///
/// Constructed only through [`BearerToken::normalize`], so every value in
/// the system carries exactly one scheme prefix regardless of how the
/// operator (or the intercepted request) framed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Normalizes a raw Authorization value into the canonical form.
    ///
    /// Accepts a bare token, `Bearer <token>`, `Bearer: <token>`, or a full
    /// `Authorization: Bearer: <token>` header line.
    pub fn normalize(raw: &str) -> Result<Self, ValidationError> {
        let token = CREDENTIAL_FRAMING.replace(raw, "");
        let token = token.trim();

        if token.is_empty() {
            return Err(ValidationError::InvalidCredential {
                reason: "no token remains after stripping header framing".to_string(),
            });
        }

        Ok(Self(format!("Bearer: {}", token)))
    }

    /// The full header value, scheme prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display output
        let shown = self.0.chars().take(12).collect::<String>();
        write!(f, "{}…", shown)
    }
}
