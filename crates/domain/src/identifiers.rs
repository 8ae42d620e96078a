//! Identifier types for the translation benchmark domain.
//!
//! Translation identifiers are opaque to the evaluation engine: the serving
//! layer hands one in (usually a database row id) and gets it back untouched
//! on the [`EvaluationResult`](crate::evaluation::EvaluationResult).

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Opaque identifier of one provider translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationId(String);

impl TranslationId {
    /// Generate a fresh, time-ordered identifier (UUID v7).
    #[inline]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an identifier supplied by the caller.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for TranslationId {
    fn default() -> Self {
        Self::generate()
    }
}

impl Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TranslationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TranslationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for TranslationId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for TranslationId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}
