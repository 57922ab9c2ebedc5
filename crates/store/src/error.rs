//! Store error taxonomy.

use std::fmt::Display;

use thiserror::Error;

use crate::schema::{Constraint, EntityKind};

/// Errors surfaced by writes, lookups, and dataset loading.
///
/// Every failed operation leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A non-null, uniqueness, foreign-key, or check rule rejected the row.
    #[error("violates constraint {rule}: {detail}")]
    ConstraintViolation {
        /// The rule that failed.
        rule: Constraint,
        /// Human-readable description of the offending value.
        detail: String,
    },

    /// No row with this id exists.
    #[error("{kind} row {id} not found")]
    NotFound {
        /// Table that was searched.
        kind: EntityKind,
        /// Requested id.
        id: i32,
    },

    /// A dataset file could not be parsed.
    #[error("invalid dataset: {0}")]
    Dataset(String),
}

impl StoreError {
    pub(crate) fn violation(rule: Constraint, detail: impl Display) -> Self {
        Self::ConstraintViolation {
            rule,
            detail: detail.to_string(),
        }
    }

    /// The violated rule, if this is a constraint violation.
    #[must_use]
    pub const fn rule(&self) -> Option<Constraint> {
        match self {
            Self::ConstraintViolation { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}
