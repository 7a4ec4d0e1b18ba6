use crate::Label;
use itertools::Itertools;
use thiserror::Error;

/// Failures of a single dispatch. None of them are retried; they reach the caller as they are.
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("no method for generic `{generic}` applies to labels [{}]", .labels.iter().join(", "))]
    NoMethodFound { generic: String, labels: Vec<Label> },

    #[error("no next method for generic `{generic}` after label `{label}`")]
    NoNextMethod { generic: String, label: Label },

    #[error("value passed to generic `{generic}` has no labels")]
    MalformedTag { generic: String },

    #[error("method for generic `{generic}` and label `{label}` failed: {reason}")]
    MethodFailed {
        generic: String,
        label: Label,
        reason: String,
    },
}

/// Returned by [`ClassDef::validate`](crate::ClassDef::validate) and
/// [`ClassDef::create`](crate::ClassDef::create).
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("value with labels [{}] is not an instance of `{class}`", .labels.iter().join(", "))]
    NotAnInstance { class: Label, labels: Vec<Label> },

    #[error("invalid `{class}`: {reason}")]
    Invalid { class: Label, reason: String },
}
