use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Debug;

/// The label consulted after every label of a value when nothing more specific matched.
pub const DEFAULT_LABEL: &str = "default";

/// The synthetic label given to values that carry no labels of their own.
pub const UNTAGGED_LABEL: &str = "untagged";

/// A category name attached to a value and used as a dispatch key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `"default"` fallback label.
    pub fn fallback() -> Self {
        Self(DEFAULT_LABEL.to_owned())
    }

    pub fn untagged() -> Self {
        Self(UNTAGGED_LABEL.to_owned())
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == DEFAULT_LABEL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build a label vector from anything string-like, e.g. `labels(["ordered", "factor"])`.
pub fn labels<I, S>(names: I) -> Vec<Label>
where
    I: IntoIterator<Item = S>,
    S: Into<Label>,
{
    names.into_iter().map(Into::into).collect()
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
