//! Attach an ordered label vector to any value.
use crate::HasLabels;
use crate::Label;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// A value paired with its labels, most specific first.
///
/// The labels are set by whoever constructs the value, usually a [`ClassDef`](crate::ClassDef).
/// Dispatch reads them once when it starts; changing them later only affects later dispatches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Tagged<T> {
    #[serde(default)]
    labels: Vec<Label>,
    value: T,
}

impl<T> Tagged<T> {
    pub fn new<I, S>(value: T, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// A value without labels. Dispatching on it requires a label deriver.
    pub fn untagged(value: T) -> Self {
        Self {
            labels: Vec::new(),
            value,
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn first_label(&self) -> Option<&Label> {
        self.labels.first()
    }

    pub fn is_untagged(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn inherits(&self, label: &str) -> bool {
        self.labels.iter().any(|x| x == label)
    }

    pub fn inherits_any<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> bool {
        labels.into_iter().any(|label| self.inherits(label))
    }

    /// For each queried label, its position in this value's labels, or `None` if absent.
    pub fn inherits_which<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Option<usize>> {
        labels
            .into_iter()
            .map(|label| self.labels.iter().position(|x| x == label))
            .collect()
    }

    /// Replace all labels and return the previous ones.
    pub fn set_labels<I, S>(&mut self, labels: I) -> Vec<Label>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        std::mem::replace(
            &mut self.labels,
            labels.into_iter().map(Into::into).collect(),
        )
    }

    /// Make the value more specific by putting `label` in front of the existing labels.
    pub fn prepend_label(&mut self, label: impl Into<Label>) {
        self.labels.insert(0, label.into());
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Drop the labels and return the bare value.
    pub fn unclass(self) -> T {
        self.value
    }

    pub fn untag(self) -> (Vec<Label>, T) {
        (self.labels, self.value)
    }

    pub fn map<S>(self, f: impl FnOnce(T) -> S) -> Tagged<S> {
        Tagged {
            labels: self.labels,
            value: f(self.value),
        }
    }
}

impl<T> From<(T, Vec<Label>)> for Tagged<T> {
    fn from(value: (T, Vec<Label>)) -> Self {
        Self {
            value: value.0,
            labels: value.1,
        }
    }
}

impl<T> HasLabels for Tagged<T> {
    fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> DerefMut for Tagged<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
