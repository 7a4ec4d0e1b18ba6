//! Resolving a generic against a value's labels, and continuing along the chain.
use crate::DispatchError;
use crate::HasLabels;
use crate::Label;
use crate::Registry;
use log::{debug, trace};

impl<V: HasLabels, A, R> Registry<V, A, R> {
    /// Call the method of `generic` for the most specific label of `value` that has one.
    ///
    /// The candidates are the value's labels followed by `"default"`. `args` reach the selected
    /// method untouched.
    pub fn dispatch(&self, generic: &str, value: &V, args: &A) -> Result<R, DispatchError> {
        let candidates = self.candidate_labels(generic, value)?;
        self.invoke_from(generic, &candidates, 0, value, args)
            .unwrap_or_else(|| {
                Err(DispatchError::NoMethodFound {
                    generic: generic.to_owned(),
                    labels: candidates,
                })
            })
    }

    /// Work out which methods a dispatch of `generic` on `value` would see, without calling any.
    pub fn resolve(&self, generic: &str, value: &V) -> Result<Resolution, DispatchError> {
        let candidates = self.candidate_labels(generic, value)?;
        let mut selected = false;
        let steps = candidates
            .into_iter()
            .map(|label| {
                let implemented = self.contains(generic, label.as_str());
                let step = ResolutionStep {
                    implemented,
                    selected: implemented && !selected,
                    label,
                };
                selected |= implemented;
                step
            })
            .collect();

        let resolution = Resolution {
            generic: generic.to_owned(),
            steps,
        };
        debug!(
            "generic {generic} resolves to {:?}",
            resolution.selected().map(Label::as_str)
        );
        Ok(resolution)
    }

    fn candidate_labels(&self, generic: &str, value: &V) -> Result<Vec<Label>, DispatchError> {
        let mut candidates = if value.labels().is_empty() {
            match self.label_deriver() {
                Some(deriver) => deriver.derive_labels(value),
                None => Vec::new(),
            }
        } else {
            value.labels().to_vec()
        };

        if candidates.is_empty() {
            return Err(DispatchError::MalformedTag {
                generic: generic.to_owned(),
            });
        }

        candidates.push(Label::fallback());
        Ok(candidates)
    }

    /// Call the first method at or after `start`. `None` if the rest of the chain has none.
    fn invoke_from(
        &self,
        generic: &str,
        candidates: &[Label],
        start: usize,
        value: &V,
        args: &A,
    ) -> Option<Result<R, DispatchError>> {
        let (position, method) = candidates
            .iter()
            .enumerate()
            .skip(start)
            .inspect(|(_, label)| trace!("looking for {generic} on label {label}"))
            .find_map(|(i, label)| Some((i, self.lookup(generic, label.as_str())?)))?;

        trace!("calling {generic} on label {}", candidates[position]);
        let cursor = Cursor {
            registry: self,
            generic,
            candidates,
            position,
            value,
            args,
        };
        Some(method(&cursor))
    }
}

/// The state of one running dispatch, handed to the method being executed.
///
/// The candidate labels are captured when the dispatch starts, so relabelling the value inside a
/// method does not change where [`next`](Self::next) continues.
pub struct Cursor<'a, V, A, R> {
    registry: &'a Registry<V, A, R>,
    generic: &'a str,
    candidates: &'a [Label],
    position: usize,
    value: &'a V,
    args: &'a A,
}

impl<'a, V: HasLabels, A, R> Cursor<'a, V, A, R> {
    pub fn generic(&self) -> &'a str {
        self.generic
    }

    /// The label whose method is executing.
    pub fn label(&self) -> &'a Label {
        &self.candidates[self.position]
    }

    /// Every candidate of this dispatch, `"default"` included.
    pub fn candidates(&self) -> &'a [Label] {
        self.candidates
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value(&self) -> &'a V {
        self.value
    }

    /// The arguments this method was called with.
    pub fn args(&self) -> &'a A {
        self.args
    }

    pub fn registry(&self) -> &'a Registry<V, A, R> {
        self.registry
    }

    /// Whether a later candidate has a method, i.e. whether [`next`](Self::next) would succeed in
    /// finding one.
    pub fn has_next(&self) -> bool {
        self.candidates[self.position + 1..]
            .iter()
            .any(|label| self.registry.contains(self.generic, label.as_str()))
    }

    /// Call the next method in the chain with the arguments this method received.
    pub fn next(&self) -> Result<R, DispatchError> {
        self.next_with(self.args)
    }

    /// Call the next method in the chain with different arguments.
    pub fn next_with(&self, args: &A) -> Result<R, DispatchError> {
        self.registry
            .invoke_from(
                self.generic,
                self.candidates,
                self.position + 1,
                self.value,
                args,
            )
            .unwrap_or_else(|| {
                Err(DispatchError::NoNextMethod {
                    generic: self.generic.to_owned(),
                    label: self.label().clone(),
                })
            })
    }

    /// An error reporting that this method failed.
    pub fn fail(&self, reason: impl Into<String>) -> DispatchError {
        DispatchError::MethodFailed {
            generic: self.generic.to_owned(),
            label: self.label().clone(),
            reason: reason.into(),
        }
    }
}

/// One candidate label of a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStep {
    pub label: Label,
    pub implemented: bool,
    pub selected: bool,
}

/// The outcome of [`Registry::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    generic: String,
    steps: Vec<ResolutionStep>,
}

impl Resolution {
    pub fn generic(&self) -> &str {
        &self.generic
    }

    pub fn steps(&self) -> &[ResolutionStep] {
        &self.steps
    }

    /// The label a dispatch would call first, if any.
    pub fn selected(&self) -> Option<&Label> {
        self.steps
            .iter()
            .find(|step| step.selected)
            .map(|step| &step.label)
    }

    /// Labels with a method, in the order a chain of `next` calls visits them.
    pub fn chain(&self) -> impl Iterator<Item = &Label> {
        self.steps
            .iter()
            .filter(|step| step.implemented)
            .map(|step| &step.label)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            let marker = match (step.selected, step.implemented) {
                (true, _) => "=>",
                (false, true) => " *",
                (false, false) => " -",
            };
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{marker} {}", step.label)?;
        }
        Ok(())
    }
}
