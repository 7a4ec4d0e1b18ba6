//! Constructors, validators and helpers for labelled values.
//!
//! A [`ClassDef`] bundles the three pieces a class needs: a low-level constructor
//! ([`construct`](ClassDef::construct)) that only attaches labels, a validator
//! ([`validate`](ClassDef::validate)) that checks the value, and a helper
//! ([`create`](ClassDef::create)) that does both and is what callers normally use.
//!
//! Inheritance is single and expressed through the label vector: a subclass made with
//! [`extend`](ClassDef::extend) puts its own name in front of its parent's labels, so dispatch
//! tries the subclass first and reaches the parent through continuation.
use crate::HasLabels;
use crate::Label;
use crate::Tagged;
use crate::ValidationError;
use std::sync::Arc;

type Validator<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

pub struct ClassDef<T> {
    labels: Vec<Label>,
    /// Parent validators first.
    validators: Vec<(Label, Validator<T>)>,
}

impl<T> ClassDef<T> {
    pub fn new(name: impl Into<Label>) -> Self {
        Self {
            labels: vec![name.into()],
            validators: Vec::new(),
        }
    }

    /// A subclass of `self` called `name`. It inherits every validator of `self`.
    pub fn extend(&self, name: impl Into<Label>) -> Self {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push(name.into());
        labels.extend(self.labels.iter().cloned());
        Self {
            labels,
            validators: self.validators.clone(),
        }
    }

    /// Add a check that values of this class must pass. The error string becomes the reason of
    /// [`ValidationError::Invalid`].
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        let name = self.name().clone();
        self.validators.push((name, Arc::new(validator)));
        self
    }

    pub fn name(&self) -> &Label {
        &self.labels[0]
    }

    /// The labels given to every value of this class, own name first.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn parent_labels(&self) -> &[Label] {
        &self.labels[1..]
    }

    /// Attach this class's labels to `value` without any checks.
    pub fn construct(&self, value: T) -> Tagged<T> {
        Tagged::new(value, self.labels.iter())
    }

    pub fn validate(&self, value: &Tagged<T>) -> Result<(), ValidationError> {
        if !self.is_instance(value) {
            return Err(ValidationError::NotAnInstance {
                class: self.name().clone(),
                labels: value.labels().to_vec(),
            });
        }

        for (class, validator) in &self.validators {
            validator(value.value()).map_err(|reason| ValidationError::Invalid {
                class: class.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    /// Construct and validate in one step.
    pub fn create(&self, value: T) -> Result<Tagged<T>, ValidationError> {
        let value = self.construct(value);
        self.validate(&value)?;
        Ok(value)
    }

    pub fn is_instance(&self, value: &impl HasLabels) -> bool {
        value.inherits(self.name().as_str())
    }
}

impl<T> Clone for ClassDef<T> {
    fn clone(&self) -> Self {
        Self {
            labels: self.labels.clone(),
            validators: self.validators.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ClassDef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDef")
            .field("labels", &self.labels)
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn factor() -> ClassDef<Vec<usize>> {
        ClassDef::new("factor").with_validator(|codes: &Vec<usize>| {
            if codes.contains(&0) {
                Err("codes start at 1".to_string())
            } else {
                Ok(())
            }
        })
    }

    #[test]
    fn subclass_labels_put_child_first() {
        let ordered = factor().extend("ordered");
        assert_eq!(ordered.labels(), crate::labels(["ordered", "factor"]).as_slice());
        assert_eq!(ordered.parent_labels(), &[Label::from("factor")]);
        assert_eq!(ordered.name(), &Label::from("ordered"));
    }

    #[test]
    fn construct_skips_validation() {
        let value = factor().construct(vec![0, 1]);
        assert_eq!(value.labels(), &[Label::from("factor")]);
        assert!(factor().validate(&value).is_err());
    }

    #[test]
    fn subclass_runs_parent_validator() {
        let ordered = factor()
            .extend("ordered")
            .with_validator(|codes: &Vec<usize>| {
                if codes.windows(2).all(|w| w[0] <= w[1]) {
                    Ok(())
                } else {
                    Err("codes must be sorted".to_string())
                }
            });

        assert!(ordered.create(vec![1, 2, 2]).is_ok());
        assert_eq!(
            ordered.create(vec![0, 1]),
            Err(ValidationError::Invalid {
                class: Label::from("factor"),
                reason: "codes start at 1".to_string()
            })
        );
        assert_eq!(
            ordered.create(vec![2, 1]),
            Err(ValidationError::Invalid {
                class: Label::from("ordered"),
                reason: "codes must be sorted".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_other_classes() {
        let value = Tagged::new(vec![1], ["integer"]);
        assert_eq!(
            factor().validate(&value),
            Err(ValidationError::NotAnInstance {
                class: Label::from("factor"),
                labels: vec![Label::from("integer")]
            })
        );
    }

    #[test]
    fn subclass_instance_is_parent_instance() {
        let ordered = factor().extend("ordered");
        let value = ordered.create(vec![1]).unwrap();
        assert!(factor().is_instance(&value));
        assert!(ordered.is_instance(&value));
        assert!(!ordered.is_instance(&factor().construct(vec![1])));
    }
}
