//! Policies for labelling values that arrive at a dispatch without labels.
use crate::Label;

/// Supplies labels for a value whose own label sequence is empty.
///
/// A [`Registry`](crate::Registry) only consults its deriver in that case; explicitly labelled
/// values are never relabelled. Returning an empty vector makes the dispatch fail with
/// [`DispatchError::MalformedTag`](crate::DispatchError::MalformedTag).
pub trait LabelDeriver<V> {
    fn derive_labels(&self, value: &V) -> Vec<Label>;
}

/// Labels every untagged value `"untagged"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Untagged;

impl<V> LabelDeriver<V> for Untagged {
    fn derive_labels(&self, _value: &V) -> Vec<Label> {
        vec![Label::untagged()]
    }
}

/// Derive labels with a closure.
#[derive(Debug, Clone, Copy)]
pub struct DeriveFn<F>(pub F);

impl<V, F> LabelDeriver<V> for DeriveFn<F>
where
    F: Fn(&V) -> Vec<Label>,
{
    fn derive_labels(&self, value: &V) -> Vec<Label> {
        (self.0)(value)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn untagged_ignores_value() {
        assert_eq!(
            LabelDeriver::<u8>::derive_labels(&Untagged, &3),
            vec![Label::from("untagged")]
        );
    }

    #[test]
    fn closure_deriver() {
        let deriver = DeriveFn(|x: &i64| {
            if *x < 0 {
                crate::labels(["negative"])
            } else {
                crate::labels(["positive"])
            }
        });
        assert_eq!(deriver.derive_labels(&-2), vec![Label::from("negative")]);
        assert_eq!(deriver.derive_labels(&2), vec![Label::from("positive")]);
    }
}
