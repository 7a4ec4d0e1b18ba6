use crate::Label;

/// A value that carries an ordered sequence of dispatch labels. Earlier labels are more specific.
///
/// [`Tagged`](crate::Tagged) is the usual implementor, but any host type can take part in
/// dispatch by exposing its labels. An empty slice means the value is untagged, in which case the
/// registry's [`LabelDeriver`](crate::LabelDeriver) decides which labels to use.
pub trait HasLabels {
    fn labels(&self) -> &[Label];

    fn inherits(&self, label: &str) -> bool {
        self.labels().iter().any(|x| x == label)
    }
}

impl<T> HasLabels for &T
where
    T: HasLabels + ?Sized,
{
    fn labels(&self) -> &[Label] {
        (*self).labels()
    }
}

impl HasLabels for [Label] {
    fn labels(&self) -> &[Label] {
        self
    }
}

impl HasLabels for Vec<Label> {
    fn labels(&self) -> &[Label] {
        self
    }
}
