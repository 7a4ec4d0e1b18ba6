use crate::Cursor;
use crate::DispatchError;
use crate::Label;
use crate::LabelDeriver;
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// An implementation registered for one (generic, label) pair.
///
/// It receives the [`Cursor`] of the running dispatch, which gives access to the value, the
/// arguments and the rest of the label chain.
pub type Method<V, A, R> =
    Arc<dyn Fn(&Cursor<'_, V, A, R>) -> Result<R, DispatchError> + Send + Sync>;

type Deriver<V> = Box<dyn LabelDeriver<V> + Send + Sync>;

/// The dispatch table.
///
/// `V` is the dispatched value, `A` the arguments every method of the registry takes and `R` what
/// they return. Methods are installed with [`register`](Self::register), which needs `&mut self`;
/// dispatching only borrows the registry, so once it is populated it can be shared freely.
pub struct Registry<V, A, R> {
    methods: HashMap<String, HashMap<Label, Method<V, A, R>>>,
    deriver: Option<Deriver<V>>,
}

impl<V, A, R> Registry<V, A, R> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
            deriver: None,
        }
    }

    pub fn with_label_deriver(
        mut self,
        deriver: impl LabelDeriver<V> + Send + Sync + 'static,
    ) -> Self {
        self.set_label_deriver(deriver);
        self
    }

    pub fn set_label_deriver(&mut self, deriver: impl LabelDeriver<V> + Send + Sync + 'static) {
        self.deriver = Some(Box::new(deriver));
    }

    pub fn label_deriver(&self) -> Option<&(dyn LabelDeriver<V> + Send + Sync)> {
        self.deriver.as_deref()
    }

    /// Install `method` for `generic` on `label`. An existing method for the same pair is
    /// replaced and returned.
    pub fn register<F>(
        &mut self,
        generic: impl Into<String>,
        label: impl Into<Label>,
        method: F,
    ) -> Option<Method<V, A, R>>
    where
        F: Fn(&Cursor<'_, V, A, R>) -> Result<R, DispatchError> + Send + Sync + 'static,
    {
        self.register_method(generic, label, Arc::new(method))
    }

    pub fn register_method(
        &mut self,
        generic: impl Into<String>,
        label: impl Into<Label>,
        method: Method<V, A, R>,
    ) -> Option<Method<V, A, R>> {
        let generic = generic.into();
        let label = label.into();
        let previous = self
            .methods
            .entry(generic.clone())
            .or_default()
            .insert(label.clone(), method);
        if previous.is_some() {
            debug!("replaced method for generic {generic} on label {label}");
        }
        previous
    }

    pub fn lookup(&self, generic: &str, label: &str) -> Option<&Method<V, A, R>> {
        self.methods.get(generic)?.get(label)
    }

    pub fn contains(&self, generic: &str, label: &str) -> bool {
        self.lookup(generic, label).is_some()
    }

    /// All generics with at least one method, sorted.
    pub fn generics(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).sorted().collect()
    }

    /// Labels that have a method for `generic`, sorted.
    pub fn labels_for_generic(&self, generic: &str) -> Vec<&Label> {
        self.methods
            .get(generic)
            .map(|methods| methods.keys().sorted().collect())
            .unwrap_or_default()
    }

    /// Generics that have a method for `label`, sorted.
    pub fn generics_for_label(&self, label: &str) -> Vec<&str> {
        self.methods
            .iter()
            .filter(|(_, methods)| methods.contains_key(label))
            .map(|(generic, _)| generic.as_str())
            .sorted()
            .collect()
    }

    /// Number of registered methods across all generics.
    pub fn len(&self) -> usize {
        self.methods.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V, A, R> Default for Registry<V, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, A, R> std::fmt::Debug for Registry<V, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let methods = self
            .methods
            .iter()
            .flat_map(|(generic, methods)| {
                methods
                    .keys()
                    .map(move |label| format!("{generic}.{label}"))
            })
            .sorted()
            .collect_vec();
        f.debug_struct("Registry")
            .field("methods", &methods)
            .field("label_deriver", &self.deriver.is_some())
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn constant(
        value: &'static str,
    ) -> impl Fn(&Cursor<'_, (), (), String>) -> Result<String, DispatchError> {
        move |_| Ok(value.to_string())
    }

    #[test]
    fn lookup_is_exact() {
        let mut registry: Registry<(), (), String> = Registry::new();
        registry.register("print", "factor", constant("factor"));

        assert!(registry.contains("print", "factor"));
        assert!(!registry.contains("print", "Factor"));
        assert!(!registry.contains("print", "fact"));
        assert!(!registry.contains("prin", "factor"));
    }

    #[test]
    fn register_returns_previous() {
        let mut registry: Registry<(), (), String> = Registry::new();
        assert!(registry.register("print", "factor", constant("a")).is_none());
        assert!(registry.register("print", "factor", constant("b")).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn listings_are_sorted() {
        let mut registry: Registry<(), (), String> = Registry::new();
        registry.register("summary", "factor", constant(""));
        registry.register("print", "factor", constant(""));
        registry.register("print", "default", constant(""));
        registry.register("print", "data.frame", constant(""));

        assert_eq!(registry.generics(), vec!["print", "summary"]);
        assert_eq!(
            registry.labels_for_generic("print"),
            vec![
                &Label::from("data.frame"),
                &Label::from("default"),
                &Label::from("factor")
            ]
        );
        assert!(registry.labels_for_generic("plot").is_empty());
        assert_eq!(registry.generics_for_label("factor"), vec!["print", "summary"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry<crate::Tagged<String>, Vec<String>, String>>();
    }
}
