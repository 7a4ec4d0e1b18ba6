//! Declarative method tables.
//!
//! A method table is a JSON-lines file where every line registers one template method:
//!
//! ```json
//! {"generic": "describe", "label": "ordered", "template": "ordered {value} < {next}"}
//! ```
//!
//! Values to dispatch on are read from JSON-lines files of [`Tagged`] JSON values:
//!
//! ```json
//! {"labels": ["ordered", "factor"], "value": "low"}
//! ```
//!
//! See [`Template`] for the placeholders a method body may use.
mod errors;
pub mod import;
mod json_labels;
mod template;
use crate::Label;
use crate::Registry;
use crate::Tagged;
pub use errors::InvalidJsonlError;
pub use errors::TableBuildError;
pub use errors::TableReadError;
pub use json_labels::JsonTypeLabels;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
pub use template::Template;
pub use template::TemplateError;

/// A JSON value with labels.
pub type JsonValue = Tagged<serde_json::Value>;

/// Named arguments passed to every template method, read through `{arg:NAME}`.
pub type TemplateArgs = BTreeMap<String, String>;

pub type TemplateRegistry = Registry<JsonValue, TemplateArgs, String>;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct MethodLine {
    pub generic: String,
    pub label: Label,
    pub template: String,
}

impl MethodLine {
    pub fn new(
        generic: impl Into<String>,
        label: impl Into<Label>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            generic: generic.into(),
            label: label.into(),
            template: template.into(),
        }
    }
}

impl TemplateRegistry {
    /// Register the method of one table line. Later lines for the same generic and label replace
    /// earlier ones.
    pub fn register_line(&mut self, line: MethodLine) -> Result<(), TableBuildError> {
        let template: Template = line.template.parse().map_err(|source| TableBuildError {
            generic: line.generic.clone(),
            label: line.label.clone(),
            source,
        })?;
        trace!("registering template method {}.{}", line.generic, line.label);
        self.register(line.generic, line.label, move |cursor| template.render(cursor));
        Ok(())
    }

    /// Build a registry from table lines, failing on the first invalid template.
    pub fn from_lines(
        lines: impl IntoIterator<Item = MethodLine>,
    ) -> Result<Self, TableBuildError> {
        let mut registry = Self::new();
        for line in lines {
            registry.register_line(line)?;
        }
        Ok(registry)
    }

    /// Like [`from_lines`](Self::from_lines), but skips lines with invalid templates and returns
    /// their errors alongside the registry.
    pub fn from_lines_and_collect_non_fatal_errors(
        lines: impl IntoIterator<Item = MethodLine>,
    ) -> (Self, Vec<TableBuildError>) {
        let mut registry = Self::new();
        let errors = lines
            .into_iter()
            .filter_map(|line| registry.register_line(line).err())
            .collect();
        (registry, errors)
    }
}
