use super::JsonValue;
use crate::Label;
use crate::LabelDeriver;
use serde_json::Value;

/// Labels untagged JSON values after their base type, most specific first:
/// `NULL`, `logical`, `integer numeric`, `double numeric`, `character` or `list`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JsonTypeLabels;

impl LabelDeriver<JsonValue> for JsonTypeLabels {
    fn derive_labels(&self, value: &JsonValue) -> Vec<Label> {
        let names: &[&str] = match value.value() {
            Value::Null => &["NULL"],
            Value::Bool(_) => &["logical"],
            Value::Number(n) if n.is_f64() => &["double", "numeric"],
            Value::Number(_) => &["integer", "numeric"],
            Value::String(_) => &["character"],
            Value::Array(_) | Value::Object(_) => &["list"],
        };
        crate::labels(names.iter().copied())
    }
}
