use super::{JsonValue, TemplateArgs};
use crate::Cursor;
use crate::DispatchError;
use itertools::Itertools;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TemplateError {
    #[error("placeholder opened at byte {position} is never closed")]
    UnclosedPlaceholder { position: usize },

    #[error("unmatched `}}` at byte {position}")]
    UnmatchedBrace { position: usize },

    #[error("unknown placeholder `{{{name}}}`")]
    UnknownPlaceholder { name: String },

    #[error("`{{arg:}}` needs an argument name")]
    EmptyArgName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Value,
    Label,
    Generic,
    Labels,
    Next,
    Arg(String),
}

/// The body of a method loaded from a method table.
///
/// Placeholders: `{value}` the dispatched value (strings unquoted, everything else as JSON),
/// `{label}` the label whose method is running, `{generic}`, `{labels}` the labels the dispatch
/// scans (derived labels for untagged values, without the trailing `default`),
/// `{next}` the result of the next method in the chain and `{arg:NAME}` a call argument.
/// `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|(_, c)| *c == '{').is_some() => text.push('{'),
                '}' if chars.next_if(|(_, c)| *c == '}').is_some() => text.push('}'),
                '}' => return Err(TemplateError::UnmatchedBrace { position }),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedPlaceholder { position });
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::parse(&name)?);
                }
                c => text.push(c),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }
}

impl Segment {
    fn parse(name: &str) -> Result<Self, TemplateError> {
        match name {
            "value" => Ok(Self::Value),
            "label" => Ok(Self::Label),
            "generic" => Ok(Self::Generic),
            "labels" => Ok(Self::Labels),
            "next" => Ok(Self::Next),
            _ => match name.strip_prefix("arg:") {
                Some("") => Err(TemplateError::EmptyArgName),
                Some(arg) => Ok(Self::Arg(arg.to_owned())),
                None => Err(TemplateError::UnknownPlaceholder {
                    name: name.to_owned(),
                }),
            },
        }
    }
}

impl Template {
    /// Whether rendering continues along the chain.
    pub fn calls_next(&self) -> bool {
        self.segments.contains(&Segment::Next)
    }

    pub fn render(
        &self,
        cursor: &Cursor<'_, JsonValue, TemplateArgs, String>,
    ) -> Result<String, DispatchError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Value => match cursor.value().value() {
                    serde_json::Value::String(s) => out.push_str(s),
                    other => out.push_str(&other.to_string()),
                },
                Segment::Label => out.push_str(cursor.label().as_str()),
                Segment::Generic => out.push_str(cursor.generic()),
                Segment::Labels => {
                    let candidates = cursor.candidates();
                    let scanned = &candidates[..candidates.len().saturating_sub(1)];
                    out.push_str(&scanned.iter().join(", "))
                }
                Segment::Next => out.push_str(&cursor.next()?),
                Segment::Arg(name) => match cursor.args().get(name) {
                    Some(arg) => out.push_str(arg),
                    None => return Err(cursor.fail(format!("missing argument `{name}`"))),
                },
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn parses_text_and_placeholders() {
        let template: Template = "a {value} b {arg:x}".parse().unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Text("a ".to_string()),
                Segment::Value,
                Segment::Text(" b ".to_string()),
                Segment::Arg("x".to_string()),
            ]
        );
        assert!(!template.calls_next());
    }

    #[test]
    fn escaped_braces() {
        let template: Template = "{{{label}}}".parse().unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Text("{".to_string()),
                Segment::Label,
                Segment::Text("}".to_string()),
            ]
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "abc {value".parse::<Template>(),
            Err(TemplateError::UnclosedPlaceholder { position: 4 })
        );
        assert_eq!(
            "abc } def".parse::<Template>(),
            Err(TemplateError::UnmatchedBrace { position: 4 })
        );
        assert_eq!(
            "{nope}".parse::<Template>(),
            Err(TemplateError::UnknownPlaceholder {
                name: "nope".to_string()
            })
        );
        assert_eq!(
            "{arg:}".parse::<Template>(),
            Err(TemplateError::EmptyArgName)
        );
    }

    #[test]
    fn next_is_detected() {
        let template: Template = "x < {next}".parse().unwrap();
        assert!(template.calls_next());
    }
}
