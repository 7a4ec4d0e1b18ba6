use super::TemplateError;
use crate::Label;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Input data is not jsonl at {path}, line {line}")]
pub struct InvalidJsonlError {
    pub path: String,
    pub line: usize,
}

#[derive(Error, Debug, PartialEq)]
pub enum TableReadError {
    #[error(transparent)]
    InvalidJsonlError(#[from] InvalidJsonlError),

    #[error("The path {path} is invalid")]
    InvalidDataPathError { path: String },
}

#[derive(Error, Debug, PartialEq)]
#[error("method for generic `{generic}` and label `{label}` has an invalid template: {source}")]
pub struct TableBuildError {
    pub generic: String,
    pub label: Label,
    pub source: TemplateError,
}
