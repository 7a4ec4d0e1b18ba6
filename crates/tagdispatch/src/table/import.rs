//! Read method tables and tagged values from JSON-lines files.
use super::{InvalidJsonlError, JsonValue, MethodLine, TableReadError};
use itertools::Itertools;
use log::trace;
use serde::de::DeserializeOwned;
use serde_jsonlines::json_lines;
use std::path::Path;

pub fn import_methods_from_file(
    path: impl AsRef<Path>,
) -> Result<Vec<MethodLine>, TableReadError> {
    import_from_file(path)
}

pub fn import_methods_from_file_with_collected_res(
    path: impl AsRef<Path>,
) -> Result<Vec<Result<MethodLine, InvalidJsonlError>>, TableReadError> {
    import_from_file_with_collected_res(path)
}

pub fn import_values_from_file(
    path: impl AsRef<Path>,
) -> Result<Vec<JsonValue>, TableReadError> {
    import_from_file(path)
}

pub fn import_values_from_file_with_collected_res(
    path: impl AsRef<Path>,
) -> Result<Vec<Result<JsonValue, InvalidJsonlError>>, TableReadError> {
    import_from_file_with_collected_res(path)
}

fn import_from_file<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Vec<T>, TableReadError> {
    let lines: Result<Vec<T>, InvalidJsonlError> =
        import_from_file_with_collected_res(path)?.into_iter().try_collect();
    Ok(lines?)
}

fn import_from_file_with_collected_res<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Vec<Result<T, InvalidJsonlError>>, TableReadError> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy();
    trace!("reading jsonl from {path_str}");

    Ok(json_lines::<T, _>(path_ref)
        .map_err(|_| TableReadError::InvalidDataPathError {
            path: path_str.to_string(),
        })?
        .enumerate()
        .map(|(i, x)| {
            x.map_err(|_| InvalidJsonlError {
                path: path_str.to_string(),
                line: i + 1,
            })
        })
        .collect_vec())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::Label;

    #[test]
    pub fn test_error_on_nonexisting_file() {
        let result = import_methods_from_file("no-data-here");
        assert_eq!(
            result,
            Err(TableReadError::InvalidDataPathError {
                path: "no-data-here".to_string()
            })
        )
    }

    #[test]
    pub fn test_error_on_invalid_jsonl() {
        let result = import_methods_from_file("data/invalid/methods.jsonl");
        assert_eq!(
            result,
            Err(TableReadError::InvalidJsonlError(InvalidJsonlError {
                path: "data/invalid/methods.jsonl".to_string(),
                line: 2
            }))
        );
    }

    #[test]
    pub fn test_error_collect_on_invalid_jsonl() {
        let result = import_methods_from_file_with_collected_res("data/invalid/methods.jsonl");
        assert!(result.is_ok());
        let lines = result.unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|x| x.is_err()).count(), 1);
    }

    #[test]
    pub fn test_valid_values() {
        let values = import_values_from_file("data/valid/values.jsonl").unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(
            values[0].labels(),
            &[Label::from("ordered"), Label::from("factor")]
        );
        assert!(values[3].is_untagged());
    }

    #[test]
    pub fn test_valid_values_with_collected_res() {
        let values = import_values_from_file_with_collected_res("data/valid/values.jsonl").unwrap();
        assert!(values.iter().all(|x| x.is_ok()));
    }
}
