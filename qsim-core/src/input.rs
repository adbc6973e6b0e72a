//! Leitura de vetores a partir de argumentos
//!
//! Formas aceitas, nesta ordem:
//! 1. caminho de arquivo com uma lista JSON
//! 2. lista JSON inline (`[1, 2.5, -3]`)
//! 3. valores separados por vírgula (`1, 2.5, -3`)

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{QuantumError, QuantumResult};

/// Lista JSON de números; `None` se o valor não for uma lista numérica
fn json_list(text: &str) -> Option<Vec<f64>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        _ => None,
    }
}

/// Interpreta um argumento como vetor
pub fn parse_vector_arg(arg: &str) -> QuantumResult<Vec<f64>> {
    let path = Path::new(arg);
    if path.is_file() {
        let contents = fs::read_to_string(path)?;
        if let Some(values) = json_list(&contents) {
            return Ok(values);
        }
    }

    if let Some(values) = json_list(arg) {
        return Ok(values);
    }

    arg.split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QuantumError::Parse(format!("{arg}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_inline_json() {
        assert_eq!(parse_vector_arg("[1, 2.5, -3]").unwrap(), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_vector_arg("1, 0,0.5").unwrap(), vec![1.0, 0.0, 0.5]);
        assert_eq!(parse_vector_arg("4").unwrap(), vec![4.0]);
    }

    #[test]
    fn test_parse_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[0.1, 0.2, 0.3]").unwrap();

        let path = file.path().to_str().unwrap();
        assert_eq!(parse_vector_arg(path).unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_json_non_list_falls_through() {
        // objeto JSON não é lista nem CSV válido
        assert!(matches!(
            parse_vector_arg(r#"{"a": 1}"#),
            Err(QuantumError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_vector_arg("1, two, 3"), Err(QuantumError::Parse(_))));
        assert!(matches!(parse_vector_arg(""), Err(QuantumError::Parse(_))));
    }
}
