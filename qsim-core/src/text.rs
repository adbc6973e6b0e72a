//! Bag-of-words sobre vocabulário compartilhado
//!
//! Os dois textos compartilham o mesmo vocabulário, portanto os vetores
//! resultantes têm a mesma base antes da codificação.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::QuantumError;

/// Tamanho padrão do vocabulário
pub const DEFAULT_MAX_FEATURES: usize = 1024;

/// Ponderação do bag-of-words
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    /// Frequência de termo normalizada pela soma
    #[default]
    Tf,
    /// Presença binária
    Bin,
}

impl FeatureMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tf => "tf",
            Self::Bin => "bin",
        }
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeatureMode {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tf" => Ok(Self::Tf),
            "bin" => Ok(Self::Bin),
            other => Err(QuantumError::Parse(format!(
                "unknown feature mode '{other}' (expected 'tf' or 'bin')"
            ))),
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\''
}

/// Sequências máximas de [A-Za-z0-9'], em minúsculas
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect()
}

/// Vocabulário por frequência de documento (desc), desempate alfabético
pub fn build_vocab(a_tokens: &[String], b_tokens: &[String], max_features: usize) -> Vec<String> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in [a_tokens, b_tokens] {
        let unique: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
        for tok in unique {
            *df.entry(tok).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = df.into_iter().collect();
    ranked.sort_by(|(wa, fa), (wb, fb)| fb.cmp(fa).then_with(|| wa.cmp(wb)));
    ranked
        .into_iter()
        .take(max_features)
        .map(|(w, _)| w.to_string())
        .collect()
}

/// Vetor de tokens sobre o vocabulário
pub fn vectorize(tokens: &[String], vocab: &[String], mode: FeatureMode) -> Vec<f64> {
    let index: HashMap<&str, usize> = vocab
        .iter()
        .enumerate()
        .map(|(i, w)| (w.as_str(), i))
        .collect();

    let mut vec = vec![0.0; vocab.len()];
    for tok in tokens {
        if let Some(&j) = index.get(tok.as_str()) {
            match mode {
                FeatureMode::Bin => vec[j] = 1.0,
                FeatureMode::Tf => vec[j] += 1.0,
            }
        }
    }

    if mode == FeatureMode::Tf {
        let sum: f64 = vec.iter().sum();
        if sum > 0.0 {
            vec.iter_mut().for_each(|v| *v /= sum);
        }
    }
    vec
}

/// Converte dois textos em vetores de mesmo comprimento
pub fn text_to_vectors(
    a_text: &str,
    b_text: &str,
    mode: FeatureMode,
    max_features: usize,
) -> (Vec<f64>, Vec<f64>) {
    let a_tokens = tokenize(a_text);
    let b_tokens = tokenize(b_text);
    let vocab = build_vocab(&a_tokens, &b_tokens, max_features);
    (
        vectorize(&a_tokens, &vocab, mode),
        vectorize(&b_tokens, &vocab, mode),
    )
}
