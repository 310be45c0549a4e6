//! Front-matter error types.

use crate::metadata::MetaKey;

/// Reasons a front-matter block is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontMatterError {
    /// Document does not start with a `---` line.
    #[error("document does not start with a `---` front-matter delimiter")]
    MissingOpening,
    /// Opening delimiter is never closed.
    #[error("front-matter block is not terminated by a `---` line")]
    Unterminated,
    /// Block is not valid YAML.
    #[error("invalid YAML: {0}")]
    InvalidYaml(String),
    /// Block is valid YAML but not a key/value mapping.
    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
    /// A key is not a plain string.
    #[error("front-matter keys must be strings")]
    NonStringKey,
    /// A value is a nested mapping or a nested list.
    #[error("unsupported value for `{0}`: expected a string or a list of strings")]
    UnsupportedValue(String),
    /// A known key holds a list where a single string is expected.
    #[error("`{0}` must be a single string, not a list")]
    ExpectedScalar(MetaKey),
    /// One or more required keys are missing or empty.
    #[error("{}", missing_keys_message(.0))]
    MissingKeys(Vec<MetaKey>),
}

fn missing_keys_message(keys: &[MetaKey]) -> String {
    let noun = if keys.len() == 1 { "key" } else { "keys" };
    let names = keys
        .iter()
        .map(|k| format!("`{k}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("missing required {noun}: {names}")
}
