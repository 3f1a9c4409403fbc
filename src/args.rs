use std::collections::HashMap;

use crate::error::{ImageFxError, Result};

/// Flat `--key value` option mapping built from the raw argument list.
///
/// Keys are stored with the leading double-dash stripped; values are kept
/// verbatim. Unrecognized keys are stored but never looked up.
#[derive(Debug, Default, Clone)]
pub struct Options {
    values: HashMap<String, String>,
}

impl Options {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a required option, failing with the flag name if absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| ImageFxError::MissingArgument(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Pair up consecutive arguments into an [`Options`] mapping.
///
/// Walks the sequence two elements at a time; a trailing unpaired argument
/// is silently dropped. No validation is performed on key names.
pub fn collect<I>(args: I) -> Options
where
    I: IntoIterator<Item = String>,
{
    let mut values = HashMap::new();
    let mut args = args.into_iter();

    while let (Some(key), Some(value)) = (args.next(), args.next()) {
        let key = key.strip_prefix("--").unwrap_or(&key).to_string();
        values.insert(key, value);
    }

    Options { values }
}
