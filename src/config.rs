//! Where submissions go and how strict the document rule is.

use crate::error::ConfigError;
use crate::form::FormSchemaOptions;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUBMIT_PATH: &str = "/api/form/submitForm";

const API_URL_VAR: &str = "PAPERWORK_API_URL";
const SUBMIT_PATH_VAR: &str = "PAPERWORK_SUBMIT_PATH";
const MIN_DOCUMENTS_VAR: &str = "PAPERWORK_MIN_DOCUMENTS";

/// Submission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    pub base_url: String,
    pub submit_path: String,
    pub min_documents: usize,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            submit_path: DEFAULT_SUBMIT_PATH.to_string(),
            min_documents: 1,
        }
    }
}

impl SubmitConfig {
    /// Targets `base_url` with the default path.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `PAPERWORK_API_URL`, `PAPERWORK_SUBMIT_PATH` and
    /// `PAPERWORK_MIN_DOCUMENTS`, keeping the default for each one unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup(API_URL_VAR).unwrap_or(defaults.base_url);
        let submit_path = lookup(SUBMIT_PATH_VAR).unwrap_or(defaults.submit_path);
        let min_documents = match lookup(MIN_DOCUMENTS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidVar {
                name: MIN_DOCUMENTS_VAR,
                value: raw.clone(),
                reason: "expected a non-negative integer",
            })?,
            None => defaults.min_documents,
        };

        Ok(Self {
            base_url,
            submit_path,
            min_documents,
        })
    }

    pub fn with_submit_path(mut self, path: impl Into<String>) -> Self {
        self.submit_path = path.into();
        self
    }

    pub fn with_min_documents(mut self, min: usize) -> Self {
        self.min_documents = min;
        self
    }

    /// Base URL and path joined by exactly one `/`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.submit_path.trim_start_matches('/')
        )
    }

    /// Rule options derived from these settings.
    pub fn schema_options(&self) -> FormSchemaOptions {
        FormSchemaOptions {
            min_documents: self.min_documents,
            ..FormSchemaOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SubmitConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SubmitConfig::default());
        assert_eq!(config.endpoint(), "http://localhost:8000/api/form/submitForm");
    }

    #[test]
    fn test_overrides() {
        let config = SubmitConfig::from_lookup(lookup(&[
            ("PAPERWORK_API_URL", "https://forms.example.com/"),
            ("PAPERWORK_SUBMIT_PATH", "v2/submit"),
            ("PAPERWORK_MIN_DOCUMENTS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint(), "https://forms.example.com/v2/submit");
        assert_eq!(config.schema_options().min_documents, 2);
    }

    #[test]
    fn test_invalid_min_documents() {
        let err = SubmitConfig::from_lookup(lookup(&[("PAPERWORK_MIN_DOCUMENTS", "two")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar { name: "PAPERWORK_MIN_DOCUMENTS", .. }
        ));
    }

    #[test]
    fn test_endpoint_slashes() {
        let config = SubmitConfig::new("http://a//").with_submit_path("//b");
        assert_eq!(config.endpoint(), "http://a/b");
    }
}
