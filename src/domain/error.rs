use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Assertion failed: {message} (expected: {expected}, actual: {actual})")]
    Assertion {
        message: String,
        expected: String,
        actual: String,
    },
    #[error("Deserialization error: body is not a valid {target}: {source}")]
    Deserialization {
        target: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Extraction error: no value at path '{0}'")]
    MissingPath(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SuiteError {
    pub fn assertion(message: impl Into<String>, expected: impl Debug, actual: impl Debug) -> Self {
        SuiteError::Assertion {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }

    pub fn deserialization<T>(source: serde_json::Error) -> Self {
        SuiteError::Deserialization {
            target: std::any::type_name::<T>().to_string(),
            source,
        }
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, SuiteError::Assertion { .. })
    }
}

pub type SuiteResult<T> = Result<T, SuiteError>;
