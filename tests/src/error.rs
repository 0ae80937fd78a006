//! Error types for the scenario framework.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a cases file.
    #[error("failed to parse cases file '{path}': {message}")]
    CasesParse { path: PathBuf, message: String },

    /// Failed to build a session from schema and configuration.
    #[error("failed to build session from '{path}': {message}")]
    SessionBuild { path: PathBuf, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Step not found in cases file.
    #[error("step '{step}' not found in cases file")]
    StepNotFound { step: String },

    /// Missing schema.
    #[error("schema not specified for scenario '{scenario}'")]
    MissingSchema { scenario: String },

    /// Missing configuration.
    #[error("configuration not specified for scenario '{scenario}'")]
    MissingConfig { scenario: String },

    /// Missing cases file.
    #[error("cases not specified for scenario '{scenario}'")]
    MissingCases { scenario: String },
}

impl ScenarioError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn cases_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CasesParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn session_build(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SessionBuild {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_schema(scenario: impl Into<String>) -> Self {
        Self::MissingSchema {
            scenario: scenario.into(),
        }
    }

    pub fn missing_config(scenario: impl Into<String>) -> Self {
        Self::MissingConfig {
            scenario: scenario.into(),
        }
    }

    pub fn missing_cases(scenario: impl Into<String>) -> Self {
        Self::MissingCases {
            scenario: scenario.into(),
        }
    }
}
