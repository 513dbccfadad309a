//! Shared dependencies handed to every tool.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::Result;
use crate::domains::identifiers::{RandomDigitSource, ThreadRngDigitSource};
use crate::domains::terminology::{FhirTerminologyClient, TerminologyClient};
use crate::domains::validation::{JavaValidator, ResourceValidator};

/// Capabilities the tools run against.
///
/// Live servers use [`ToolContext::from_config`]; tests swap individual
/// capabilities with the `with_*` builders.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub digits: Arc<dyn RandomDigitSource>,
    pub validator: Arc<dyn ResourceValidator>,
    pub terminology: Arc<dyn TerminologyClient>,
}

impl ToolContext {
    /// Build the live context: thread RNG, Java validator, HTTP terminology client.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let terminology = FhirTerminologyClient::new(&config.terminology)?;

        Ok(Self {
            digits: Arc::new(ThreadRngDigitSource::new()),
            validator: Arc::new(JavaValidator::new(config.validator.clone())),
            terminology: Arc::new(terminology),
            config,
        })
    }

    pub fn with_digits(mut self, digits: Arc<dyn RandomDigitSource>) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ResourceValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_terminology(mut self, terminology: Arc<dyn TerminologyClient>) -> Self {
        self.terminology = terminology;
        self
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Test doubles for the external seams.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domains::identifiers::FixedDigitSource;
    use crate::domains::terminology::{ExpansionCoding, TerminologyError};
    use crate::domains::validation::{ValidationError, ValidationReport, ValidationRequest};
    use std::sync::Mutex;

    /// Validator that replays canned output and records requests.
    pub struct StubValidator {
        pub output: std::result::Result<String, fn() -> ValidationError>,
        pub requests: Mutex<Vec<ValidationRequest>>,
    }

    impl StubValidator {
        pub fn with_output(output: &str) -> Self {
            Self {
                output: Ok(output.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: fn() -> ValidationError) -> Self {
            Self {
                output: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ResourceValidator for StubValidator {
        async fn validate(
            &self,
            request: &ValidationRequest,
        ) -> std::result::Result<ValidationReport, ValidationError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.output {
                Ok(text) => Ok(ValidationReport::from_output(text)),
                Err(make) => Err(make()),
            }
        }
    }

    /// Terminology client returning a canned answer.
    pub struct StubTerminology {
        pub answer: std::result::Result<Option<ExpansionCoding>, fn() -> TerminologyError>,
    }

    impl StubTerminology {
        pub fn matching(code: &str, display: &str) -> Self {
            Self {
                answer: Ok(Some(serde_json::json!({
                    "system": "http://snomed.info/sct",
                    "code": code,
                    "display": display,
                }))),
            }
        }

        pub fn empty() -> Self {
            Self { answer: Ok(None) }
        }

        pub fn failing(error: fn() -> TerminologyError) -> Self {
            Self { answer: Err(error) }
        }
    }

    #[async_trait::async_trait]
    impl TerminologyClient for StubTerminology {
        async fn lookup_code(
            &self,
            _value_set_url: &str,
            _filter: &str,
        ) -> std::result::Result<Option<ExpansionCoding>, TerminologyError> {
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    /// Context with all-zero digits and no external services.
    pub fn test_context() -> ToolContext {
        ToolContext::from_config(Arc::new(Config::default()))
            .unwrap()
            .with_digits(Arc::new(FixedDigitSource::zeros()))
            .with_validator(Arc::new(StubValidator::with_output("")))
            .with_terminology(Arc::new(StubTerminology::empty()))
    }
}
