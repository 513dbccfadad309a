//! Validator seam: request/report types and the `ResourceValidator` trait.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// FHIR release to validate against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FhirVersion {
    /// R4
    #[default]
    #[serde(rename = "4.0.1")]
    R4,
    /// DSTU2
    #[serde(rename = "1.0.2")]
    Dstu2,
    /// STU3 Ballot 3 (Montreal), sometimes known as DSTU 2.1
    #[serde(rename = "1.4.0")]
    Dstu2_1,
    /// STU3, also known as R3
    #[serde(rename = "3.0.2")]
    Stu3,
    /// R4B Ballot 1
    #[serde(rename = "4.1.0")]
    R4BBallot,
    /// R4B
    #[serde(rename = "4.3.0")]
    R4B,
    /// R6 (current development build)
    #[serde(rename = "6.0.0")]
    R6,
}

impl FhirVersion {
    /// Version string passed to the validator's `-version` flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R4 => "4.0.1",
            Self::Dstu2 => "1.0.2",
            Self::Dstu2_1 => "1.4.0",
            Self::Stu3 => "3.0.2",
            Self::R4BBallot => "4.1.0",
            Self::R4B => "4.3.0",
            Self::R6 => "6.0.0",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SNOMED CT edition used during validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SnomedEdition {
    /// International
    #[default]
    Intl,
    /// United States
    Us,
    /// United Kingdom
    Uk,
    /// Australia
    Au,
    /// Netherlands
    Nl,
    /// Canada
    Ca,
    /// Sweden
    Se,
    /// Denmark
    Dk,
    /// Spain
    Es,
}

impl SnomedEdition {
    /// Edition code passed to the validator's `-sct` flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intl => "intl",
            Self::Us => "us",
            Self::Uk => "uk",
            Self::Au => "au",
            Self::Nl => "nl",
            Self::Ca => "ca",
            Self::Se => "se",
            Self::Dk => "dk",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for SnomedEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation request.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// The FHIR resource, as JSON text.
    pub resource: String,
    pub fhir_version: FhirVersion,
    pub snomed_edition: SnomedEdition,
}

/// Outcome of a completed validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Warning and error lines reported by the validator, in output order.
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// Build a report from raw validator output.
    pub fn from_output(output: &str) -> Self {
        Self {
            issues: filter_issue_lines(output),
        }
    }

    /// True when the validator reported neither warnings nor errors.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when at least one error line was reported.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|line| line.starts_with("Error"))
    }
}

/// Keep only the `Warning...` and `Error...` lines of validator output.
///
/// Leading whitespace is stripped before matching and is not kept.
pub fn filter_issue_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("Warning") || line.starts_with("Error"))
        .map(str::to_string)
        .collect()
}

/// Something that can validate FHIR resources.
#[async_trait::async_trait]
pub trait ResourceValidator: Send + Sync {
    /// Validate a resource and report its warnings and errors.
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationReport, ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_issue_lines() {
        let output = "Loading...\n  Warning: Something is off\nInformation: fine\n\tError: Fake error\nDone";
        assert_eq!(
            filter_issue_lines(output),
            vec!["Warning: Something is off", "Error: Fake error"]
        );
    }

    #[test]
    fn test_filter_issue_lines_crlf() {
        let output = "Warning @ Patient: x\r\nSuccess: 0 errors\r\n";
        assert_eq!(filter_issue_lines(output), vec!["Warning @ Patient: x"]);
    }

    #[test]
    fn test_report_flags() {
        let clean = ValidationReport::from_output("Success: 0 errors, 0 warnings");
        assert!(clean.is_clean());
        assert!(!clean.has_errors());

        let warnings = ValidationReport::from_output("Warning: a");
        assert!(!warnings.is_clean());
        assert!(!warnings.has_errors());

        let errors = ValidationReport::from_output("Warning: a\nError: b");
        assert!(errors.has_errors());
    }

    #[test]
    fn test_version_strings() {
        assert_eq!(FhirVersion::default().as_str(), "4.0.1");
        assert_eq!(SnomedEdition::default().as_str(), "intl");
        let v: FhirVersion = serde_json::from_str("\"4.3.0\"").unwrap();
        assert_eq!(v, FhirVersion::R4B);
        let e: SnomedEdition = serde_json::from_str("\"au\"").unwrap();
        assert_eq!(e, SnomedEdition::Au);
        assert!(serde_json::from_str::<FhirVersion>("\"5.0.0\"").is_err());
    }
}
