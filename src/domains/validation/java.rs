//! Live validator backed by the HL7 `validator_cli.jar`.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use super::error::ValidationError;
use super::validator::{ResourceValidator, ValidationReport, ValidationRequest};
use crate::core::config::ValidatorConfig;

/// Runs `java -jar validator_cli.jar` once per request.
#[derive(Debug, Clone)]
pub struct JavaValidator {
    config: ValidatorConfig,
}

impl JavaValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Stage the resource in a uniquely named `.json` file.
    ///
    /// The file is removed when the returned handle is dropped.
    fn stage_resource(resource: &str) -> Result<tempfile::NamedTempFile, ValidationError> {
        let mut file = tempfile::Builder::new()
            .prefix("resource-")
            .suffix(".json")
            .tempfile()
            .map_err(ValidationError::TempFile)?;

        file.write_all(resource.as_bytes())
            .and_then(|_| file.flush())
            .map_err(ValidationError::TempFile)?;

        Ok(file)
    }
}

#[async_trait::async_trait]
impl ResourceValidator for JavaValidator {
    #[instrument(skip_all, fields(fhir_version = %request.fhir_version, snomed = %request.snomed_edition))]
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationReport, ValidationError> {
        if !self.config.jar_path.is_file() {
            warn!("Validator jar missing: {}", self.config.jar_path.display());
            return Err(ValidationError::MissingValidator(self.config.jar_path.clone()));
        }

        let staged = Self::stage_resource(&request.resource)?;
        debug!("Resource staged at {}", staged.path().display());

        let mut command = Command::new(&self.config.java_path);
        command
            .arg("-jar")
            .arg(&self.config.jar_path)
            .arg("-tx")
            .arg(&self.config.tx_server)
            .arg("-sct")
            .arg(request.snomed_edition.as_str())
            .arg("-version")
            .arg(request.fhir_version.as_str())
            .arg(staged.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        info!("Running FHIR validator");

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| ValidationError::Timeout(self.config.timeout_secs))?
            .map_err(ValidationError::Spawn)?;

        // Exit status 1 means the resource has validation errors.
        if !matches!(output.status.code(), Some(0) | Some(1)) {
            warn!("Validator exited with {}", output.status);
            return Err(ValidationError::exit_status(output.status, &output.stderr));
        }

        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr)
        } else {
            String::from_utf8_lossy(&output.stdout)
        };

        if text.is_empty() {
            return Err(ValidationError::NoOutput);
        }

        let report = ValidationReport::from_output(&text);
        info!("Validation finished with {} issue line(s)", report.issues.len());

        Ok(report)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domains::validation::{FhirVersion, SnomedEdition};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn request() -> ValidationRequest {
        ValidationRequest {
            resource: "{\"resourceType\": \"Patient\"}".to_string(),
            fhir_version: FhirVersion::R4,
            snomed_edition: SnomedEdition::Au,
        }
    }

    /// A config whose "jar" exists and whose "java" is `java_path`.
    fn config_with(java_path: &str, dir: &TempDir) -> ValidatorConfig {
        let jar_path = dir.path().join("validator_cli.jar");
        std::fs::write(&jar_path, b"").unwrap();
        ValidatorConfig {
            java_path: PathBuf::from(java_path),
            jar_path,
            ..ValidatorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_jar() {
        let validator = JavaValidator::new(ValidatorConfig {
            jar_path: PathBuf::from("/nonexistent/validator_cli.jar"),
            ..ValidatorConfig::default()
        });
        let err = validator.validate(&request()).await.unwrap_err();
        assert!(matches!(err, ValidationError::MissingValidator(_)));
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let validator = JavaValidator::new(config_with("/nonexistent/bin/java", &dir));
        let err = validator.validate(&request()).await.unwrap_err();
        assert!(matches!(err, ValidationError::Spawn(_)));
    }

    #[tokio::test]
    async fn test_exit_one_without_output() {
        // `false` exits with status 1 and prints nothing
        let dir = TempDir::new().unwrap();
        let validator = JavaValidator::new(config_with("false", &dir));
        let err = validator.validate(&request()).await.unwrap_err();
        assert!(matches!(err, ValidationError::NoOutput));
    }

    /// Write an executable shell script standing in for `java`.
    fn fake_java(dir: &TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("java");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_echo_output_has_no_issues() {
        // `echo` prints its arguments on one line that starts with "-jar"
        let dir = TempDir::new().unwrap();
        let validator = JavaValidator::new(config_with("echo", &dir));
        let report = validator.validate(&request()).await.unwrap();
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_command_line_arguments() {
        let dir = TempDir::new().unwrap();
        let java = fake_java(&dir, r#"printf 'Error: %s\n' "$*"
printf 'Warning: %s\n' "$(cat "$9")""#);
        let config = config_with(&java, &dir);
        let jar = config.jar_path.to_string_lossy().into_owned();
        let validator = JavaValidator::new(config);

        let request = ValidationRequest {
            fhir_version: FhirVersion::R4B,
            ..request()
        };
        let report = validator.validate(&request).await.unwrap();
        assert_eq!(report.issues.len(), 2);

        let args: Vec<&str> = report.issues[0]
            .trim_start_matches("Error: ")
            .split_whitespace()
            .collect();
        assert_eq!(
            &args[..8],
            &[
                "-jar",
                jar.as_str(),
                "-tx",
                "https://tx.ontoserver.csiro.au/fhir",
                "-sct",
                "au",
                "-version",
                "4.3.0",
            ]
        );
        assert_eq!(args.len(), 9);
        assert!(args[8].ends_with(".json"));

        // The staged file holds the resource text
        assert_eq!(report.issues[1], "Warning: {\"resourceType\": \"Patient\"}");
        assert!(report.has_errors());
    }

    #[tokio::test]
    async fn test_falls_back_to_stderr() {
        let dir = TempDir::new().unwrap();
        let java = fake_java(&dir, "echo 'Warning: on stderr' >&2");
        let validator = JavaValidator::new(config_with(&java, &dir));
        let report = validator.validate(&request()).await.unwrap();
        assert_eq!(report.issues, vec!["Warning: on stderr".to_string()]);
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn test_exit_one_with_errors_is_a_report() {
        let dir = TempDir::new().unwrap();
        let java = fake_java(&dir, "echo '  Error: bad resource'; exit 1");
        let validator = JavaValidator::new(config_with(&java, &dir));
        let report = validator.validate(&request()).await.unwrap();
        assert_eq!(report.issues, vec!["Error: bad resource".to_string()]);
    }

    #[tokio::test]
    async fn test_exit_two_is_an_error() {
        let dir = TempDir::new().unwrap();
        let java = fake_java(&dir, "echo 'Error: ignored'; echo boom >&2; exit 2");
        let validator = JavaValidator::new(config_with(&java, &dir));
        let err = validator.validate(&request()).await.unwrap_err();
        match &err {
            ValidationError::ExitStatus { code, stderr } => {
                assert_eq!(code, "2");
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "Validator exited with status 2: boom");
    }

    #[tokio::test]
    async fn test_timeout() {
        let dir = TempDir::new().unwrap();
        let java = fake_java(&dir, "sleep 5");
        let validator = JavaValidator::new(ValidatorConfig {
            timeout_secs: 1,
            ..config_with(&java, &dir)
        });
        let err = validator.validate(&request()).await.unwrap_err();
        assert!(matches!(err, ValidationError::Timeout(1)));
        assert_eq!(err.to_string(), "Validator timed out after 1 seconds");
    }

    #[test]
    fn test_staged_file_is_removed_on_drop() {
        let staged = JavaValidator::stage_resource("{}").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        drop(staged);
        assert!(!path.exists());
    }
}
