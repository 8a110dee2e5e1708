use super::executor::IacExecutor;
use crate::traits::CommandExecutor;
use anyhow::Result;
use std::path::Path;
use std::process::Output;
use std::sync::Arc;

/// Executor for Terraform and CLI-compatible forks such as OpenTofu
pub struct TerraformExecutor {
    binary: String,
    command: Arc<dyn CommandExecutor>,
}

impl TerraformExecutor {
    pub fn new(binary: impl Into<String>, command: Arc<dyn CommandExecutor>) -> Self {
        Self {
            binary: binary.into(),
            command,
        }
    }

    fn generate_config_args(output_file: &str) -> Vec<String> {
        vec![
            "plan".to_string(),
            format!("-generate-config-out={}", output_file),
        ]
    }
}

impl IacExecutor for TerraformExecutor {
    fn generate_config(&self, working_dir: &Path, output_file: &str) -> Result<Output> {
        let args = Self::generate_config_args(output_file);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        tracing::debug!(
            command = %self.generate_config_command(output_file),
            working_dir = %working_dir.display(),
            "running planner"
        );

        let output = self.command.execute(&self.binary, &args, working_dir)?;

        tracing::debug!(
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "planner finished"
        );

        Ok(output)
    }

    fn generate_config_command(&self, output_file: &str) -> String {
        format!(
            "{} {}",
            self.binary,
            Self::generate_config_args(output_file).join(" ")
        )
    }

    fn get_name(&self) -> &str {
        &self.binary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockCommandExecutor, MockCommandResult};
    use std::path::PathBuf;

    #[test]
    fn test_generate_config_invocation() {
        let mock = Arc::new(MockCommandExecutor::new());
        let executor = TerraformExecutor::new("terraform", mock.clone());

        executor
            .generate_config(Path::new("/ws"), "generated.tf")
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "terraform");
        assert_eq!(
            calls[0].1,
            vec!["plan".to_string(), "-generate-config-out=generated.tf".to_string()]
        );
        assert_eq!(calls[0].2, PathBuf::from("/ws"));
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let mock = Arc::new(MockCommandExecutor::with_outputs(vec![MockCommandResult {
            command: "tofu".to_string(),
            exit_code: 1,
            stderr: "Error: something".to_string(),
            ..Default::default()
        }]));
        let executor = TerraformExecutor::new("tofu", mock);

        let output = executor
            .generate_config(Path::new("."), "generated.tf")
            .unwrap();
        assert!(!output.status.success());
    }

    #[test]
    fn test_command_line() {
        let executor = TerraformExecutor::new("tofu", Arc::new(MockCommandExecutor::new()));
        assert_eq!(executor.get_name(), "tofu");
        assert_eq!(
            executor.generate_config_command("out.tf"),
            "tofu plan -generate-config-out=out.tf"
        );
    }
}
