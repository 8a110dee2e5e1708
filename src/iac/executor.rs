use anyhow::Result;
use std::path::Path;
use std::process::Output;

/// Trait for Infrastructure as Code executors (Terraform, OpenTofu, etc.)
pub trait IacExecutor {
    /// Run a plan that writes configuration for every pending import to `output_file`
    ///
    /// Output is captured, not streamed. The exit status says nothing about
    /// whether the file was written; callers check for the file instead.
    fn generate_config(&self, working_dir: &Path, output_file: &str) -> Result<Output>;

    /// Human-readable command line of [`IacExecutor::generate_config`]
    fn generate_config_command(&self, output_file: &str) -> String;

    /// Get the binary this executor runs (e.g., "terraform", "tofu")
    fn get_name(&self) -> &str;
}
