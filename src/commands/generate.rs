use crate::config::ImporterConfig;
use crate::context::Context;
use crate::error::GenerateError;
use crate::iac::{IacExecutor, TerraformExecutor};
use crate::import::{WorkspaceGuard, WorkspacePaths, read_resource_id};
use crate::tfvars::{GeneratedConfigParser, InstanceConfig, TfvarsRenderer};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub path: String,
    pub config: Option<String>,
    pub binary: Option<String>,
    pub import_file: Option<String>,
}

/// Handles the tfvars generation run
pub struct GenerateCommand;

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(ctx: &Context, options: &GenerateOptions) -> Result<()> {
        let workspace = Path::new(&options.path);
        let config = Self::load_config(ctx, workspace, options)?;
        let paths = WorkspacePaths::resolve(workspace, &config);

        tracing::debug!(?paths, binary = %config.binary, "resolved workspace");

        let resource_id = read_resource_id(ctx.fs.as_ref(), &paths.import_file)?;
        ctx.output.info(&format!("Found Resource ID: {}", resource_id));

        if ctx.fs.exists(&paths.generated_config_file) {
            return Err(GenerateError::StaleGeneratedConfig(paths.generated_config_file).into());
        }

        ctx.output.info(&format!(
            "Creating temporary import target: {}...",
            config.placeholder_address
        ));
        let mut guard = WorkspaceGuard::install(
            ctx.fs.as_ref(),
            &paths,
            &resource_id,
            &config.placeholder_address,
        )?;

        let result = Self::generate_instance(ctx, &config, &paths, &resource_id);

        let report = guard.restore();
        if report.is_complete() {
            ctx.output.dimmed(&report.to_string());
        } else {
            ctx.output.warning(&report.to_string());
        }

        let instance = result?;
        Self::print_entry(ctx, &config, &instance);

        Ok(())
    }

    fn load_config(
        ctx: &Context,
        workspace: &Path,
        options: &GenerateOptions,
    ) -> Result<ImporterConfig> {
        let mut config =
            ImporterConfig::load(ctx.fs.as_ref(), workspace, options.config.as_deref())?;

        if let Some(binary) = &options.binary {
            config.binary = binary.clone();
        }
        if let Some(import_file) = &options.import_file {
            config.import_file = import_file.clone();
        }

        Ok(config)
    }

    /// Run the planner and scrape what it generated
    fn generate_instance(
        ctx: &Context,
        config: &ImporterConfig,
        paths: &WorkspacePaths,
        resource_id: &str,
    ) -> Result<InstanceConfig> {
        let executor = TerraformExecutor::new(&config.binary, Arc::clone(&ctx.command));
        let command = executor.generate_config_command(&config.generated_config_file);

        ctx.output.info(&format!(
            "Running {} plan to generate configuration (this may take a minute)...",
            executor.get_name()
        ));

        let output = executor
            .generate_config(&paths.root, &config.generated_config_file)
            .map_err(|e| GenerateError::ExecutorUnavailable {
                command: command.clone(),
                message: format!("{:#}", e),
            })?;

        if ctx.is_interrupted() {
            return Err(GenerateError::Interrupted.into());
        }

        // Exit status is ignored: plan exits nonzero on pending changes too
        if !ctx.fs.exists(&paths.generated_config_file) {
            return Err(GenerateError::ConfigNotGenerated {
                command,
                output_file: paths.generated_config_file.clone(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        ctx.output.success(&format!(
            "Successfully generated {}",
            config.generated_config_file
        ));

        let content = ctx.fs.read_to_string(&paths.generated_config_file)?;
        let instance = GeneratedConfigParser::new().parse(&content, resource_id);
        tracing::debug!(
            resource_id = %instance.resource_id,
            name = %instance.name,
            zone = %instance.zone,
            "parsed generated configuration"
        );

        Ok(instance)
    }

    fn print_entry(ctx: &Context, config: &ImporterConfig, instance: &InstanceConfig) {
        let renderer = TfvarsRenderer::new(config);

        if instance.name.is_empty() {
            ctx.output
                .warning("No instance name found in generated configuration; fill it in manually");
        }

        ctx.output.blank();
        ctx.output.separator();
        ctx.output.plain("GENERATED TFVARS ENTRY");
        ctx.output.separator();
        ctx.output.blank();
        ctx.output.plain(&renderer.render(instance));
        ctx.output.blank();
        ctx.output.separator();
        ctx.output.plain(&renderer.instructions());
    }
}
