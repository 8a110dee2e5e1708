mod commands;
mod config;
mod context;
mod error;
mod iac;
mod import;
mod output;
mod tfvars;
mod traits;

use clap::Parser;
use commands::{GenerateCommand, GenerateOptions};
use context::Context;
use error::GenerateError;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "generate-tfvars")]
#[command(
    about = "Generate a compute.auto.tfvars entry for an existing instance declared in import.tf",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the Terraform workspace (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    path: String,

    /// Configuration file (defaults to <path>/.tfvars-import.yaml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Terraform-compatible binary to run (terraform, tofu, ...)
    #[arg(short, long, env = "TFVARS_IMPORT_BINARY")]
    binary: Option<String>,

    /// Import declaration file name, relative to the workspace
    #[arg(short, long)]
    import_file: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,tfvars_importer=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new();

    let interrupted = Arc::clone(&ctx.interrupted);
    if let Err(err) = ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!(error = %err, "could not install interrupt handler");
    }

    let options = GenerateOptions {
        path: cli.path,
        config: cli.config,
        binary: cli.binary,
        import_file: cli.import_file,
    };

    match GenerateCommand::execute(&ctx, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&ctx, &err);
            ExitCode::FAILURE
        }
    }
}

/// Print the failure the way the user needs to see it
fn report_error(ctx: &Context, err: &anyhow::Error) {
    match err.downcast_ref::<GenerateError>() {
        Some(GenerateError::ImportFileNotFound(_)) => {
            ctx.output.error(&err.to_string());
            ctx.output
                .plain("Please create an import.tf file with your desired import target:");
            ctx.output
                .plain("import {\n  id = \"projects/...\"\n  to = module...\n}");
        }
        Some(GenerateError::ConfigNotGenerated { stderr, .. }) => {
            ctx.output.error(&err.to_string());
            if !stderr.trim().is_empty() {
                ctx.output.plain(stderr.trim_end());
            }
        }
        _ => {
            ctx.output.error(&format!("{:#}", err));
        }
    }
}
