use std::fmt;
use std::path::PathBuf;

/// Error kinds of the tfvars generation pipeline
#[derive(Debug)]
pub enum GenerateError {
    /// The import declaration file does not exist
    ImportFileNotFound(PathBuf),

    /// The import declaration file has no `id = "..."` assignment
    ResourceIdNotFound(PathBuf),

    /// The planner did not produce the generated configuration file
    ConfigNotGenerated {
        command: String,
        output_file: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The planner binary could not be started
    ExecutorUnavailable { command: String, message: String },

    /// The user interrupted the run while the planner was executing
    Interrupted,

    /// A generated configuration file from an earlier run is in the way
    StaleGeneratedConfig(PathBuf),

    /// Configuration file parsing error
    ConfigParse(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ImportFileNotFound(path) => {
                write!(f, "{} not found.", path.display())
            }
            GenerateError::ResourceIdNotFound(path) => {
                write!(f, "Could not find 'id' in {}", path.display())
            }
            GenerateError::ConfigNotGenerated {
                command,
                output_file,
                exit_code,
                ..
            } => {
                write!(
                    f,
                    "'{}' failed to generate configuration {}",
                    command,
                    output_file.display()
                )?;

                if let Some(code) = exit_code {
                    write!(f, " (exit code {})", code)?;
                }

                Ok(())
            }
            GenerateError::ExecutorUnavailable { command, message } => {
                write!(f, "Failed to run '{}': {}", command, message)
            }
            GenerateError::Interrupted => {
                write!(f, "Interrupted before configuration was generated")
            }
            GenerateError::StaleGeneratedConfig(path) => {
                write!(
                    f,
                    "{} already exists; inspect or remove it before generating again",
                    path.display()
                )
            }
            GenerateError::ConfigParse(msg) => {
                write!(f, "Failed to parse configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<serde_yaml::Error> for GenerateError {
    fn from(err: serde_yaml::Error) -> Self {
        GenerateError::ConfigParse(err.to_string())
    }
}
