//! Workspace guard for the temporary import
//!
//! Swaps the user's import declaration for the placeholder import and puts
//! everything back exactly once, either explicitly or when the guard drops.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::render_temp_import;
use crate::config::ImporterConfig;
use crate::traits::FileSystem;

/// Absolute locations of every file the run touches
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub import_file: PathBuf,
    pub backup_file: PathBuf,
    pub temp_import_file: PathBuf,
    pub generated_config_file: PathBuf,
}

impl WorkspacePaths {
    pub fn resolve(root: &Path, config: &ImporterConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            import_file: root.join(&config.import_file),
            backup_file: root.join(config.backup_file()),
            temp_import_file: root.join(&config.temp_import_file),
            generated_config_file: root.join(&config.generated_config_file),
        }
    }
}

/// Holds the workspace in its modified state until restored
pub struct WorkspaceGuard<'a> {
    fs: &'a dyn FileSystem,
    import_file: PathBuf,
    backup_file: PathBuf,
    temp_import_file: PathBuf,
    restored: bool,
}

impl<'a> WorkspaceGuard<'a> {
    /// Move the import file to its backup and write the temporary import
    ///
    /// If the backup move fails nothing has changed and no guard is returned.
    /// Any later failure is undone by the guard's drop.
    pub fn install(
        fs: &'a dyn FileSystem,
        paths: &WorkspacePaths,
        resource_id: &str,
        placeholder_address: &str,
    ) -> Result<Self> {
        if fs.exists(&paths.backup_file) {
            tracing::warn!(
                path = %paths.backup_file.display(),
                "overwriting stale backup from a previous run"
            );
        }

        fs.rename(&paths.import_file, &paths.backup_file)?;
        tracing::debug!(
            from = %paths.import_file.display(),
            to = %paths.backup_file.display(),
            "backed up import file"
        );

        let guard = Self {
            fs,
            import_file: paths.import_file.clone(),
            backup_file: paths.backup_file.clone(),
            temp_import_file: paths.temp_import_file.clone(),
            restored: false,
        };

        fs.write(
            &paths.temp_import_file,
            &render_temp_import(resource_id, placeholder_address),
        )?;
        tracing::debug!(path = %paths.temp_import_file.display(), "wrote temporary import");

        Ok(guard)
    }

    /// Remove the temporary import and move the backup back into place
    ///
    /// Only the first call does any work; later calls return an empty report.
    pub fn restore(&mut self) -> RestoreReport {
        let mut report = RestoreReport::default();

        if self.restored {
            return report;
        }
        self.restored = true;

        if self.fs.exists(&self.temp_import_file) {
            match self.fs.remove_file(&self.temp_import_file) {
                Ok(()) => report.temp_removed = true,
                Err(e) => report.failures.push(format!("{:#}", e)),
            }
        }

        if self.fs.exists(&self.backup_file) {
            match self.fs.rename(&self.backup_file, &self.import_file) {
                Ok(()) => report.import_restored = true,
                Err(e) => report.failures.push(format!("{:#}", e)),
            }
        }

        tracing::debug!(
            temp_removed = report.temp_removed,
            import_restored = report.import_restored,
            failures = report.failures.len(),
            "workspace restored"
        );

        report
    }
}

impl Drop for WorkspaceGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }

        let report = self.restore();
        for failure in &report.failures {
            tracing::warn!(error = %failure, "cleanup failed");
        }
    }
}

/// Result of a restore
#[derive(Debug, Default, PartialEq)]
pub struct RestoreReport {
    pub temp_removed: bool,
    pub import_restored: bool,
    pub failures: Vec<String>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for RestoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_complete() {
            write!(
                f,
                "Cleanup complete: temporary import {}, original import {}",
                if self.temp_removed { "removed" } else { "absent" },
                if self.import_restored { "restored" } else { "untouched" }
            )
        } else {
            write!(f, "Cleanup incomplete: {}", self.failures.join("; "))
        }
    }
}
