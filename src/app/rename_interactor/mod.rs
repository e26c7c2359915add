// Rename interactor - Applies one rename operation to every file of a batch

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::batch::{collect_files, run_each, BatchReport};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RenameOperation;
use crate::error::FfrResult;
use crate::ports::*;

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The file was moved to its new name
    Renamed,
    /// Dry run: the new name was only reported
    Previewed,
    /// The new name equals the old one
    Unchanged,
    /// The new name is taken and overwrite is not forced
    SkippedExisting,
}

/// Plan and outcome for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    pub plan: RenamePlan,
    pub outcome: RenameOutcome,
}

/// Interactor for the rename commands
pub struct RenameInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl RenameInteractor {
    /// Create new rename interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Run `operation` over `paths`.
    ///
    /// Only file collection can fail the whole batch; per-file errors end up in the report.
    pub fn execute(
        &self,
        operation: &RenameOperation,
        paths: &[PathBuf],
        options: RenameOptions,
    ) -> FfrResult<BatchReport<RenameReport>> {
        let mut files = collect_files(self.fs_port.as_ref(), paths, false)?;
        if options.backwards {
            files.reverse();
        }

        self.log_port.debug(&format!(
            "{} over {} file(s)",
            operation.name(),
            files.len()
        ));

        Ok(run_each(self.log_port.as_ref(), &files, |path| {
            self.rename_file(operation, &RenameRequest::new(path, options))
        }))
    }

    /// Compute the new name of one file and apply it
    pub fn rename_file(
        &self,
        operation: &RenameOperation,
        request: &RenameRequest,
    ) -> Result<RenameReport, DomainError> {
        let resolved;
        let operation = if operation.needs_probe() {
            let dimensions = self.probe_port.dimensions(&request.target)?;
            self.log_port.debug(&format!("dimensions: {}", dimensions));
            resolved = operation.with_dimensions(&dimensions);
            &resolved
        } else {
            operation
        };

        let new_name = operation.apply(request.file_name()?)?;
        let plan = RenamePlan::new(
            request.target.clone(),
            request.sibling(&new_name),
            request.options.dry_run,
        );
        let outcome = self.safe_rename(&plan, &request.options)?;

        Ok(RenameReport { plan, outcome })
    }

    fn safe_rename(
        &self,
        plan: &RenamePlan,
        options: &RenameOptions,
    ) -> Result<RenameOutcome, DomainError> {
        if plan.is_noop() {
            self.log_port.info(&format!(
                "no file name change: {:?}",
                plan.old_path.display().to_string()
            ));
            return Ok(RenameOutcome::Unchanged);
        }

        if !plan.apply {
            self.log_port.info(&plan.to_string());
            return Ok(RenameOutcome::Previewed);
        }

        if self.fs_port.exists(&plan.new_path) {
            if !options.force_overwrite {
                self.log_port.info(&format!(
                    "file already exists: {:?}",
                    plan.new_path.display().to_string()
                ));
                return Ok(RenameOutcome::SkippedExisting);
            }
            self.log_port.info(&format!(
                "force overwrite: {:?}",
                plan.new_path.display().to_string()
            ));
        }

        self.fs_port.rename(&plan.old_path, &plan.new_path)?;
        self.log_port.info(&plan.to_string());
        Ok(RenameOutcome::Renamed)
    }
}
