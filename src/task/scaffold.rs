//! Solution file scaffolding

use crate::error::{Error, Result};
use crate::task::{BUILD_DESCRIPTOR, TaskResolver};
use crate::types::{Task, TaskKind};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Create the solution file for `task` unless it already exists
///
/// Returns the path of the newly created file, or `None` when a solution was
/// already on disk. A practical task gets a copy of its template (or an empty
/// file when `use_template` is false); a theoretical task always gets an
/// empty markdown file.
pub fn scaffold_solution(
    resolver: &TaskResolver,
    task: &Task,
    use_template: bool,
    template: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let solution = resolver.solution_path(task);
    if solution.exists() {
        debug!("{} already exists, leaving it untouched", solution.display());
        return Ok(None);
    }

    match task.kind {
        TaskKind::Theoretical => {
            info!("{}/{BUILD_DESCRIPTOR} not found. Assuming theoretical task", task.name);
            create_empty(&solution)?;
        }
        TaskKind::Practical if !use_template => create_empty(&solution)?,
        TaskKind::Practical => {
            let template = resolver.template_path(task, template);
            if !template.is_file() {
                return Err(Error::TemplateNotFound {
                    task: task.name.clone(),
                    template,
                });
            }
            ensure_parent(&solution)?;
            fs::copy(&template, &solution)?;
            info!("Copied {} to {}", template.display(), solution.display());
        }
    }

    Ok(Some(solution))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn create_empty(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    File::create(path)?;
    info!("Created empty {}", path.display());
    Ok(())
}
