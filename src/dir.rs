//! Scoped changes to the process working directory.
//!
//! The working directory is process-wide and always present, so these
//! helpers hand out drop guards rather than taking closures: the guard
//! records the directory at construction and changes back to it when
//! dropped. Not thread-safe: the working directory is shared by every
//! thread in the process, and nothing here synchronizes access to it.

use crate::error::Error;
use std::env;
use std::path::{Path, PathBuf};

/// Restores the recorded working directory on drop.
///
/// Drop cannot propagate errors; if the recorded directory can no longer
/// be entered the failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct DirGuard {
    orig: PathBuf,
}

impl DirGuard {
    /// The directory that will be restored on drop.
    pub fn original(&self) -> &Path {
        &self.orig
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.orig) {
            log::error!(
                "failed to restore working directory to {}: {e}",
                self.orig.display()
            );
        }
    }
}

/// Change the working directory to `path` until the returned guard drops.
///
/// If querying the current directory or changing to `path` fails, the
/// error is returned and no guard is created, so nothing is restored.
pub fn changed<P: AsRef<Path>>(path: P) -> Result<DirGuard, Error> {
    let orig = current()?;
    let path = path.as_ref();
    env::set_current_dir(path)
        .map_err(|e| Error::ChangeDir(format!("{}: {e}", path.display())))?;
    log::trace!("changed working directory to {}", path.display());
    Ok(DirGuard { orig })
}

/// Record the current working directory and change back to it when the
/// returned guard drops, whatever the scope did in between.
pub fn rollback() -> Result<DirGuard, Error> {
    Ok(DirGuard { orig: current()? })
}

fn current() -> Result<PathBuf, Error> {
    env::current_dir().map_err(|e| Error::CurrentDir(e.to_string()))
}
