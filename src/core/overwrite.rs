//! Overwrite protection for the output path

use crate::{
    error::{Result, TransformerError},
    utils::{FileSystemUtils, Prompter},
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Replies that decline an overwrite; anything else, including nothing, accepts
pub const NEGATIVE_REPLIES: [&str; 2] = ["n", "no"];

/// What to do about the output path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Nothing exists at the path yet
    Fresh,
    /// A file exists and the user agreed to replace it
    Overwrite,
    /// A file exists and the user declined
    Cancel,
}

/// Question shown before replacing an existing file
#[must_use]
pub fn overwrite_question(path: &Path) -> String {
    format!("File {} already exists. Overwrite? (Y/n)", path.display())
}

/// Whether a reply to [`overwrite_question`] accepts the overwrite
#[must_use]
pub fn accepts_overwrite(reply: Option<&str>) -> bool {
    reply.is_none_or(|reply| {
        let reply = reply.trim();
        !NEGATIVE_REPLIES
            .iter()
            .any(|negative| reply.eq_ignore_ascii_case(negative))
    })
}

/// Asks before an existing output file is replaced
pub struct OverwriteGuard<'a, P: Prompter + ?Sized> {
    prompter: &'a P,
    fs_utils: FileSystemUtils,
}

impl<'a, P: Prompter + ?Sized> OverwriteGuard<'a, P> {
    /// Create a guard asking through `prompter`
    pub const fn new(prompter: &'a P) -> Self {
        Self {
            prompter,
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Decide whether the output may be written
    ///
    /// A directory at the path is refused outright.
    #[instrument(skip(self))]
    pub fn check(&self, path: &Path) -> Result<OverwriteDecision> {
        if self.fs_utils.is_dir(path) {
            return Err(TransformerError::output_write(
                "there is a directory at this path, refusing to overwrite",
                path,
            ));
        }

        if !self.fs_utils.exists(path) {
            debug!("Output {} does not exist yet", path.display());
            return Ok(OverwriteDecision::Fresh);
        }

        let reply = self
            .prompter
            .ask(&overwrite_question(path))
            .map_err(|e| TransformerError::io("prompt for overwrite", "<console>", e))?;

        if accepts_overwrite(reply.as_deref()) {
            Ok(OverwriteDecision::Overwrite)
        } else {
            info!("Overwrite of {} declined", path.display());
            Ok(OverwriteDecision::Cancel)
        }
    }

    /// Remove the existing file once an overwrite was agreed to
    #[instrument(skip(self))]
    pub fn clear(&self, path: &Path, decision: OverwriteDecision) -> Result<()> {
        if decision == OverwriteDecision::Overwrite {
            self.fs_utils
                .remove_file_if_exists(path)
                .map_err(|e| TransformerError::output_io(path, e))?;
        }
        Ok(())
    }
}
