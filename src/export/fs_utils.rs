use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Decide whether `path` may be (over)written.
///
/// A missing file or `force` always passes. An existing file is only
/// overwritten after an explicit "y" on an interactive terminal; scripted
/// runs fail instead of blocking on the prompt.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    let exists = || {
        AppError::Validation(format!(
            "The file '{}' already exists (use --force to overwrite)",
            path.display()
        ))
    };

    if !io::stdin().is_terminal() {
        return Err(exists());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(exists())
    }
}
