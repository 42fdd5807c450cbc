use mparticle_common::{ExtractError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `markdown` to `path` as UTF-8, replacing any existing file.
///
/// The text is staged in a temporary file next to `path` and renamed over it,
/// so a failed write leaves the target untouched.
pub fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    let io_err = |source: std::io::Error| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    staged.write_all(markdown.as_bytes()).map_err(io_err)?;
    staged.flush().map_err(io_err)?;
    staged.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
