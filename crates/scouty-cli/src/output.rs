// Report writers: pretty JSON (and CSV for `convert`) to stdout or a file.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output directory does not exist: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("output directory is not writable: {path}: {source}")]
    ReadOnlyDirectory { path: PathBuf, source: io::Error },

    #[error("output path is a directory: {path}")]
    IsDirectory { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Check that `path` can be created: its directory must exist and accept
/// writes. Writability is checked by creating and dropping a scratch file,
/// so ownership and ACLs count, not just the mode bits.
pub fn check_output_path(path: &Path) -> Result<(), OutputError> {
    if path.is_dir() {
        return Err(OutputError::IsDirectory {
            path: path.to_path_buf(),
        });
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let meta = std::fs::metadata(dir).map_err(|_| OutputError::MissingDirectory {
        path: dir.to_path_buf(),
    })?;
    if !meta.is_dir() {
        return Err(OutputError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }
    tempfile::Builder::new()
        .prefix(".scouty-")
        .tempfile_in(dir)
        .map_err(|source| OutputError::ReadOnlyDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Write `report` as 2-space indented JSON to `output`, or stdout when `None`.
pub fn write_json<T: Serialize + ?Sized>(
    report: &T,
    output: Option<&Path>,
) -> Result<(), OutputError> {
    let text = serde_json::to_string_pretty(report)?;
    write_text(&text, output)
}

/// Write a roster as English-layout CSV to `output`, or stdout when `None`.
pub fn write_csv(
    players: &[scouty_core::Player],
    output: Option<&Path>,
) -> Result<(), OutputError> {
    let mut buf = Vec::new();
    scouty_core::ingest::write_players_csv(players, &mut buf)?;
    match output {
        Some(path) => {
            check_output_path(path)?;
            std::fs::write(path, &buf).map_err(|e| OutputError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            info!("wrote {} players to {}", players.len(), path.display());
            Ok(())
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&buf).map_err(OutputError::Stdout)?;
            out.flush().map_err(OutputError::Stdout)
        }
    }
}

fn write_text(text: &str, output: Option<&Path>) -> Result<(), OutputError> {
    match output {
        Some(path) => {
            check_output_path(path)?;
            let io_err = |e| OutputError::Io {
                path: path.to_path_buf(),
                source: e,
            };
            let file = File::create(path).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{text}").map_err(io_err)?;
            writer.flush().map_err(io_err)?;
            info!("results saved to {}", path.display());
            Ok(())
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{text}").map_err(OutputError::Stdout)?;
            out.flush().map_err(OutputError::Stdout)
        }
    }
}
