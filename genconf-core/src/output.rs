//! Output helpers: document sinks and record listings

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::Builder;

use crate::discovery::FontRecord;
use crate::error::GenconfError;

/// Where a generated document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("<stdout>"),
            Sink::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Deliver `text` to `sink` in full or not at all.
///
/// Files are written to a temporary sibling and renamed into place, so a
/// failed write never leaves a truncated configuration behind. A replaced
/// file keeps its mode; a new one gets the usual umask-derived mode.
pub fn write_document(text: &str, sink: &Sink) -> Result<(), GenconfError> {
    let result = match sink {
        Sink::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .and_then(|_| handle.flush())
        }
        Sink::File(path) => persist(text, path),
    };

    result.map_err(|source| GenconfError::Sink {
        destination: sink.to_string(),
        source,
    })
}

fn persist(text: &str, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".fc-genconf");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The kernel applies the process umask to this mode at creation.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Write records as prettified JSON array.
pub fn write_json_pretty(records: &[FontRecord], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write records as newline-delimited JSON (NDJSON).
pub fn write_ndjson(records: &[FontRecord], mut w: impl Write) -> Result<()> {
    for item in records {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `family:genericfamily:path` lines; missing values render empty.
pub fn write_plain(records: &[FontRecord], mut w: impl Write) -> Result<()> {
    for item in records {
        writeln!(
            w,
            "{}:{}:{}",
            item.family.as_deref().unwrap_or_default(),
            item.generic_family,
            item.path_with_index()
        )?;
    }
    Ok(())
}
