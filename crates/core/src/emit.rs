//! JSON output for the record set.
//!
//! Records serialize as an array of objects. Missing values are already
//! `None`/`Null` by the time a [`Record`] exists, and serde_json writes them
//! (and any non-finite float) as `null`, so no key is ever dropped.

use crate::error::{PipelineError, PipelineResult};
use crate::record::Record;
use std::io::Write;
use std::path::Path;

/// Serialize records to a writer
pub fn write_records<W: Write>(writer: W, records: &[Record], pretty: bool) -> PipelineResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, records)?;
    } else {
        serde_json::to_writer(writer, records)?;
    }
    Ok(())
}

/// Serialize records to a JSON string
pub fn to_json_string(records: &[Record], pretty: bool) -> PipelineResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(rendered)
}

/// Write records to `path`, creating parent directories.
///
/// The document is rendered in memory first so a serialization failure
/// never leaves a partial file behind.
///
/// # Errors
///
/// Returns `PipelineError::Write` if the destination cannot be created or
/// written.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[Record], pretty: bool) -> PipelineResult<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    write_records(&mut buffer, records, pretty)?;
    buffer.push(b'\n');

    let write_error = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, &buffer).map_err(write_error)?;

    tracing::info!(path = %path.display(), records = records.len(), bytes = buffer.len(), "wrote records");
    Ok(())
}
