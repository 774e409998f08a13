//! CSV output for the merged table.

use super::MergedTable;
use crate::error::ReportError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `table` as CSV to any writer, header first.
pub fn write_table<W: Write>(table: &MergedTable, writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `table` to `path`, replacing any existing file.
///
/// Rows go to a temporary file in the same directory which is renamed over
/// `path` only once fully written, so a failed write leaves any previous
/// report untouched.
pub fn write_csv_file(table: &MergedTable, path: &Path) -> Result<(), ReportError> {
    let sink_error = |source: csv::Error| ReportError::Sink {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|err| sink_error(err.into()))?;
    write_table(table, &mut staged).map_err(sink_error)?;
    staged
        .persist(path)
        .map_err(|err| sink_error(err.error.into()))?;
    Ok(())
}
