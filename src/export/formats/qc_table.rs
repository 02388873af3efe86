use crate::error::{QcError, Result};
use crate::metrics::QcRecord;
use csv::WriterBuilder;
use std::io::Write;

/// Writes the record as a header row plus one data row.
pub fn write_qc_table<W: Write>(record: &QcRecord, writer: W) -> std::result::Result<(), csv::Error> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(record.header())?;
    csv_writer.write_record(record.row())?;
    csv_writer.flush()?;
    Ok(())
}

/// Renders the table in memory, so nothing reaches disk if formatting fails.
pub fn qc_table_bytes(record: &QcRecord) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_qc_table(record, &mut buffer).map_err(|e| {
        QcError::io(
            "<qc table>",
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )
    })?;
    Ok(buffer)
}
