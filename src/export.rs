use crate::error::Result;
use crate::models::ClassRow;
use csv::Writer;
use std::fs::File;
use std::io::Write;

pub const HEADERS: [&str; 8] = [
    "No",
    "Brand",
    "Owner",
    "ApplicationNumber",
    "ApplicationYear",
    "Status",
    "ClassCode",
    "ClassDescription",
];

/// Write the header and 1-based numbered rows to any writer
pub fn write_rows<W: Write>(writer: W, rows: &[ClassRow]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for (idx, row) in rows.iter().enumerate() {
        wtr.write_record([
            &(idx + 1).to_string(),
            &row.brand,
            &row.owner,
            &row.application_number,
            &row.application_year,
            &row.status,
            &row.class_code,
            &row.class_description,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save rows to `output_path`; returns the number of rows written.
///
/// Nothing is written for an empty row list.
pub fn export_csv(rows: &[ClassRow], output_path: &str) -> Result<usize> {
    log::info!("--- Saving data to {} ---", output_path);
    if rows.is_empty() {
        log::warn!("No data to save.");
        return Ok(0);
    }

    let file = File::create(output_path)?;
    write_rows(file, rows)?;

    log::info!("Successfully saved {} rows to {}", rows.len(), output_path);
    Ok(rows.len())
}
