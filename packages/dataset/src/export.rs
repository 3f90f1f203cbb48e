//! CSV export and import of the full dataset.
//!
//! The export is a header row followed by one row per region in canonical
//! order, with every incident rate, the composite score, population,
//! coordinates, and the data timestamp. Floats are written in their
//! shortest round-trip form, so [`read_csv`] recovers every value exactly.

use std::io::{Read, Write};
use std::path::Path;

use safety_map_dataset_models::{EXPORT_HEADERS, ExportRow, RegionRecord};

use crate::{Dataset, DatasetError};

/// File name offered for the downloadable export.
pub const DEFAULT_EXPORT_FILENAME: &str = "india_crime_data_ncrb.csv";

/// Writes the full dataset as CSV to `writer`.
///
/// # Errors
///
/// Returns [`DatasetError`] if serialization or the underlying write fails.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let timestamp = dataset.source().data_timestamp;

    for record in dataset.records() {
        csv_writer.serialize(ExportRow::from_record(record, timestamp))?;
    }

    csv_writer.flush()?;
    log::debug!("Exported {} regions as CSV", dataset.len());
    Ok(())
}

/// Renders the full dataset as a CSV string.
///
/// # Errors
///
/// Returns [`DatasetError`] if serialization fails.
pub fn to_csv_string(dataset: &Dataset) -> Result<String, DatasetError> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DatasetError::InvalidExport {
        message: format!("export is not valid UTF-8: {e}"),
    })
}

/// Writes the full dataset as CSV to a file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be created or written.
pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path)?;
    write_csv(dataset, std::io::BufWriter::new(file))?;
    log::info!("Wrote {} regions to {}", dataset.len(), path.display());
    Ok(())
}

/// Parses an export produced by [`write_csv`] back into region records,
/// preserving row order.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidExport`] if the header row does not match
/// the export columns, or [`DatasetError::Csv`] if a row fails to parse.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RegionRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers != EXPORT_HEADERS {
        return Err(DatasetError::InvalidExport {
            message: format!(
                "unexpected header row: expected {}, found {}",
                EXPORT_HEADERS.join(","),
                headers.join(",")
            ),
        });
    }

    let mut records: Vec<RegionRecord> = Vec::new();
    for row in csv_reader.deserialize::<ExportRow>() {
        let record = RegionRecord::from(row?);
        if records.iter().any(|r| r.name == record.name) {
            return Err(DatasetError::InvalidExport {
                message: format!("duplicate row for region '{}'", record.name),
            });
        }
        records.push(record);
    }

    log::debug!("Parsed {} regions from CSV", records.len());
    Ok(records)
}

/// Parses an export and checks that it lists exactly the regions of
/// `dataset`, in its canonical order.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidExport`] if a region is missing, extra,
/// repeated, or out of order, plus any error of [`read_csv`].
pub fn read_csv_for<R: Read>(
    dataset: &Dataset,
    reader: R,
) -> Result<Vec<RegionRecord>, DatasetError> {
    let records = read_csv(reader)?;

    if records.len() != dataset.len() {
        return Err(DatasetError::InvalidExport {
            message: format!(
                "expected {} regions, found {}",
                dataset.len(),
                records.len()
            ),
        });
    }

    let misplaced = records
        .iter()
        .zip(dataset.records())
        .position(|(found, expected)| found.name != expected.name);

    if let Some(row) = misplaced {
        return Err(DatasetError::InvalidExport {
            message: format!(
                "row {} is '{}', expected '{}'",
                row + 1,
                records[row].name,
                dataset.records()[row].name
            ),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_has_header_and_one_row_per_region() {
        let dataset = Dataset::shipped().unwrap();
        let csv = to_csv_string(&dataset).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), EXPORT_HEADERS.join(","));
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), dataset.len());
        assert!(rows[0].starts_with("Andhra Pradesh,32.8,12.1,8.7,6.3,9.8,"));
        assert!(rows[0].ends_with(",49.7,15.9129,79.74,2023-12-31"));
    }

    #[test]
    fn export_is_deterministic() {
        let dataset = Dataset::shipped().unwrap();
        assert_eq!(
            to_csv_string(&dataset).unwrap(),
            to_csv_string(&dataset).unwrap()
        );
    }

    #[test]
    fn export_then_import_reproduces_records() {
        let dataset = Dataset::shipped().unwrap();
        let csv = to_csv_string(&dataset).unwrap();
        let records = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.as_slice(), dataset.records());
    }

    #[test]
    fn import_rejects_foreign_headers() {
        let err = read_csv(b"name,theft\nGoa,29.6\n".as_slice()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidExport { .. }));
    }

    #[test]
    fn import_rejects_malformed_rows() {
        let csv = format!(
            "{}\nGoa,not-a-number,1,1,1,1,1,1,1,1,2023-12-31\n",
            EXPORT_HEADERS.join(",")
        );
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    fn shipped_csv_lines() -> (Dataset, Vec<String>) {
        let dataset = Dataset::shipped().unwrap();
        let lines = to_csv_string(&dataset)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();
        (dataset, lines)
    }

    #[test]
    fn import_rejects_duplicate_regions() {
        let (_, mut lines) = shipped_csv_lines();
        lines.push(lines[1].clone());
        let err = read_csv(lines.join("\n").as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidExport { ref message } if message.contains("Andhra Pradesh")
        ));
    }

    #[test]
    fn import_for_dataset_rejects_reordered_rows() {
        let (dataset, mut lines) = shipped_csv_lines();
        lines.swap(1, 2);
        let csv = lines.join("\n");
        assert_eq!(read_csv(csv.as_bytes()).unwrap().len(), dataset.len());
        let err = read_csv_for(&dataset, csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidExport { ref message } if message.starts_with("row 1 ")
        ));
    }

    #[test]
    fn import_for_dataset_rejects_missing_rows() {
        let (dataset, mut lines) = shipped_csv_lines();
        lines.pop();
        let err = read_csv_for(&dataset, lines.join("\n").as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidExport { .. }));
    }

    #[test]
    fn import_for_dataset_accepts_its_own_export() {
        let (dataset, lines) = shipped_csv_lines();
        let records = read_csv_for(&dataset, lines.join("\n").as_bytes()).unwrap();
        assert_eq!(records.as_slice(), dataset.records());
    }

    #[test]
    fn writes_export_file() {
        let dataset = Dataset::shipped().unwrap();
        let name = format!("safety_map_export_{}.csv", std::process::id());
        let path = std::env::temp_dir().join(name);
        write_csv_file(&dataset, &path).unwrap();
        let file = std::fs::File::open(&path).unwrap();
        let records = read_csv(file).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(records.len(), dataset.len());
    }
}
