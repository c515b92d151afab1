//! Comma-separated numeric tables.
//!
//! Reading is lenient about layout: fields are trimmed, blank lines and
//! empty fields are skipped, and an optional header row is discarded. It is
//! strict about content: every token must parse as `f64` and every data row
//! must have the same number of values as the first.

use crate::error::{MinivitError, Result};
use crate::primitives::Matrix;
use std::path::Path;

fn csv_error(path: &Path, err: csv::Error) -> MinivitError {
    let line = err.position().map_or(0, csv::Position::line);
    match err.into_kind() {
        csv::ErrorKind::Io(io) => MinivitError::Io(io),
        other => MinivitError::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("{other:?}"),
        },
    }
}

/// One data row: its 1-based line number and its non-empty fields.
type TokenRow = (u64, Vec<String>);

/// Split `path` into data rows, dropping blank lines and empty fields.
///
/// The header, when present, is physical line 1 whatever it contains; a
/// blank first line is therefore the header and the next row is data.
fn read_tokens(path: &Path, has_header: bool) -> Result<Vec<TokenRow>> {
    if !path.exists() {
        return Err(MinivitError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(path, e)),
        }
        let line = record.position().map_or(0, csv::Position::line);
        if has_header && line == 1 {
            continue;
        }

        let fields: Vec<String> = record
            .iter()
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();
        if !fields.is_empty() {
            rows.push((line, fields));
        }
    }

    if rows.is_empty() {
        return Err(MinivitError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

fn parse_value(path: &Path, line: u64, field: &str) -> Result<f64> {
    field.parse::<f64>().map_err(|_| MinivitError::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("invalid number '{field}'"),
    })
}

/// Read every data row of `path` as a vector of values.
fn read_rows(path: &Path, has_header: bool) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line, fields) in read_tokens(path, has_header)? {
        let values = fields
            .iter()
            .map(|field| parse_value(path, line, field))
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if values.len() != first.len() {
                return Err(MinivitError::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "expected {} columns, found {}",
                        first.len(),
                        values.len()
                    ),
                });
            }
        }
        rows.push(values);
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load a numeric table into a matrix.
///
/// # Errors
///
/// - [`MinivitError::FileNotFound`] if `path` does not exist
/// - [`MinivitError::Parse`] on a non-numeric token or ragged row
/// - [`MinivitError::EmptyData`] if no data rows remain
///
/// # Example
///
/// ```
/// use minivit::serialization::csv;
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// let path = dir.path().join("m.csv");
/// std::fs::write(&path, "a,b\n1, 2\n\n3,4\n").expect("write");
///
/// let m = csv::load_matrix(&path, true).expect("valid table");
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn load_matrix(path: impl AsRef<Path>, has_header: bool) -> Result<Matrix> {
    let rows = read_rows(path.as_ref(), has_header)?;
    Matrix::from_rows(&rows)
}

/// Load the first value of each data row.
///
/// Only the first token of a row is parsed, so rows may differ in length
/// and trailing tokens are ignored.
///
/// # Errors
///
/// - [`MinivitError::FileNotFound`] if `path` does not exist
/// - [`MinivitError::Parse`] if a row's first token is not a number
/// - [`MinivitError::EmptyData`] if no data rows remain
pub fn load_vector(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let values = read_tokens(path, has_header)?
        .iter()
        .map(|(line, fields)| parse_value(path, *line, &fields[0]))
        .collect::<Result<Vec<f64>>>()?;
    log::debug!("read {} values from {}", values.len(), path.display());
    Ok(values)
}

/// Load the first column of each data row as a `1 x n` matrix.
///
/// # Errors
///
/// Same as [`load_matrix`].
pub fn load_row_vector(path: impl AsRef<Path>, has_header: bool) -> Result<Matrix> {
    let values = load_vector(path, has_header)?;
    Matrix::from_vec(1, values.len(), values)
}

/// Write `matrix` as comma-separated rows with no header.
///
/// Values use Rust's shortest round-trip formatting, so loading the file
/// back reproduces them exactly.
///
/// # Errors
///
/// Returns [`MinivitError::Io`] if the file cannot be created or written.
pub fn save_matrix(matrix: &Matrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    for row in matrix.rows_iter() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush()?;
    log::debug!(
        "wrote {}x{} matrix to {}",
        matrix.n_rows(),
        matrix.n_cols(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
