//! Turns an uploaded CSV file into records for the spreadsheet.

use serde_json::{Map, Value};

use crate::Error;

/// One data row of an uploaded CSV, keyed by the file's own header names.
pub type CsvRecord = Map<String, Value>;

/// The header names whose values are sent as numbers, compared case-insensitively.
const NUMERIC_HEADERS: [&str; 2] = ["debet", "credit"];

/// Parse `text` as a CSV document whose first line is the header row.
///
/// Headers are used as-is (only surrounding whitespace is removed), so they
/// must match the column names in the sheet exactly. Values under a `debet`
/// or `credit` header become numbers read from the start of the cell, or
/// zero when the cell does not start with one. Every other value stays text.
/// Each record has every header as a key: missing cells become zero or the
/// empty string.
///
/// Returns an empty list when there is no data row.
///
/// # Errors
/// Returns [Error::InvalidCSV] if the document cannot be read as CSV.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .clone();

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.map_err(|error| Error::InvalidCSV(error.to_string()))?;
        let mut record = CsvRecord::new();

        for (index, header) in headers.iter().enumerate() {
            let cell = row.get(index).unwrap_or_default();
            record.insert(header.to_owned(), coerce_cell(header, cell));
        }

        records.push(record);
    }

    Ok(records)
}

fn coerce_cell(header: &str, cell: &str) -> Value {
    let is_numeric = NUMERIC_HEADERS
        .iter()
        .any(|name| header.eq_ignore_ascii_case(name));

    if !is_numeric {
        return Value::String(cell.to_owned());
    }

    Value::from(leading_number(cell))
}

/// Read the number at the start of `cell` and ignore whatever follows it, so
/// "12abc" is 12. A cell that does not start with a number is zero.
fn leading_number(cell: &str) -> f64 {
    let cell = cell.trim_start();
    let bytes = cell.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_digits = digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }

        let exponent_digits = digits(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    cell[..end]
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}
