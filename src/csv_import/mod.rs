//! Uploading a CSV file of transactions to the spreadsheet.

mod csv;
mod upload_page;

pub use csv::CsvRecord;
pub use upload_page::{get_upload_page, upload_endpoint};
