//! Defines the app level error type and its conversion to HTML alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    api::ApiError,
    transaction::TransactionId,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A call to the spreadsheet service failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required form field was empty.
    ///
    /// Holds the message to show next to the form.
    #[error("{0}")]
    Validation(String),

    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file does not look like a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The transaction is not among the loaded transactions.
    #[error("transaction {0} is not loaded")]
    MissingTransaction(TransactionId),
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, Alert::ErrorSimple { message }),
            Error::Api(ApiError::Rejected(message)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Request rejected".to_owned(),
                    details: message,
                },
            ),
            Error::Api(error) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the spreadsheet".to_owned(),
                    details: error.to_string(),
                },
            ),
            error @ (Error::NotCSV | Error::InvalidCSV(_) | Error::MultipartError(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the upload".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::MissingTransaction(id) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: format!(
                        "Transaction {id} could not be found. \
                        Try refreshing the page to load the latest transactions."
                    ),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
