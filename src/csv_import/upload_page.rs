//! The page for uploading a CSV file and the endpoint that receives it.

use axum::{
    Extension,
    extract::{FromRef, Multipart, State, multipart::Field},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::ApiClient,
    csv_import::csv::parse_csv,
    endpoints,
    html::{
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMessage, form_message,
        submit_button,
    },
    navigation::dashboard_page,
    user::User,
};

pub(super) const NO_FILE_ERROR_MSG: &str = "Please choose a file first.";
pub(super) const NO_RECORDS_ERROR_MSG: &str = "The file is empty or the CSV format is invalid. \
    Make sure it has a header row and at least one data row.";
pub(super) const NOT_CSV_ERROR_MSG: &str = "File type must be CSV.";

/// The name of the file input in the upload form.
const FILE_FIELD: &str = "file";

/// The state needed to upload records.
#[derive(Clone)]
pub struct UploadState {
    pub api: ApiClient,
}

impl FromRef<AppState> for UploadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

fn upload_form(message: Option<&FormMessage>) -> Markup {
    html! {
        form
            hx-post=(endpoints::UPLOAD_API)
            hx-encoding="multipart/form-data"
            enctype="multipart/form-data"
            hx-disabled-elt="#file, #submit-button"
            hx-indicator="#indicator"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for=(FILE_FIELD) class=(FORM_LABEL_STYLE) { "Choose a file" }

                input
                    id=(FILE_FIELD)
                    type="file"
                    name=(FILE_FIELD)
                    accept=".csv,text/csv"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "The header row must match the column names in the spreadsheet exactly."
                }
            }

            (form_message(message))

            (submit_button("Upload"))
        }
    }
}

/// Display the CSV upload page.
pub async fn get_upload_page(Extension(user): Extension<User>) -> Response {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) { (upload_form(None)) }
    };

    dashboard_page(
        "Upload CSV",
        endpoints::UPLOAD_VIEW,
        Some(&user),
        &[],
        &content,
    )
    .into_response()
}

/// Parse the uploaded CSV file and append its rows to the transaction sheet.
///
/// The form is returned with a message saying how many rows were added or
/// what went wrong.
pub async fn upload_endpoint(State(state): State<UploadState>, multipart: Multipart) -> Response {
    let message = match upload(&state.api, multipart).await {
        Ok(count) => FormMessage::Success(format!("Success! {count} new rows were added.")),
        Err(message) => FormMessage::Error(message),
    };

    upload_form(Some(&message)).into_response()
}

async fn upload(api: &ApiClient, multipart: Multipart) -> Result<u64, String> {
    let text = match read_csv_file(multipart).await {
        Ok(Some(text)) => text,
        Ok(None) => return Err(NO_FILE_ERROR_MSG.to_owned()),
        Err(Error::NotCSV) => return Err(NOT_CSV_ERROR_MSG.to_owned()),
        Err(error) => return Err(error.to_string()),
    };

    let records = match parse_csv(&text) {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => return Err(NO_RECORDS_ERROR_MSG.to_owned()),
        Err(error) => {
            tracing::debug!("Failed to parse CSV: {error}");
            return Err(NO_RECORDS_ERROR_MSG.to_owned());
        }
    };

    tracing::info!("Uploading {} records", records.len());

    match api.upload_records(&records).await {
        Ok(summary) => Ok(summary.count),
        Err(error) => {
            tracing::error!("Upload failed: {error}");
            Err(error.to_string())
        }
    }
}

/// Read the text of the uploaded file, or `None` if no file was chosen.
async fn read_csv_file(mut multipart: Multipart) -> Result<Option<String>, Error> {
    loop {
        let field = multipart.next_field().await.map_err(|error| {
            tracing::error!("Could not read multipart form: {error}");
            Error::MultipartError(error.body_text())
        })?;

        let Some(field) = field else {
            return Ok(None);
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        return read_field(field).await;
    }
}

async fn read_field(field: Field<'_>) -> Result<Option<String>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let is_csv = field.content_type() == Some("text/csv")
        || file_name.to_lowercase().ends_with(".csv");

    // Browsers send an empty, nameless part when no file was chosen.
    if file_name.is_empty() && !is_csv {
        return Ok(None);
    }

    if !is_csv {
        return Err(Error::NotCSV);
    }

    let data = field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        body::Body,
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
        response::Response,
    };
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment, stub_api,
        },
        user::User,
    };

    use super::{
        NO_FILE_ERROR_MSG, NO_RECORDS_ERROR_MSG, NOT_CSV_ERROR_MSG, UploadState, get_upload_page,
        upload_endpoint,
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_upload_page(Extension(User {
            username: "budi".to_owned(),
            role: "User".to_owned(),
        }))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::UPLOAD_API, "hx-post");
        assert_eq!(form.value().attr("enctype"), Some("multipart/form-data"));
        assert_form_input(&form, "file", "file");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn upload_reports_added_rows() {
        let (api, transport) = stub_api(&[r#"{"ok": true, "count": 2}"#]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("data.csv", "text/csv", "client,debet\nPT Maju,10\nCV Jaya,20").await,
        )
        .await;

        assert_eq!(message(response).await, "Success! 2 new rows were added.");
        let requests = transport.requests();
        assert_eq!(requests[0][0].1, "uploadDatabase");
    }

    #[tokio::test]
    async fn file_name_is_enough_to_accept_csv() {
        let (api, _) = stub_api(&[r#"{"ok": true, "count": 1}"#]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("export.CSV", "application/vnd.ms-excel", "client\nPT Maju").await,
        )
        .await;

        assert_eq!(message(response).await, "Success! 1 new rows were added.");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let (api, transport) = stub_api(&[]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("", "application/octet-stream", "").await,
        )
        .await;

        assert_eq!(message(response).await, NO_FILE_ERROR_MSG);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn header_only_file_is_not_sent() {
        let (api, transport) = stub_api(&[]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("data.csv", "text/csv", "client,debet,credit").await,
        )
        .await;

        assert_eq!(message(response).await, NO_RECORDS_ERROR_MSG);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn other_file_types_are_rejected() {
        let (api, transport) = stub_api(&[]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("notes.txt", "text/plain", "hello").await,
        )
        .await;

        assert_eq!(message(response).await, NOT_CSV_ERROR_MSG);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn rejected_upload_shows_server_message() {
        let (api, _) = stub_api(&[r#"{"ok": false, "error": "Header Akun not found"}"#]);

        let response = upload_endpoint(
            State(UploadState { api }),
            must_make_multipart("data.csv", "text/csv", "Akun\nKas").await,
        )
        .await;

        assert_eq!(message(response).await, "Header Akun not found");
    }

    async fn message(response: Response) -> String {
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        let selector = Selector::parse("p[role=alert], p[role=status]").unwrap();

        form.select(&selector)
            .next()
            .map(|paragraph| paragraph.text().collect::<String>())
            .expect("No message in form")
    }

    async fn must_make_multipart(file_name: &str, content_type: &str, contents: &str) -> Multipart {
        let boundary = "MY_BOUNDARY123456789";
        let data = [
            format!("--{boundary}"),
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\""),
            format!("Content-Type: {content_type}"),
            String::new(),
            contents.to_owned(),
            format!("--{boundary}--"),
        ]
        .join("\r\n");

        let request = Request::builder()
            .method("POST")
            .uri(endpoints::UPLOAD_API)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(data))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }
}
