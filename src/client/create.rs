//! The page and endpoint for adding a client.

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    api::ApiClient,
    endpoints,
    html::{FORM_CONTAINER_STYLE, FormMessage, form_message, submit_button, text_input},
    navigation::dashboard_page,
    user::User,
};

pub(super) const EMPTY_NAME_ERROR_MSG: &str = "Client name cannot be empty.";

/// The state needed to add a client.
#[derive(Clone)]
pub struct CreateClientState {
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateClientState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientForm {
    pub name: String,
}

fn new_client_form(name: &str, message: Option<&FormMessage>) -> Markup {
    html! {
        form
            hx-post=(endpoints::CLIENTS_API)
            hx-disabled-elt="#name, #submit-button"
            hx-indicator="#indicator"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            (text_input("name", "Client Name", "text", name))

            (form_message(message))

            (submit_button("Add Client"))
        }
    }
}

/// Display the form for adding a client.
pub async fn get_new_client_page(Extension(user): Extension<User>) -> Response {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) { (new_client_form("", None)) }
    };

    dashboard_page(
        "Add Client",
        endpoints::NEW_CLIENT_VIEW,
        Some(&user),
        &[],
        &content,
    )
    .into_response()
}

/// Register the client with the spreadsheet and return the form with the outcome.
///
/// The name field is cleared after a client is added.
pub async fn create_client_endpoint(
    State(state): State<CreateClientState>,
    Form(form): Form<ClientForm>,
) -> Response {
    let name = form.name.trim();

    if name.is_empty() {
        let message = FormMessage::Error(EMPTY_NAME_ERROR_MSG.to_owned());
        return new_client_form(&form.name, Some(&message)).into_response();
    }

    match state.api.add_client(name).await {
        Ok(client) => {
            tracing::info!("Added client {}", client.client);
            let message = FormMessage::Success(format!("New client \"{}\" was added.", client.client));
            new_client_form("", Some(&message)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not add client {name}: {error}");
            let message = FormMessage::Error(error.to_string());
            new_client_form(name, Some(&message)).into_response()
        }
    }
}
