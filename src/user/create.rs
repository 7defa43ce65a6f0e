//! The page and endpoint for adding a dashboard user.

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
    html::{
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMessage, form_message,
        submit_button, text_input,
    },
    navigation::dashboard_page,
    user::{Role, User},
};

pub(super) const EMPTY_CREDENTIALS_ERROR_MSG: &str = "Username and password cannot be empty.";

/// The state needed to add a user.
#[derive(Clone)]
pub struct CreateUserState {
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

fn new_user_form(username: &str, role: Role, message: Option<&FormMessage>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS_API)
            hx-disabled-elt="#username, #password, #role, #submit-button"
            hx-indicator="#indicator"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            (text_input("username", "Username", "text", username))

            (text_input("password", "Password", "password", ""))

            div
            {
                label for="role" class=(FORM_LABEL_STYLE) { "Role" }

                select id="role" name="role" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in Role::ALL {
                        option value=(option.as_str()) selected[option == role] { (option.as_str()) }
                    }
                }
            }

            (form_message(message))

            (submit_button("Add User"))
        }
    }
}

/// Display the form for adding a user.
pub async fn get_new_user_page(Extension(user): Extension<User>) -> Response {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) { (new_user_form("", Role::default(), None)) }
    };

    dashboard_page(
        "Add User",
        endpoints::NEW_USER_VIEW,
        Some(&user),
        &[],
        &content,
    )
    .into_response()
}

/// Register the user with the spreadsheet and return the form with the outcome.
///
/// After a user is added the form is reset with the role back to [Role::User].
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    Form(form): Form<NewUserForm>,
) -> Response {
    let username = form.username.trim();

    if username.is_empty() || form.password.trim().is_empty() {
        let message = FormMessage::Error(EMPTY_CREDENTIALS_ERROR_MSG.to_owned());
        return new_user_form(username, form.role, Some(&message)).into_response();
    }

    match state.api.add_user(username, form.role, &form.password).await {
        Ok(user) => {
            tracing::info!("Added user {} with role {}", user.username, user.role);
            let message = FormMessage::Success(format!(
                "New user \"{}\" with role \"{}\" was added.",
                user.username, user.role
            ));
            new_user_form("", Role::default(), Some(&message)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not add user {username}: {error}");
            let message = FormMessage::Error(error.to_string());
            new_user_form(username, form.role, Some(&message)).into_response()
        }
    }
}
