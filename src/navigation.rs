//! The sidebar and header shared by every page behind the log-in.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{HeadElement, base},
    user::User,
};

/// A link in the sidebar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 rounded text-white bg-blue-700 dark:bg-blue-600"
        } else {
            "block py-2 px-3 rounded text-gray-900 hover:bg-gray-100
            dark:text-white dark:hover:bg-gray-700"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the sidebar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = [
            (endpoints::SUMMARY_VIEW, "Summary"),
            (endpoints::TRANSACTIONS_VIEW, "Transactions"),
            (endpoints::UPLOAD_VIEW, "Upload CSV"),
            (endpoints::NEW_CLIENT_VIEW, "Add Client"),
            (endpoints::NEW_USER_VIEW, "Add User"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            aside
                class="w-full lg:w-64 lg:min-h-screen bg-white border-b lg:border-b-0
                lg:border-r border-gray-200 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-4"
                {
                    a href=(endpoints::SUMMARY_VIEW)
                        class="block mb-6 text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Recon Dashboard"
                    }

                    nav aria-label="Primary"
                    {
                        ul class="flex flex-row flex-wrap gap-2 lg:flex-col font-medium"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

/// The page header with the page title, who is logged in, and a log-out link.
fn header_view(title: &str, user: Option<&User>) -> Markup {
    html!(
        header
            class="flex items-center justify-between px-6 py-4 bg-white border-b
            border-gray-200 dark:bg-gray-800 dark:border-gray-700 text-gray-900 dark:text-white"
        {
            h1 class="text-xl font-bold" { (title) }

            div class="flex items-center gap-4"
            {
                @if let Some(user) = user {
                    div id="current-user" class="text-right"
                    {
                        p class="font-semibold" { (user.username) }
                        p class="text-sm text-gray-500 dark:text-gray-400" { (user.role) }
                    }
                }

                a
                    href=(endpoints::LOG_OUT)
                    class="px-3 py-1.5 text-sm rounded border border-gray-300
                    hover:bg-gray-100 dark:border-gray-600 dark:hover:bg-gray-700"
                {
                    "Log out"
                }
            }
        }
    )
}

/// Wrap `content` in the sidebar and header and render the whole document.
pub fn dashboard_page(
    title: &str,
    active_endpoint: &str,
    user: Option<&User>,
    head_elements: &[HeadElement],
    content: &Markup,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let header = header_view(title, user);

    let layout = html!(
        div class="flex flex-col lg:flex-row min-h-screen"
        {
            (nav_bar)

            div class="flex-1 flex flex-col"
            {
                (header)

                main class="flex-1" { (content) }
            }
        }
    );

    base(title, head_elements, &layout)
}
