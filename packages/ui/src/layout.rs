use dioxus::prelude::*;

use store::User;

use crate::dashboard::ActivePage;
use crate::navbar::Navbar;

pub const DEFAULT_DESCRIPTION: &str = "PonderPad is an open-source notes taking application with a simple and intuitive design. Sign up for free and start taking notes today!";

/// `head` and `body` shared by every page. The `html` root element is added
/// by [`crate::render`].
#[component]
fn Document(title: String, description: String, body_class: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            meta { name: "description", content: "{description}" }
            title { "{title}" }
            link { rel: "stylesheet", href: "/static/css/main.css" }
        }
        body {
            class: "{body_class}",
            {children}
        }
    }
}

/// Public pages: landing, about, not found.
#[component]
pub fn MainLayout(title: String, description: String, children: Element) -> Element {
    rsx! {
        Document {
            title: title,
            description: description,
            body_class: "main".to_string(),
            header {
                Navbar {
                    a { href: "/about", "About" }
                    a { class: "button", href: "/auth/google", "Sign in with Google" }
                }
            }
            main { {children} }
            footer { "PonderPad" }
        }
    }
}

/// Authenticated pages under `/dashboard`.
#[component]
pub fn DashboardLayout(title: String, user: User, active: ActivePage, children: Element) -> Element {
    let link_class = |page: ActivePage| if page == active { "nav-link active" } else { "nav-link" };
    let dashboard_class = link_class(ActivePage::Dashboard);
    let create_class = link_class(ActivePage::Create);
    let search_class = link_class(ActivePage::Search);
    let display_name = user.display_name.clone();
    let avatar = user.profile_photo.clone();

    rsx! {
        Document {
            title: title,
            description: "Your notes".to_string(),
            body_class: "dashboard".to_string(),
            header {
                Navbar {
                    a { class: dashboard_class, href: "/dashboard", "Notes" }
                    a { class: create_class, href: "/dashboard/create", "New note" }
                    a { class: search_class, href: "/dashboard/search", "Search" }
                    span {
                        class: "user",
                        {avatar.map(|src| rsx! {
                            img { class: "avatar", src: "{src}", alt: "Profile photo" }
                        })}
                        "{display_name}"
                    }
                    a { class: "nav-link", href: "/logout", "Log out" }
                }
            }
            main { {children} }
        }
    }
}
