use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::{MainLayout, DEFAULT_DESCRIPTION};

/// A quote shown on the about page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteView {
    pub quote: String,
    pub author: String,
}

#[component]
pub fn HomePage() -> Element {
    rsx! {
        MainLayout {
            title: "PonderPad - Notes taking application".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            section {
                class: "hero",
                h1 { "Think it. Write it. Find it." }
                p { "{DEFAULT_DESCRIPTION}" }
                a { class: "button", href: "/auth/google", "Get started" }
            }
        }
    }
}

#[component]
pub fn AboutPage(#[props(!optional)] quote: Option<QuoteView>) -> Element {
    rsx! {
        MainLayout {
            title: "About PonderPad".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            section {
                class: "about",
                h1 { "About PonderPad" }
                p {
                    "PonderPad keeps your notes private to your account. Sign in with Google, "
                    "write as much as you like, and search across everything you have written."
                }
                {quote.map(|QuoteView { quote, author }| rsx! {
                    blockquote {
                        class: "quote",
                        p { "{quote}" }
                        cite { "{author}" }
                    }
                })}
            }
        }
    }
}

#[component]
pub fn NotFoundPage() -> Element {
    rsx! {
        MainLayout {
            title: "404 - Page Not Found".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            section {
                class: "not-found",
                h1 { "404" }
                p { "The page you are looking for does not exist." }
                a { href: "/", "Back to the home page" }
            }
        }
    }
}
