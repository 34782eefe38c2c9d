//! # Server-rendered pages for PonderPad
//!
//! Every page is a Dioxus component tree rendered once to an HTML string with
//! `dioxus-ssr`. Nothing here is interactive on the client: forms post back to
//! the server, which answers with a redirect or a freshly rendered page.
//!
//! ## Pages
//!
//! | Function | Route(s) |
//! |----------|----------|
//! | [`home_page`] | `GET /` |
//! | [`about_page`] | `GET /about` |
//! | [`not_found_page`] | catch-all, missing notes |
//! | [`dashboard_page`] | `GET /dashboard` |
//! | [`create_note_page`] | `GET/POST /dashboard/create` |
//! | [`edit_note_page`] | `GET/PUT /dashboard/edit/:id` |
//! | [`search_page`] | `GET/POST /dashboard/search` |
//!
//! Text and attribute values are escaped by the renderer, so note content can be
//! passed through untouched.

use dioxus::prelude::*;

mod dashboard;
mod layout;
mod navbar;
mod pages;

pub use dashboard::{ActivePage, NoteDraft};
pub use pages::QuoteView;

use store::{Note, User};

/// Render a component tree as a complete HTML document.
fn render(element: Element) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render_element(element)
    )
}

pub fn home_page() -> String {
    render(rsx! { pages::HomePage {} })
}

pub fn about_page(quote: Option<QuoteView>) -> String {
    render(rsx! { pages::AboutPage { quote } })
}

pub fn not_found_page() -> String {
    render(rsx! { pages::NotFoundPage {} })
}

pub fn dashboard_page(user: &User, notes: Vec<Note>) -> String {
    render(rsx! { dashboard::DashboardPage { user: user.clone(), notes } })
}

pub fn create_note_page(user: &User, draft: NoteDraft, error: Option<String>) -> String {
    render(rsx! { dashboard::CreateNotePage { user: user.clone(), draft, error } })
}

pub fn edit_note_page(user: &User, note_id: String, draft: NoteDraft, error: Option<String>) -> String {
    render(rsx! { dashboard::EditNotePage { user: user.clone(), note_id, draft, error } })
}

/// `results` is `None` before the first search has been submitted.
pub fn search_page(user: &User, query: String, results: Option<Vec<Note>>) -> String {
    render(rsx! { dashboard::SearchPage { user: user.clone(), query, results } })
}
