//! Request inputs. Form and query structs reject fields they do not know.

use serde::Deserialize;

/// `POST /dashboard/create`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewNoteForm {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

/// `PUT /dashboard/edit/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditNoteForm {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// `POST /dashboard/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchForm {
    #[serde(rename = "searchInput", default)]
    pub search_input: String,
}

/// `GET /api/quotes`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotesQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Query string of `GET /google/callback`. Providers append parameters of their
/// own (`scope`, `authuser`, ...), so unknown fields are ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// The `_method` field of a form's action URL. Every other field belongs to the
/// handler, so they are ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}
