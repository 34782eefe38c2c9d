//! Owner-scoped note pages. Every handler extracts [`CurrentUser`] first, so
//! none of them runs for an anonymous request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use store::{sanitize_query, NewNote, NoteChanges, StoreError};
use tracing::{debug, info};
use ui::NoteDraft;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::forms::{EditNoteForm, NewNoteForm, SearchForm};
use crate::state::AppState;

const DASHBOARD: &str = "/dashboard";

/// Ids that are not UUIDs cannot name a note.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

pub async fn index(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let notes = state.notes.list_by_owner(user.id).await?;
    Ok(Html(ui::dashboard_page(&user, notes)))
}

pub async fn create_form(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(ui::create_note_page(&user, NoteDraft::default(), None))
}

pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<NewNoteForm>,
) -> Result<Response, AppError> {
    let note = match NewNote::with_tag_list(&form.title, form.content.as_deref(), form.tags.as_deref()) {
        Ok(note) => note,
        Err(StoreError::Validation(message)) => {
            let draft = NoteDraft {
                title: form.title,
                content: form.content.unwrap_or_default(),
                tags: form.tags.unwrap_or_default(),
            };
            let page = ui::create_note_page(&user, draft, Some(message));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let note_id = state.notes.create(user.id, note).await?;
    info!(user_id = %user.id, %note_id, "note created");
    Ok(Redirect::to(DASHBOARD).into_response())
}

pub async fn edit_form(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id).ok_or(AppError::NotFound)?;
    let note = state
        .notes
        .get_by_owner_and_id(user.id, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let draft = NoteDraft::from_note(&note);
    Ok(Html(ui::edit_note_page(&user, note.id.to_string(), draft, None)))
}

/// Updating a note the user does not own is a silent no-op.
pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditNoteForm>,
) -> Result<Response, AppError> {
    let Some(note_id) = parse_id(&id) else {
        return Ok(Redirect::to(DASHBOARD).into_response());
    };

    let changes = match NoteChanges::new(&form.title, form.content.as_deref()) {
        Ok(changes) => changes,
        Err(StoreError::Validation(message)) => {
            let draft = NoteDraft {
                title: form.title,
                content: form.content.unwrap_or_default(),
                tags: String::new(),
            };
            let page = ui::edit_note_page(&user, id, draft, Some(message));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let updated = state
        .notes
        .update_by_owner_and_id(user.id, note_id, changes)
        .await?;
    debug!(user_id = %user.id, %note_id, updated, "note update");
    Ok(Redirect::to(DASHBOARD).into_response())
}

/// Same contract as [`update`]: foreign or missing notes are left alone.
pub async fn destroy(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    if let Some(note_id) = parse_id(&id) {
        let deleted = state.notes.delete_by_owner_and_id(user.id, note_id).await?;
        debug!(user_id = %user.id, %note_id, deleted, "note delete");
    }
    Ok(Redirect::to(DASHBOARD))
}

pub async fn search_form(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(ui::search_page(&user, String::new(), None))
}

pub async fn search(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let results = match sanitize_query(&form.search_input) {
        Some(query) => state.notes.search_by_owner(user.id, &query).await?,
        None => Vec::new(),
    };
    Ok(Html(ui::search_page(&user, form.search_input, Some(results))))
}
