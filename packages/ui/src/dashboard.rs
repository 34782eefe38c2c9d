use dioxus::prelude::*;

use store::{Note, User};

use crate::layout::DashboardLayout;

/// Highlighted entry in the dashboard navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePage {
    Dashboard,
    Create,
    Search,
}

/// Form contents, either submitted by the user or loaded from a note.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl NoteDraft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone().unwrap_or_default(),
            tags: note.tags.join(", "),
        }
    }
}

const EXCERPT_CHARS: usize = 160;

fn excerpt(content: Option<&str>) -> String {
    let content = content.unwrap_or_default();
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    if content.chars().count() > EXCERPT_CHARS {
        out.push('…');
    }
    out
}

#[component]
pub fn DashboardPage(user: User, notes: Vec<Note>) -> Element {
    let count = notes.len();
    let name = user.display_name.clone();
    rsx! {
        DashboardLayout {
            title: "Dashboard".to_string(),
            user: user.clone(),
            active: ActivePage::Dashboard,
            section {
                class: "notes",
                h1 { "Hi, {name}" }
                if notes.is_empty() {
                    p {
                        class: "empty",
                        "You have no notes yet. "
                        a { href: "/dashboard/create", "Create your first note" }
                    }
                } else {
                    p { class: "count", "{count} notes" }
                    NoteList { notes: notes.clone() }
                }
                nav {
                    class: "pagination",
                    "Page 1 of 1"
                }
            }
        }
    }
}

#[component]
fn NoteList(notes: Vec<Note>) -> Element {
    rsx! {
        ul {
            class: "note-list",
            for note in notes.iter() {
                NoteCard { note: note.clone() }
            }
        }
    }
}

#[component]
fn NoteCard(note: Note) -> Element {
    let id = note.id.to_string();
    let title = note.title.clone();
    let summary = excerpt(note.content.as_deref());
    let created = note.created_at.format("%b %d, %Y").to_string();
    let tags = note.tags.clone();

    rsx! {
        li {
            class: "note-card",
            a { class: "note-title", href: "/dashboard/edit/{id}", "{title}" }
            p { class: "note-excerpt", "{summary}" }
            ul {
                class: "tags",
                for tag in tags.iter() {
                    li { class: "tag", "{tag}" }
                }
            }
            time { class: "created", "{created}" }
            form {
                class: "delete",
                method: "post",
                action: "/dashboard/delete/{id}?_method=DELETE",
                button { r#type: "submit", "Delete" }
            }
        }
    }
}

#[component]
fn NoteFields(draft: NoteDraft, #[props(default)] with_tags: bool) -> Element {
    let NoteDraft { title, content, tags } = draft;
    rsx! {
        label { r#for: "title", "Title" }
        input {
            id: "title",
            r#type: "text",
            name: "title",
            value: "{title}",
            required: true,
            placeholder: "Title",
        }
        label { r#for: "content", "Content" }
        textarea { id: "content", name: "content", rows: "12", "{content}" }
        if with_tags {
            label { r#for: "tags", "Tags" }
            input {
                id: "tags",
                r#type: "text",
                name: "tags",
                value: "{tags}",
                placeholder: "Comma-separated, e.g. work, ideas",
            }
        }
    }
}

#[component]
fn FormError(#[props(!optional)] error: Option<String>) -> Element {
    rsx! {
        {error.map(|message| rsx! {
            p { class: "form-error", role: "alert", "{message}" }
        })}
    }
}

#[component]
pub fn CreateNotePage(user: User, draft: NoteDraft, #[props(!optional)] error: Option<String>) -> Element {
    rsx! {
        DashboardLayout {
            title: "Create Note".to_string(),
            user: user,
            active: ActivePage::Create,
            section {
                class: "note-editor",
                h1 { "New note" }
                FormError { error: error }
                form {
                    method: "post",
                    action: "/dashboard/create",
                    NoteFields { draft: draft, with_tags: true }
                    button { r#type: "submit", "Save" }
                }
            }
        }
    }
}

#[component]
pub fn EditNotePage(
    user: User,
    note_id: String,
    draft: NoteDraft,
    #[props(!optional)] error: Option<String>,
) -> Element {
    rsx! {
        DashboardLayout {
            title: "Edit Note".to_string(),
            user: user,
            active: ActivePage::Dashboard,
            section {
                class: "note-editor",
                h1 { "Edit note" }
                FormError { error: error }
                form {
                    method: "post",
                    action: "/dashboard/edit/{note_id}?_method=PUT",
                    NoteFields { draft: draft }
                    button { r#type: "submit", "Update" }
                }
                form {
                    class: "delete",
                    method: "post",
                    action: "/dashboard/delete/{note_id}?_method=DELETE",
                    button { r#type: "submit", "Delete" }
                }
            }
        }
    }
}

#[component]
pub fn SearchPage(user: User, query: String, #[props(!optional)] results: Option<Vec<Note>>) -> Element {
    rsx! {
        DashboardLayout {
            title: "Dashboard".to_string(),
            user: user,
            active: ActivePage::Search,
            section {
                class: "search",
                h1 { "Search notes" }
                form {
                    method: "post",
                    action: "/dashboard/search",
                    input {
                        r#type: "search",
                        name: "searchInput",
                        value: "{query}",
                        placeholder: "Search your notes",
                    }
                    button { r#type: "submit", "Search" }
                }
                {results.map(|notes| rsx! {
                    if notes.is_empty() {
                        p { class: "empty", "No notes match your search." }
                    } else {
                        NoteList { notes: notes.clone() }
                    }
                })}
            }
        }
    }
}
