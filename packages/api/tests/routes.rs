//! End-to-end tests of the router.
//!
//! Each test builds the full app over an in-memory store, an in-memory session
//! store and fake Google/quote providers, then drives it with
//! `tower::ServiceExt::oneshot`. Signing in goes through the real
//! `/auth/google` -> `/google/callback` round trip, carrying the session cookie
//! by hand.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_sessions::{MemoryStore as SessionStore, SessionManagerLayer};
use uuid::Uuid;

use api::auth::{AuthorizationRequest, IdentityProvider, ProviderError};
use api::quotes::{QuoteError, QuoteSource};
use api::{router, with_method_override, App, AppState};
use store::{
    ExternalProfile, MemoryStore, NewNote, Note, NoteChanges, NoteStore, StoreError, User,
    UserDirectory,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Hands out a fresh state per sign-in; the code names the Google account.
#[derive(Default)]
struct FakeGoogle {
    issued: AtomicUsize,
}

fn profile(code: &str) -> ExternalProfile {
    let mut name = code.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    ExternalProfile {
        provider_id: format!("google-{code}"),
        display_name: name.clone(),
        given_name: Some(name),
        family_name: None,
        avatar_url: Some(format!("https://example.com/{code}.png")),
    }
}

#[async_trait]
impl IdentityProvider for FakeGoogle {
    fn authorize(&self) -> AuthorizationRequest {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let csrf_state = format!("state{n}");
        AuthorizationRequest {
            url: format!("https://accounts.example.com/o/oauth2/auth?client_id=test&state={csrf_state}"),
            csrf_state,
            pkce_verifier: format!("verifier{n}"),
        }
    }

    async fn exchange(&self, code: &str, pkce_verifier: &str) -> Result<ExternalProfile, ProviderError> {
        if code == "bad" || !pkce_verifier.starts_with("verifier") {
            return Err(ProviderError::TokenExchange("invalid_grant".to_string()));
        }
        Ok(profile(code))
    }
}

/// Answers every category with a canned payload, remembering what was asked.
#[derive(Default)]
struct FakeQuotes {
    categories: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl QuoteSource for FakeQuotes {
    async fn fetch(&self, category: &str) -> Result<Value, QuoteError> {
        self.categories.lock().unwrap().push(category.to_string());
        if self.fail {
            // A relative URL fails inside reqwest before any I/O.
            let err = reqwest::Client::new().get("not a url").send().await.unwrap_err();
            return Err(err.into());
        }
        Ok(json!([{ "quote": "Keep going.", "author": "Anon", "category": category }]))
    }
}

/// Counts every store call so tests can assert the guard ran first.
#[derive(Clone, Default)]
struct CountingStore {
    inner: MemoryStore,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for CountingStore {
    async fn find_or_create_by_external_profile(&self, profile: &ExternalProfile) -> Result<User, StoreError> {
        self.hit();
        self.inner.find_or_create_by_external_profile(profile).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }
}

#[async_trait]
impl NoteStore for CountingStore {
    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Uuid, StoreError> {
        self.hit();
        self.inner.create(owner, note).await
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        self.hit();
        self.inner.list_by_owner(owner).await
    }

    async fn get_by_owner_and_id(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>, StoreError> {
        self.hit();
        self.inner.get_by_owner_and_id(owner, id).await
    }

    async fn update_by_owner_and_id(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<bool, StoreError> {
        self.hit();
        self.inner.update_by_owner_and_id(owner, id, changes).await
    }

    async fn delete_by_owner_and_id(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.hit();
        self.inner.delete_by_owner_and_id(owner, id).await
    }

    async fn search_by_owner(&self, owner: Uuid, raw_query: &str) -> Result<Vec<Note>, StoreError> {
        self.hit();
        self.inner.search_by_owner(owner, raw_query).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    app: App,
    store: CountingStore,
    quotes: Arc<FakeQuotes>,
}

fn setup() -> Harness {
    setup_with_quotes(FakeQuotes::default())
}

fn setup_with_quotes(quotes: FakeQuotes) -> Harness {
    let store = CountingStore::default();
    let quotes = Arc::new(quotes);
    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(FakeGoogle::default()),
        quotes.clone(),
    );
    let sessions = SessionManagerLayer::new(SessionStore::default()).with_secure(false);
    let app = with_method_override(router(state, "public").layer(sessions));
    Harness { app, store, quotes }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &App, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` of the session cookie set by this response, if any.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(str::to_string)
}

/// Sign in as the Google account `code` and return the session cookie.
async fn sign_in(app: &App, code: &str) -> String {
    let start = send(app, get("/auth/google", None)).await;
    assert_eq!(start.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&start).expect("pending login cookie");
    let state = location(&start)
        .split("state=")
        .nth(1)
        .expect("state in provider url")
        .to_string();

    let callback = send(
        app,
        get(&format!("/google/callback?code={code}&state={state}"), Some(&cookie)),
    )
    .await;
    assert_eq!(callback.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&callback), "/dashboard");
    session_cookie(&callback).unwrap_or(cookie)
}

async fn user_for(harness: &Harness, code: &str) -> User {
    harness
        .store
        .inner
        .find_or_create_by_external_profile(&profile(code))
        .await
        .unwrap()
}

async fn notes_of(harness: &Harness, code: &str) -> Vec<Note> {
    let user = user_for(harness, code).await;
    harness.store.inner.list_by_owner(user.id).await.unwrap()
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_home_page() {
    let h = setup();
    let response = send(&h.app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("/auth/google"));
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let h = setup();
    let response = send(&h.app, get("/no/such/page", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_about_shows_quote_from_default_category() {
    let h = setup();
    let response = send(&h.app, get("/about", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Keep going."));
    assert_eq!(*h.quotes.categories.lock().unwrap(), vec!["happiness".to_string()]);
}

#[tokio::test]
async fn test_about_renders_when_quotes_fail() {
    let h = setup_with_quotes(FakeQuotes {
        fail: true,
        ..Default::default()
    });
    let response = send(&h.app, get("/about", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("Keep going."));
}

#[tokio::test]
async fn test_quotes_passthrough() {
    let h = setup();

    let response = send(&h.app, get("/api/quotes?keyword=love", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body[0]["category"], "love");

    send(&h.app, get("/api/quotes", None)).await;
    assert_eq!(
        *h.quotes.categories.lock().unwrap(),
        vec!["love".to_string(), "happiness".to_string()]
    );
}

#[tokio::test]
async fn test_quotes_upstream_failure() {
    let h = setup_with_quotes(FakeQuotes {
        fail: true,
        ..Default::default()
    });
    let response = send(&h.app, get("/api/quotes?keyword=love", None)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!({ "error": "Error fetching quotes" }));
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_anonymous_dashboard_requests_are_rejected_before_the_store() {
    let h = setup();
    let id = Uuid::new_v4();
    let requests = vec![
        get("/dashboard", None),
        get("/dashboard/create", None),
        form("/dashboard/create", None, "title=Sneaky"),
        get(&format!("/dashboard/edit/{id}"), None),
        form(&format!("/dashboard/edit/{id}?_method=PUT"), None, "title=Sneaky"),
        form(&format!("/dashboard/delete/{id}?_method=DELETE"), None, ""),
        get("/dashboard/search", None),
        form("/dashboard/search", None, "searchInput=anything"),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_text(response).await, "You must be logged in to view this page");
    }
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn test_deleted_user_is_treated_as_signed_out() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;
    let alice = user_for(&h, "alice").await;
    h.store.inner.remove_user(alice.id);

    let response = send(&h.app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_in_creates_user_once() {
    let h = setup();

    let cookie = sign_in(&h.app, "alice").await;
    let response = send(&h.app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Hi, Alice"));
    assert!(html.contains("You have no notes yet."));

    sign_in(&h.app, "alice").await;
    assert_eq!(h.store.inner.user_count(), 1);
}

#[tokio::test]
async fn test_sign_in_redirects_to_provider() {
    let h = setup();
    let response = send(&h.app, get("/auth/google", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("https://accounts.example.com/"));
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_callback_with_wrong_state_does_not_sign_in() {
    let h = setup();
    let start = send(&h.app, get("/auth/google", None)).await;
    let cookie = session_cookie(&start).unwrap();

    let callback = send(
        &h.app,
        get("/google/callback?code=alice&state=forged", Some(&cookie)),
    )
    .await;
    assert_eq!(callback.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&callback), "/");

    let response = send(&h.app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(h.store.inner.user_count(), 0);
}

#[tokio::test]
async fn test_callback_failures_redirect_home() {
    let h = setup();

    // No pending login at all.
    let response = send(&h.app, get("/google/callback?code=alice&state=state0", None)).await;
    assert_eq!(location(&response), "/");

    // User declined at the consent screen.
    let start = send(&h.app, get("/auth/google", None)).await;
    let cookie = session_cookie(&start).unwrap();
    let response = send(
        &h.app,
        get("/google/callback?error=access_denied&state=state1", Some(&cookie)),
    )
    .await;
    assert_eq!(location(&response), "/");

    // Token exchange rejected by the provider.
    let start = send(&h.app, get("/auth/google", None)).await;
    let cookie = session_cookie(&start).unwrap();
    let response = send(
        &h.app,
        get("/google/callback?code=bad&state=state2", Some(&cookie)),
    )
    .await;
    assert_eq!(location(&response), "/");

    assert_eq!(h.store.inner.user_count(), 0);
}

#[tokio::test]
async fn test_malformed_callback_query_redirects_home() {
    let h = setup();
    let start = send(&h.app, get("/auth/google", None)).await;
    let cookie = session_cookie(&start).unwrap();

    let response = send(
        &h.app,
        get("/google/callback?code=alice&code=bob&state=state0", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(h.store.inner.user_count(), 0);
}

#[tokio::test]
async fn test_pending_login_is_single_use() {
    let h = setup();
    let start = send(&h.app, get("/auth/google", None)).await;
    let cookie = session_cookie(&start).unwrap();

    let first = send(&h.app, get("/google/callback?code=alice&state=state0", Some(&cookie))).await;
    assert_eq!(location(&first), "/dashboard");
    let replay = send(&h.app, get("/google/callback?code=mallory&state=state0", Some(&cookie))).await;
    assert_eq!(location(&replay), "/");
    assert_eq!(h.store.inner.user_count(), 1);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;

    let response = send(&h.app, get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = send(&h.app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_note_lifecycle() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;

    let response = send(
        &h.app,
        form(
            "/dashboard/create",
            Some(&cookie),
            "title=Groceries&content=eggs+and+milk&tags=home%2C+errands",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let notes = notes_of(&h, "alice").await;
    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content.as_deref(), Some("eggs and milk"));
    assert_eq!(note.tags, vec!["errands".to_string(), "home".to_string()]);

    let html = body_text(send(&h.app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("Groceries"));

    let edit = send(&h.app, get(&format!("/dashboard/edit/{}", note.id), Some(&cookie))).await;
    assert_eq!(edit.status(), StatusCode::OK);
    assert!(body_text(edit).await.contains("eggs and milk"));

    let response = send(
        &h.app,
        form(
            &format!("/dashboard/edit/{}?_method=PUT", note.id),
            Some(&cookie),
            "title=Shopping&content=bread",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let updated = &notes_of(&h, "alice").await[0];
    assert_eq!(updated.title, "Shopping");
    assert_eq!(updated.content.as_deref(), Some("bread"));
    assert_eq!(updated.id, note.id);

    let response = send(
        &h.app,
        form(&format!("/dashboard/delete/{}?_method=DELETE", note.id), Some(&cookie), ""),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(notes_of(&h, "alice").await.is_empty());
}

#[tokio::test]
async fn test_blank_title_rerenders_form() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;

    let response = send(
        &h.app,
        form("/dashboard/create", Some(&cookie), "title=+++&content=draft+text"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Title is required"));
    assert!(html.contains("draft text"));
    assert!(notes_of(&h, "alice").await.is_empty());
}

#[tokio::test]
async fn test_blank_title_on_update_keeps_note() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;
    send(&h.app, form("/dashboard/create", Some(&cookie), "title=Keep+me")).await;
    let note = notes_of(&h, "alice").await.remove(0);

    let response = send(
        &h.app,
        form(&format!("/dashboard/edit/{}?_method=PUT", note.id), Some(&cookie), "title="),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Title is required"));
    assert_eq!(notes_of(&h, "alice").await[0].title, "Keep me");
}

#[tokio::test]
async fn test_unknown_form_fields_are_rejected() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;
    let owner = Uuid::new_v4();

    let response = send(
        &h.app,
        form("/dashboard/create", Some(&cookie), &format!("title=x&user_id={owner}")),
    )
    .await;
    assert!(response.status().is_client_error());
    assert!(notes_of(&h, "alice").await.is_empty());
}

#[tokio::test]
async fn test_edit_missing_note_is_404() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;

    let response = send(&h.app, get(&format!("/dashboard/edit/{}", Uuid::new_v4()), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&h.app, get("/dashboard/edit/not-a-uuid", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notes_are_isolated_between_users() {
    let h = setup();
    let alice = sign_in(&h.app, "alice").await;
    let bob = sign_in(&h.app, "bob").await;

    send(&h.app, form("/dashboard/create", Some(&alice), "title=Secret+plans&content=moon")).await;
    let note = notes_of(&h, "alice").await.remove(0);

    let html = body_text(send(&h.app, get("/dashboard", Some(&bob))).await).await;
    assert!(html.contains("Hi, Bob"));
    assert!(!html.contains("Secret plans"));

    let response = send(&h.app, get(&format!("/dashboard/edit/{}", note.id), Some(&bob))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &h.app,
        form(&format!("/dashboard/edit/{}?_method=PUT", note.id), Some(&bob), "title=Hijacked"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = send(
        &h.app,
        form(&format!("/dashboard/delete/{}?_method=DELETE", note.id), Some(&bob), ""),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = body_text(send(&h.app, form("/dashboard/search", Some(&bob), "searchInput=secret")).await).await;
    assert!(html.contains("No notes match your search."));

    let remaining = notes_of(&h, "alice").await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Secret plans");
}

#[tokio::test]
async fn test_search() {
    let h = setup();
    let cookie = sign_in(&h.app, "alice").await;
    send(&h.app, form("/dashboard/create", Some(&cookie), "title=Rust+ownership&content=borrowing")).await;
    send(&h.app, form("/dashboard/create", Some(&cookie), "title=Groceries&content=Eggs")).await;

    let initial = send(&h.app, get("/dashboard/search", Some(&cookie))).await;
    assert_eq!(initial.status(), StatusCode::OK);
    assert!(!body_text(initial).await.contains("No notes match"));

    let html = body_text(send(&h.app, form("/dashboard/search", Some(&cookie), "searchInput=RUST")).await).await;
    assert!(html.contains("Rust ownership"));
    assert!(!html.contains("Groceries"));

    // Matches content too, and punctuation is stripped before matching.
    let html = body_text(send(&h.app, form("/dashboard/search", Some(&cookie), "searchInput=eggs%21")).await).await;
    assert!(html.contains("Groceries"));
    assert!(!html.contains("Rust ownership"));

    let calls = h.store.calls();
    let html = body_text(send(&h.app, form("/dashboard/search", Some(&cookie), "searchInput=%21%21%21")).await).await;
    assert!(html.contains("No notes match your search."));
    // Only the guard's user lookup; nothing was searched.
    assert_eq!(h.store.calls(), calls + 1);
}
