use std::sync::Arc;

use store::{NoteStore, UserDirectory};

use crate::auth::IdentityProvider;
use crate::quotes::QuoteSource;

/// Collaborators shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub notes: Arc<dyn NoteStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub quotes: Arc<dyn QuoteSource>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        notes: Arc<dyn NoteStore>,
        identity: Arc<dyn IdentityProvider>,
        quotes: Arc<dyn QuoteSource>,
    ) -> Self {
        Self {
            users,
            notes,
            identity,
            quotes,
        }
    }
}
