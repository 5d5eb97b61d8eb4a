use std::sync::RwLock;

/// The signed in user whose reminders are kept in sync
#[derive(Debug, Default)]
pub struct Session {
    user_id: RwLock<Option<String>>,
}

impl Session {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id: RwLock::new(user_id),
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns the user that was signed in before
    pub fn start(&self, user_id: String) -> Option<String> {
        self.user_id
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(user_id)
    }

    pub fn end(&self) -> Option<String> {
        self.user_id
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}
