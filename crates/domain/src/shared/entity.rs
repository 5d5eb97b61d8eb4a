/// Anything that is kept in a repository and identified by an opaque string key.
///
/// Reminder ids are computed by the backend and alarm ids are either those same
/// ids or derived snooze ids, so there is no id format to enforce here.
pub trait Entity {
    fn id(&self) -> &str;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
