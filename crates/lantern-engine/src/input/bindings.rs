use std::collections::HashMap;

use super::Key;

/// Action-name ↔ key bindings.
///
/// Games bind human-readable action names ("UP", "FIRE") to keys; the inverse
/// map is maintained automatically and drives key-release dispatch to
/// [`State::on_key`](crate::state::State::on_key). This is the typed,
/// enumerable table that replaces per-action method lookup.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_name: HashMap<String, Key>,
    by_key: HashMap<Key, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `action` to `key`, replacing any previous binding of either.
    pub fn bind(&mut self, action: impl Into<String>, key: Key) {
        let action = action.into();
        if let Some(old_key) = self.by_name.insert(action.clone(), key) {
            self.by_key.remove(&old_key);
        }
        if let Some(old_action) = self.by_key.insert(key, action) {
            // The key was bound to a different action; drop the stale forward entry.
            if self.by_name.get(&old_action).copied() == Some(key) {
                self.by_name.remove(&old_action);
            }
        }
    }

    /// Builder-style [`bind`](Self::bind).
    pub fn with(mut self, action: impl Into<String>, key: Key) -> Self {
        self.bind(action, key);
        self
    }

    pub fn key_for(&self, action: &str) -> Option<Key> {
        self.by_name.get(action).copied()
    }

    pub fn action_for(&self, key: Key) -> Option<&str> {
        self.by_key.get(&key).map(String::as_str)
    }

    /// Iterates all `(action, key)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Key)> {
        self.by_name.iter().map(|(a, k)| (a.as_str(), *k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_builds_the_inverse() {
        let b = Bindings::new().with("UP", Key::ArrowUp);
        assert_eq!(b.key_for("UP"), Some(Key::ArrowUp));
        assert_eq!(b.action_for(Key::ArrowUp), Some("UP"));
    }

    #[test]
    fn rebinding_an_action_drops_the_old_key() {
        let b = Bindings::new()
            .with("UP", Key::ArrowUp)
            .with("UP", Key::W);

        assert_eq!(b.key_for("UP"), Some(Key::W));
        assert_eq!(b.action_for(Key::ArrowUp), None);
        assert_eq!(b.action_for(Key::W), Some("UP"));
    }

    #[test]
    fn rebinding_a_key_drops_the_old_action() {
        let b = Bindings::new()
            .with("UP", Key::W)
            .with("FORWARD", Key::W);

        assert_eq!(b.action_for(Key::W), Some("FORWARD"));
        assert_eq!(b.key_for("UP"), None);
    }
}
