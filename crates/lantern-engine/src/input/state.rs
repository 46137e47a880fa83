use std::collections::HashSet;

use super::{Bindings, Key};

/// Current keyboard state: bindings plus the held-key set.
///
/// The runtime feeds presses/releases in; game code queries by action name.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: Bindings,
    pressed: HashSet<Key>,
}

impl InputState {
    pub(crate) fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// True while the key bound to `action` is held. Unbound actions are
    /// never down.
    pub fn key_down(&self, action: &str) -> bool {
        self.bindings
            .key_for(action)
            .is_some_and(|key| self.pressed.contains(&key))
    }

    /// True if any of the listed actions is down.
    pub fn any_down<'a>(&self, actions: impl IntoIterator<Item = &'a str>) -> bool {
        actions.into_iter().any(|action| self.key_down(action))
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub(crate) fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub(crate) fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Clears held keys. Used on state switches so a key held across the
    /// transition cannot stick.
    pub(crate) fn clear_pressed(&mut self) {
        self.pressed.clear();
    }
}
