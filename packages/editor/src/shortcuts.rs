//! # Shortcut Dispatcher
//!
//! Maps modifier-key combos to editor actions. A combo is the ordered
//! modifier list plus the lowercased key; matching is an exact join
//! comparison. Non-global shortcuts only fire while the key event's
//! target sits inside the active editable region, and held-key repeats
//! of a fired combo are swallowed so one-shot actions fire once.

use crate::host::TextCommand;
use crate::input::KeyEvent;
use std::collections::HashMap;

/// What a matched shortcut does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Forward a rich-text command to the host
    Format(TextCommand),

    /// Open the link prompt for the current selection
    Link,

    /// Request a save of all changed sections
    Save,

    /// Request a publish
    Publish,
}

/// One registered shortcut
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Ordered modifier names plus the key, e.g. `["ctrl", "b"]`
    pub combo: Vec<String>,

    pub action: EditorAction,

    /// Global shortcuts fire regardless of where focus is
    pub global: bool,
}

impl Shortcut {
    pub fn new(combo: &[&str], action: EditorAction, global: bool) -> Self {
        Self {
            combo: combo.iter().map(|p| p.to_string()).collect(),
            action,
            global,
        }
    }
}

/// Result of dispatching one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Shortcut matched and its action should run; consume the event
    Fired(EditorAction),

    /// Held-key repeat of an already-fired combo; consume, run nothing
    Swallowed,

    /// No applicable shortcut; leave the event untouched
    Pass,
}

/// Registered shortcut table
#[derive(Debug, Default)]
pub struct ShortcutMap {
    bindings: HashMap<String, Shortcut>,
    held: Option<String>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock bindings for the standard toolbar actions
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        map.bind(Shortcut::new(
            &["ctrl", "b"],
            EditorAction::Format(TextCommand::Bold),
            false,
        ));
        map.bind(Shortcut::new(
            &["ctrl", "i"],
            EditorAction::Format(TextCommand::Italic),
            false,
        ));
        map.bind(Shortcut::new(
            &["ctrl", "u"],
            EditorAction::Format(TextCommand::Underline),
            false,
        ));
        map.bind(Shortcut::new(&["ctrl", "k"], EditorAction::Link, false));
        map.bind(Shortcut::new(&["ctrl", "s"], EditorAction::Save, true));
        map.bind(Shortcut::new(
            &["ctrl", "shift", "p"],
            EditorAction::Publish,
            true,
        ));
        map
    }

    /// Register a shortcut, replacing any previous binding of the combo
    pub fn bind(&mut self, shortcut: Shortcut) {
        self.bindings.insert(shortcut.combo.join("+"), shortcut);
    }

    /// Dispatch a key event. `in_active_region` says whether the event
    /// target lies inside the region currently being edited.
    pub fn dispatch(&mut self, event: &KeyEvent, in_active_region: bool) -> Dispatch {
        let combo = event.combo();
        let Some(shortcut) = self.bindings.get(&combo) else {
            return Dispatch::Pass;
        };

        if !shortcut.global && !in_active_region {
            return Dispatch::Pass;
        }

        if event.repeat && self.held.as_deref() == Some(combo.as_str()) {
            return Dispatch::Swallowed;
        }

        self.held = Some(combo);
        Dispatch::Fired(shortcut.action.clone())
    }

    /// Notify the dispatcher that a key was released
    pub fn release(&mut self, key: &str) {
        let released = key.to_lowercase();
        let matches_held = self
            .held
            .as_deref()
            .and_then(|combo| combo.rsplit('+').next())
            .map(|held_key| held_key == released)
            .unwrap_or(false);
        if matches_held {
            self.held = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(key: &str, repeat: bool) -> KeyEvent {
        KeyEvent {
            key: key.to_string(),
            ctrl: true,
            shift: false,
            alt: false,
            repeat,
            target: None,
        }
    }

    #[test]
    fn test_non_global_requires_active_region() {
        let mut map = ShortcutMap::with_defaults();

        assert_eq!(map.dispatch(&ctrl("b", false), false), Dispatch::Pass);
        assert_eq!(
            map.dispatch(&ctrl("b", false), true),
            Dispatch::Fired(EditorAction::Format(TextCommand::Bold))
        );
    }

    #[test]
    fn test_global_fires_anywhere() {
        let mut map = ShortcutMap::with_defaults();
        assert_eq!(
            map.dispatch(&ctrl("s", false), false),
            Dispatch::Fired(EditorAction::Save)
        );
    }

    #[test]
    fn test_combo_match_is_order_sensitive() {
        let mut map = ShortcutMap::new();
        map.bind(Shortcut::new(&["ctrl", "shift", "p"], EditorAction::Publish, true));

        let event = KeyEvent {
            key: "p".to_string(),
            ctrl: true,
            shift: true,
            alt: false,
            repeat: false,
            target: None,
        };
        assert_eq!(map.dispatch(&event, false), Dispatch::Fired(EditorAction::Publish));

        // Same key without shift builds a different combo.
        assert_eq!(map.dispatch(&ctrl("p", false), false), Dispatch::Pass);
    }

    #[test]
    fn test_held_key_repeats_are_swallowed() {
        let mut map = ShortcutMap::with_defaults();

        assert!(matches!(map.dispatch(&ctrl("b", false), true), Dispatch::Fired(_)));
        assert_eq!(map.dispatch(&ctrl("b", true), true), Dispatch::Swallowed);
        assert_eq!(map.dispatch(&ctrl("b", true), true), Dispatch::Swallowed);

        map.release("b");
        assert!(matches!(map.dispatch(&ctrl("b", false), true), Dispatch::Fired(_)));
    }

    #[test]
    fn test_unbound_combo_passes_through() {
        let mut map = ShortcutMap::with_defaults();
        assert_eq!(map.dispatch(&ctrl("q", false), true), Dispatch::Pass);
    }
}
