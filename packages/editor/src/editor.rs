//! # Editor Controller
//!
//! Top-level object owning every collaborator: registry, session
//! controller, shortcut table, toolbar, prompt slot, locale, config,
//! host page and preference store. Nothing is ambient global state, so
//! multiple independent editor instances can coexist and tests stay
//! deterministic.

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::host::{HostPage, TextCommand};
use crate::input::{KeyDisposition, KeyEvent, PointerEvent};
use crate::locale::{Locale, LANGUAGE_PREF_KEY};
use crate::prompt::{ModalPrompt, PromptOutcome};
use crate::registry::SectionRegistry;
use crate::session::SessionController;
use crate::shortcuts::{Dispatch, EditorAction, ShortcutMap};
use crate::toolbar::{Point, Toolbar};
use inlay_common::PreferenceStore;
use inlay_dom::{closest_matching, DocumentTree, NodeId};
use tracing::debug;

/// Default toolbar footprint; the host may render it any size it wants,
/// these bounds only drive anchoring and hit testing.
const TOOLBAR_WIDTH: f64 = 320.0;
const TOOLBAR_HEIGHT: f64 = 40.0;

/// A network operation the editor wants the sync layer to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncIntent {
    Save,
    Publish,
}

/// One editor instance over one document tree
pub struct Editor {
    config: EditorConfig,
    registry: SectionRegistry,
    session: SessionController,
    shortcuts: ShortcutMap,
    toolbar: Toolbar,
    prompt: Option<ModalPrompt>,
    locale: Locale,
    host: Box<dyn HostPage>,
    store: Box<dyn PreferenceStore>,
    requested_sync: Option<SyncIntent>,
}

impl Editor {
    /// Build an editor; configuration is validated fail-fast and the
    /// persisted language preference is restored.
    pub fn new(
        config: EditorConfig,
        host: Box<dyn HostPage>,
        store: Box<dyn PreferenceStore>,
    ) -> Result<Self, EditorError> {
        config.validate()?;

        let mut locale = Locale::with_builtin();
        let language = store
            .get(LANGUAGE_PREF_KEY)
            .or_else(|| config.language.clone());
        if let Some(code) = language {
            locale.set_language(&code);
        }

        Ok(Self {
            config,
            registry: SectionRegistry::new(),
            session: SessionController::new(),
            shortcuts: ShortcutMap::with_defaults(),
            toolbar: Toolbar::new(TOOLBAR_WIDTH, TOOLBAR_HEIGHT),
            prompt: None,
            locale,
            host,
            store,
            requested_sync: None,
        })
    }

    /// Scan the tree for editable regions and register them.
    /// Returns the number of sections registered.
    pub fn attach(&mut self, tree: &DocumentTree) -> usize {
        let tags = self.config.editable_tags();
        let count = self.registry.scan(tree, &tags, &self.config.page);
        debug!(sections = count, page = %self.config.page, "editor attached");
        count
    }

    /// Handle a pointer-activation event.
    ///
    /// Inside a registered region (or any descendant): start editing it.
    /// Inside the toolbar or while a prompt is open: keep the session.
    /// Anywhere else: end the active session.
    pub fn pointer_down(&mut self, tree: &mut DocumentTree, event: &PointerEvent) {
        if self.prompt.is_some() {
            return;
        }
        if self.toolbar.contains(Point {
            x: event.x,
            y: event.y,
        }) {
            return;
        }

        let region = event.target.and_then(|target| {
            let registry = &self.registry;
            closest_matching(tree, target, |id, _| registry.find_by_node(id).is_some())
        });

        match region {
            Some(node) => self.begin_edit(tree, node),
            None => self.end_edit(tree),
        }
    }

    /// Handle a key-down event, dispatching registered shortcuts
    pub fn key_down(&mut self, tree: &mut DocumentTree, event: &KeyEvent) -> KeyDisposition {
        let in_active_region = match (self.session.active_node(), event.target) {
            (Some(active), Some(target)) => tree.contains(active, target),
            _ => false,
        };

        match self.shortcuts.dispatch(event, in_active_region) {
            Dispatch::Fired(action) => {
                self.run_action(tree, action);
                KeyDisposition::Consumed
            }
            Dispatch::Swallowed => KeyDisposition::Consumed,
            Dispatch::Pass => KeyDisposition::Pass,
        }
    }

    /// Handle a key-up event (resets held-key repeat suppression)
    pub fn key_up(&mut self, key: &str) {
        self.shortcuts.release(key);
    }

    /// End the active edit session; idempotent
    pub fn end_edit(&mut self, tree: &mut DocumentTree) {
        self.session.exit(tree, &mut self.registry);
        self.toolbar.hide();
    }

    /// Flush the active region's live content into its section without
    /// ending the session. Callers must do this before reading the
    /// dirty set for a save.
    pub fn flush_active(&mut self, tree: &DocumentTree) {
        self.session.flush(tree, &mut self.registry);
    }

    /// Take the pending save/publish request, if a shortcut raised one.
    /// The host forwards it to the sync layer.
    pub fn take_sync_intent(&mut self) -> Option<SyncIntent> {
        self.requested_sync.take()
    }

    /// Open a modal prompt; suppresses session-ending pointer events
    pub fn open_prompt(&mut self, message: impl Into<String>) {
        self.prompt = Some(ModalPrompt::new(message));
    }

    /// Update the open prompt's input value
    pub fn set_prompt_value(&mut self, value: impl Into<String>) {
        if let Some(prompt) = &mut self.prompt {
            prompt.value = value.into();
        }
    }

    /// Submit the open prompt. A submitted link prompt applies a
    /// `CreateLink` command to the active region.
    pub fn submit_prompt(&mut self, tree: &mut DocumentTree) -> PromptOutcome {
        let Some(prompt) = self.prompt.take() else {
            return PromptOutcome::Cancelled;
        };

        if let Some(node) = self.session.active_node() {
            self.host.exec_command(
                tree,
                node,
                &TextCommand::CreateLink {
                    url: prompt.value.clone(),
                },
            );
        }
        PromptOutcome::Submitted(prompt.value)
    }

    /// Dismiss the open prompt without applying anything
    pub fn cancel_prompt(&mut self) -> PromptOutcome {
        self.prompt = None;
        PromptOutcome::Cancelled
    }

    /// Switch the UI language and persist the choice
    pub fn set_language(&mut self, code: &str) -> Result<(), EditorError> {
        self.locale.set_language(code);
        self.store.set(LANGUAGE_PREF_KEY, self.locale.language())?;
        Ok(())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SectionRegistry {
        &mut self.registry
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMap {
        &mut self.shortcuts
    }

    /// Node currently being edited, if any
    pub fn active_node(&self) -> Option<NodeId> {
        self.session.active_node()
    }

    pub fn prompt(&self) -> Option<&ModalPrompt> {
        self.prompt.as_ref()
    }

    fn begin_edit(&mut self, tree: &mut DocumentTree, node: NodeId) {
        if self.session.active_node() == Some(node) {
            return;
        }

        // Force close the previous region so its content is flushed.
        self.end_edit(tree);
        self.session.enter(tree, node);

        let bounds = self.host.measure(tree, node);
        self.toolbar.show_for(bounds, self.host.viewport());
    }

    fn run_action(&mut self, tree: &mut DocumentTree, action: EditorAction) {
        match action {
            EditorAction::Format(command) => {
                if let Some(node) = self.session.active_node() {
                    self.host.exec_command(tree, node, &command);
                }
            }
            EditorAction::Link => {
                let message = self
                    .locale
                    .get("prompt.link")
                    .unwrap_or("Link address")
                    .to_string();
                self.open_prompt(message);
            }
            EditorAction::Save => {
                self.flush_active(tree);
                self.requested_sync = Some(SyncIntent::Save);
            }
            EditorAction::Publish => {
                self.flush_active(tree);
                self.requested_sync = Some(SyncIntent::Publish);
            }
        }
    }
}
