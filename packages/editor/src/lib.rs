//! # Inlay Editor
//!
//! In-page content editing core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ dom: document tree + selector paths         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor controller                   │
//! │  - SectionRegistry: dirty tracking          │
//! │  - SessionController: Idle ⇄ Editing        │
//! │  - ShortcutMap: combo dispatch              │
//! │  - Toolbar / prompts / locale / config      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ sync: save / publish / upload over HTTP     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The page owns its nodes**: sections hold [`inlay_dom::NodeId`]
//!    handles, never node lifetime
//! 2. **Three baselines per section**: original (published), saved
//!    (server-acknowledged), edited (in memory) - dirtiness is defined
//!    by their divergence
//! 3. **One active region at a time**: entering a new region force
//!    closes the previous session
//! 4. **No ambient globals**: every collaborator (toolbar, prompt,
//!    locale, store, host page) is owned by one [`Editor`] instance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inlay_editor::{Editor, EditorConfig, StaticHostPage};
//! use inlay_common::MemoryPreferenceStore;
//!
//! let mut editor = Editor::new(
//!     EditorConfig::default(),
//!     Box::new(StaticHostPage::default()),
//!     Box::new(MemoryPreferenceStore::new()),
//! )?;
//!
//! // Discover editable regions
//! editor.attach(&tree);
//!
//! // Drive it with host input events
//! editor.pointer_down(&mut tree, &click);
//! editor.key_down(&mut tree, &key);
//! ```

mod config;
mod editor;
mod errors;
mod host;
mod input;
mod locale;
mod prompt;
mod registry;
mod section;
mod session;
mod shortcuts;
mod toolbar;

pub use config::{ConfigError, EditorConfig, DEFAULT_EDITABLE_TAGS};
pub use editor::{Editor, SyncIntent};
pub use errors::EditorError;
pub use host::{HostPage, StaticHostPage, TextCommand};
pub use input::{KeyDisposition, KeyEvent, PointerEvent};
pub use locale::{Locale, DEFAULT_LANGUAGE, LANGUAGE_PREF_KEY};
pub use prompt::{ModalPrompt, PromptOutcome};
pub use registry::SectionRegistry;
pub use section::{Baseline, Section};
pub use session::{EditState, SessionController, EDITABLE_ATTR};
pub use shortcuts::{Dispatch, EditorAction, Shortcut, ShortcutMap};
pub use toolbar::{Point, Rect, Toolbar};
