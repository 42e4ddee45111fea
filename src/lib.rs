//! Core of an open-document switcher for embedding in a text editor.
//!
//! The host supplies the open documents, their dirty state, a filterable
//! panel, and focus/preview primitives through [`host::EditorHost`]; this
//! crate builds the candidate list, keeps it aligned with its documents
//! through optional alphabetization, and drives the preview/restore focus
//! session so a dismissed switcher never disturbs the window layout.

pub mod actor;
pub mod common;
pub mod host;
pub mod model;
pub mod switcher;

pub use common::config::{Config, ListMode, SwitcherSettings};
pub use host::EditorHost;
pub use model::{DocumentData, DocumentId, GroupId};
pub use switcher::{
    Candidate, CandidateList, FocusSession, FocusSnapshot, PanelToken, SessionState,
    SortReassociationError,
};
