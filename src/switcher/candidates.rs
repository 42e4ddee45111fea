use std::path::{Path, PathBuf};

use crate::common::config::SwitcherSettings;
use crate::model::DocumentData;

/// Label for documents with neither a backing file nor an editor-assigned
/// name.
pub const UNTITLED_LABEL: &str = "Untitled";

/// What the panel displays for one document: the base file name (or
/// buffer name), and the project-relative path when enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub primary: String,
    pub secondary: String,
}

/// Candidates and their documents, index-aligned: `candidates[i]` always
/// describes `documents[i]`. Every transformation must keep the two in
/// lockstep.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
    pub documents: Vec<DocumentData>,
}

impl CandidateList {
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.candidates.len(), self.documents.len());
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, candidate: Candidate, document: DocumentData) {
        self.candidates.push(candidate);
        self.documents.push(document);
    }
}

pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Path relative to the first project root containing it, or empty when the
/// document lives outside every root.
fn relative_to_roots(path: &Path, roots: &[PathBuf]) -> String {
    roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .map(|rel| rel.display().to_string())
        .unwrap_or_default()
}

/// Derive the display pair for one document.
pub fn build_candidate(
    doc: &DocumentData,
    settings: &SwitcherSettings,
    roots: &[PathBuf],
) -> Candidate {
    let mut secondary = String::new();
    let mut primary = if let Some(path) = &doc.path {
        if settings.show_full_file_path {
            secondary = relative_to_roots(path, roots);
        }
        basename(path)
    } else if let Some(name) = &doc.display_name {
        name.clone()
    } else {
        UNTITLED_LABEL.to_string()
    };
    if doc.is_dirty {
        primary.push_str(&settings.mark_dirty_file_char);
    }
    Candidate { primary, secondary }
}

/// Assemble the candidate list: the active document first, then every other
/// document in the order given, skipping any re-occurrence of the active one.
pub fn build_list(
    active: &DocumentData,
    others: &[DocumentData],
    settings: &SwitcherSettings,
    roots: &[PathBuf],
) -> CandidateList {
    let mut list = CandidateList::default();
    list.push(build_candidate(active, settings, roots), active.clone());
    for doc in others {
        if doc.id == active.id {
            continue;
        }
        list.push(build_candidate(doc, settings, roots), doc.clone());
    }
    list
}
