use thiserror::Error;

use crate::model::DocumentData;
use crate::switcher::candidates::{basename, CandidateList, UNTITLED_LABEL};

/// Sorting erases positional correspondence between labels and documents;
/// re-matching is by derived label, and a label no remaining document can
/// account for means the two lists would silently diverge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortReassociationError {
    #[error("no open document matches sorted label {label:?}")]
    UnmatchedLabel { label: String },
}

/// Alphabetize the candidate list and rebuild the document list to match.
///
/// Labels are sorted lexicographically by (primary, secondary). Each sorted
/// primary label is then re-matched against the pool of not-yet-placed
/// documents by re-deriving each document's identity: base file name (with
/// or without the dirty marker) for file-backed documents, display name for
/// named buffers, `Untitled` otherwise. Display formatting may have embedded
/// a `" - <dir>"` suffix in the label; it is stripped before comparing.
/// Ties between identical labels go to the first remaining document in the
/// original order.
pub fn resort(
    list: CandidateList,
    dirty_char: &str,
) -> Result<CandidateList, SortReassociationError> {
    let CandidateList { mut candidates, documents } = list;
    candidates.sort_by(|a, b| {
        (&a.primary, &a.secondary).cmp(&(&b.primary, &b.secondary))
    });

    let mut pool = documents;
    let mut reordered = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let index = match_in_pool(&candidate.primary, &pool, dirty_char).ok_or_else(|| {
            SortReassociationError::UnmatchedLabel { label: candidate.primary.clone() }
        })?;
        reordered.push(pool.remove(index));
    }

    Ok(CandidateList { candidates, documents: reordered })
}

// O(n) scan per label, O(n²) overall. The label string is progressively
// stripped of each scanned document's " - <dir>" suffix as the scan
// advances, so a match can depend on the documents scanned before it.
fn match_in_pool(label: &str, pool: &[DocumentData], dirty_char: &str) -> Option<usize> {
    let mut f = label.to_string();
    for (index, doc) in pool.iter().enumerate() {
        let matched = if let Some(path) = &doc.path {
            if let Some(dir) = path.parent() {
                f = f.replace(&format!(" - {}", dir.display()), "");
            }
            let base = basename(path);
            f == base || f == format!("{base}{dirty_char}")
        } else if let Some(name) = &doc.display_name {
            f == *name || f == format!("{name}{dirty_char}")
        } else {
            f == UNTITLED_LABEL
        };
        if matched {
            return Some(index);
        }
    }
    None
}
