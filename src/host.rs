use std::path::{Path, PathBuf};

use crate::model::{DocumentData, DocumentId, GroupId};
use crate::switcher::candidates::Candidate;
use crate::switcher::focus::PanelToken;

/// Everything the switcher needs from the embedding editor.
///
/// The host delivers highlight/selection events serially on its UI thread,
/// so all methods take effect synchronously; none of them may re-enter the
/// switcher.
pub trait EditorHost {
    /// The document focused in the active group, if any.
    fn active_document(&self) -> Option<DocumentData>;
    /// Open documents in one group, in tab order.
    fn documents_in_group(&self, group: GroupId) -> Vec<DocumentData>;
    /// All open documents in the window, in tab order across groups.
    fn all_documents(&self) -> Vec<DocumentData>;
    fn group_count(&self) -> usize;
    fn active_group(&self) -> GroupId;
    /// The document focused in `group`, if the group is non-empty.
    fn focused_document(&self, group: GroupId) -> Option<DocumentId>;
    /// The group currently hosting `doc`.
    fn group_of(&self, doc: DocumentId) -> Option<GroupId>;
    /// Project roots used to relativize candidate paths, outermost first.
    fn project_roots(&self) -> Vec<PathBuf>;

    fn focus_group(&mut self, group: GroupId);
    fn focus_document(&mut self, doc: DocumentId);
    /// Open `path` for viewing without adding it to navigation history.
    fn open_preview(&mut self, path: &Path);
    /// Show the filterable panel. The host must echo `token` back through
    /// [`crate::switcher::focus::FocusSession::claim_panel`] when its
    /// focus-gain hook fires for the panel view.
    fn show_panel(&mut self, candidates: &[Candidate], token: PanelToken);
    /// Return input focus to the panel after a preview stole it.
    fn focus_panel(&mut self, token: PanelToken);

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
