use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::common::collections::HashMap;
use crate::host::EditorHost;
use crate::model::{DocumentData, DocumentId, GroupId};
use crate::switcher::candidates::CandidateList;

/// Per-invocation handle identifying the panel view. Handed to the host
/// when the panel is shown; the host's focus-gain hook echoes it back via
/// [`FocusSession::claim_panel`]. A token from a terminated session never
/// claims, so a stale invocation cannot capture an unrelated focus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelToken(u64);

impl PanelToken {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        PanelToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which document each group had focused at invocation time, plus the
/// group that was active. Captured once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSnapshot {
    focused_by_group: HashMap<GroupId, DocumentId>,
    group_count: usize,
    active_group: GroupId,
}

impl FocusSnapshot {
    pub fn capture<H: EditorHost>(host: &H) -> Self {
        let group_count = host.group_count();
        let mut focused_by_group = HashMap::default();
        for g in 0..group_count {
            if let Some(doc) = host.focused_document(GroupId(g)) {
                focused_by_group.insert(GroupId(g), doc);
            }
        }
        Self {
            focused_by_group,
            group_count,
            active_group: host.active_group(),
        }
    }

    pub fn active_group(&self) -> GroupId {
        self.active_group
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Snapshot taken, panel not yet shown.
    Capturing,
    Presenting,
    PreviewingHighlight,
    /// Terminal: snapshot replayed, no selection honored.
    Restored,
    /// Terminal: snapshot replayed, then the selection focused.
    Committed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Restored | SessionState::Committed)
    }
}

/// One switcher invocation: captures the focus snapshot, presents the
/// panel, previews highlighted candidates, and on termination replays the
/// snapshot before honoring any selection. The replay always comes first so
/// a selection lands on the pre-invocation layout, never on a leftover
/// preview.
#[derive(Debug)]
pub struct FocusSession {
    snapshot: FocusSnapshot,
    list: CandidateList,
    state: SessionState,
    token: Option<PanelToken>,
    panel_claimed: bool,
}

impl FocusSession {
    pub fn capture<H: EditorHost>(host: &H, list: CandidateList) -> Self {
        Self {
            snapshot: FocusSnapshot::capture(host),
            list,
            state: SessionState::Capturing,
            token: None,
            panel_claimed: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn snapshot(&self) -> &FocusSnapshot {
        &self.snapshot
    }

    pub fn list(&self) -> &CandidateList {
        &self.list
    }

    /// The token issued by [`present`](Self::present), while the session
    /// is live.
    pub fn panel_token(&self) -> Option<PanelToken> {
        self.token
    }

    /// Show the panel and issue this invocation's token.
    pub fn present<H: EditorHost>(&mut self, host: &mut H) -> PanelToken {
        debug_assert_eq!(self.state, SessionState::Capturing);
        let token = PanelToken::next();
        self.token = Some(token);
        host.show_panel(&self.list.candidates, token);
        self.state = SessionState::Presenting;
        token
    }

    /// One-shot handshake for the host's focus-gain hook. Returns true
    /// exactly once per invocation, and only while the session is live and
    /// the token is the one issued by [`present`](Self::present).
    pub fn claim_panel(&mut self, token: PanelToken) -> bool {
        if self.panel_claimed || self.state.is_terminal() || self.token != Some(token) {
            return false;
        }
        self.panel_claimed = true;
        true
    }

    /// Preview the highlighted candidate, then hand focus back to the
    /// panel. Candidates without a resolvable on-disk path preview nothing.
    /// The snapshot is never touched here.
    pub fn highlight<H: EditorHost>(&mut self, host: &mut H, index: usize) {
        if !matches!(
            self.state,
            SessionState::Presenting | SessionState::PreviewingHighlight
        ) {
            warn!(state = ?self.state, index, "highlight outside live panel ignored");
            return;
        }
        let Some(doc) = self.list.documents.get(index) else {
            warn!(index, len = self.list.len(), "highlight index out of range");
            return;
        };
        let secondary = &self.list.candidates[index].secondary;
        if let Some(path) = preview_path(doc, secondary, &host.project_roots()) {
            if host.path_exists(&path) {
                host.open_preview(&path);
                host.focus_group(self.snapshot.active_group);
                if let Some(token) = self.token {
                    host.focus_panel(token);
                }
            } else {
                debug!(path = %path.display(), "preview target missing on disk");
            }
        }
        self.state = SessionState::PreviewingHighlight;
    }

    /// Terminate the session. The snapshot is replayed unconditionally;
    /// when `selection` names a candidate, its document is focused on top
    /// of the restored layout.
    pub fn finish<H: EditorHost>(
        &mut self,
        host: &mut H,
        selection: Option<usize>,
    ) -> SessionState {
        if self.state.is_terminal() {
            warn!(state = ?self.state, "session already terminated");
            return self.state;
        }
        self.restore(host);
        self.token = None;
        if let Some(index) = selection {
            match self.list.documents.get(index) {
                Some(doc) => {
                    if let Some(group) = host.group_of(doc.id) {
                        host.focus_group(group);
                    }
                    host.focus_document(doc.id);
                    self.state = SessionState::Committed;
                }
                None => warn!(index, len = self.list.len(), "selection index out of range"),
            }
        }
        self.state
    }

    // Replay the snapshot: every group gets its recorded document back, in
    // group order, then the recorded active group regains focus.
    fn restore<H: EditorHost>(&mut self, host: &mut H) {
        for g in 0..self.snapshot.group_count {
            host.focus_group(GroupId(g));
            if let Some(doc) = self.snapshot.focused_by_group.get(&GroupId(g)) {
                host.focus_document(*doc);
            }
        }
        host.focus_group(self.snapshot.active_group);
        self.state = SessionState::Restored;
    }
}

/// Where a preview of `doc` would open from. Absolute paths stand alone;
/// relative ones resolve against the first project root using the
/// candidate's secondary label, and are unresolvable when that label is
/// empty.
fn preview_path(doc: &DocumentData, secondary: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    let path = doc.path.as_ref()?;
    if path.is_absolute() {
        return Some(path.clone());
    }
    if secondary.is_empty() {
        return None;
    }
    roots.first().map(|root| root.join(secondary))
}
