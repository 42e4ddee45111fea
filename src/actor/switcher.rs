use tracing::{debug, instrument, warn};

use crate::actor;
use crate::common::config::{Config, ListMode, SwitcherSettings};
use crate::host::EditorHost;
use crate::model::DocumentData;
use crate::switcher::candidates::build_list;
use crate::switcher::focus::{FocusSession, PanelToken};
use crate::switcher::sort::resort;

#[derive(Debug)]
pub enum Event {
    /// Invoke the switcher over the given document set.
    Show(ListMode),
    /// The host's focus-gain hook fired; `token` identifies which view
    /// gained focus if it was a panel.
    PanelFocused(PanelToken),
    /// The panel highlight moved to candidate `index`.
    Highlighted(usize),
    /// The panel closed. Negative means dismissed without a choice.
    Selected(isize),
    Dismiss,
    UpdateConfig(Config),
}

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

/// Event loop for one host window. The host delivers panel callbacks
/// serially, so at most one session is live at a time.
pub struct SwitcherActor<H> {
    config: Config,
    settings: SwitcherSettings,
    rx: Receiver,
    host: H,
    session: Option<FocusSession>,
}

impl<H: EditorHost> SwitcherActor<H> {
    pub fn new(config: Config, rx: Receiver, host: H) -> Self {
        let settings = config.settings.switcher.clone();
        Self {
            config,
            settings,
            rx,
            host,
            session: None,
        }
    }

    pub async fn run(mut self) {
        while let Some((span, event)) = self.rx.recv().await {
            let _guard = span.enter();
            self.handle_event(event);
        }
    }

    #[instrument(skip(self))]
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::UpdateConfig(config) => self.apply_config(config),
            Event::Show(mode) => self.show(mode),
            Event::PanelFocused(token) => self.claim_panel(token),
            Event::Highlighted(index) => {
                if let Some(session) = self.session.as_mut() {
                    session.highlight(&mut self.host, index);
                }
            }
            Event::Selected(index) => {
                self.finish(usize::try_from(index).ok());
            }
            Event::Dismiss => self.finish(None),
        }
    }

    // Takes effect on the next invocation; an in-flight session keeps the
    // settings it was built with.
    fn apply_config(&mut self, config: Config) {
        self.settings = config.settings.switcher.clone();
        self.config = config;
    }

    fn show(&mut self, mode: ListMode) {
        if self.session.is_some() {
            warn!("switcher already open; dismissing previous session");
            self.finish(None);
        }
        let Some(active) = self.host.active_document() else {
            warn!("no active document; nothing to switch between");
            return;
        };
        let others = self.collect_documents(mode);
        let roots = self.host.project_roots();
        let mut list = build_list(&active, &others, &self.settings, &roots);
        if self.settings.sort_enabled() {
            list = match resort(list, &self.settings.mark_dirty_file_char) {
                Ok(sorted) => sorted,
                Err(err) => {
                    warn!("sort reassociation failed: {err}");
                    return;
                }
            };
        }
        let mut session = FocusSession::capture(&self.host, list);
        session.present(&mut self.host);
        self.session = Some(session);
    }

    fn collect_documents(&self, mode: ListMode) -> Vec<DocumentData> {
        if mode == ListMode::ActiveGroup {
            let docs = self.host.documents_in_group(self.host.active_group());
            if !docs.is_empty() {
                return docs;
            }
            debug!("active group is empty; falling back to whole window");
        }
        self.host.all_documents()
    }

    fn claim_panel(&mut self, token: PanelToken) {
        let claimed = self
            .session
            .as_mut()
            .map(|session| session.claim_panel(token))
            .unwrap_or(false);
        if !claimed {
            debug!(?token, "focus gain did not belong to a live panel");
        }
    }

    fn finish(&mut self, selection: Option<usize>) {
        if let Some(mut session) = self.session.take() {
            session.finish(&mut self.host, selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::host::testing::MockHost;
    use crate::model::{DocumentData, DocumentId};

    fn config(sort: Option<bool>) -> Config {
        let mut config = Config::default();
        config.settings.switcher.mark_dirty_file_char = "•".to_string();
        config.settings.switcher.sort = sort;
        config
    }

    fn host_with_two_files() -> MockHost {
        MockHost::single_group(vec![
            DocumentData::new(DocumentId(1)).with_path("/p/b.txt"),
            DocumentData::new(DocumentId(2)).with_path("/p/a.txt").dirty(),
        ])
    }

    fn actor(config: Config, host: MockHost) -> SwitcherActor<MockHost> {
        let (_tx, rx) = actor::channel();
        SwitcherActor::new(config, rx, host)
    }

    fn labels(actor: &SwitcherActor<MockHost>) -> Vec<&str> {
        actor
            .session
            .as_ref()
            .unwrap()
            .list()
            .candidates
            .iter()
            .map(|c| c.primary.as_str())
            .collect()
    }

    #[test_log::test]
    fn show_presents_unsorted_list_in_window_order() {
        let mut actor = actor(config(None), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        assert_eq!(labels(&actor), ["b.txt", "a.txt•"]);
        assert_eq!(actor.host.calls.len(), 1);
        assert!(actor.host.calls[0].starts_with("show_panel(2 items"));
    }

    #[test]
    fn show_with_sort_presents_reassociated_list() {
        let mut actor = actor(config(Some(true)), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        assert_eq!(labels(&actor), ["a.txt•", "b.txt"]);
        let docs: Vec<u64> = actor
            .session
            .as_ref()
            .unwrap()
            .list()
            .documents
            .iter()
            .map(|d| d.id.0)
            .collect();
        assert_eq!(docs, [2, 1]);
    }

    #[test]
    fn sort_false_behaves_like_sort_absent() {
        let mut explicit = actor(config(Some(false)), host_with_two_files());
        explicit.handle_event(Event::Show(ListMode::Window));
        let mut absent = actor(config(None), host_with_two_files());
        absent.handle_event(Event::Show(ListMode::Window));
        assert_eq!(labels(&explicit), labels(&absent));
    }

    #[test]
    fn active_group_mode_lists_only_that_group() {
        let mut host = host_with_two_files();
        host.documents.push(DocumentData::new(DocumentId(3)).with_path("/p/c.txt"));
        host.groups = vec![vec![DocumentId(1), DocumentId(2)], vec![DocumentId(3)]];
        host.focused = vec![Some(DocumentId(1)), Some(DocumentId(3))];
        host.active_group = 0;
        let mut actor = actor(config(None), host);
        actor.handle_event(Event::Show(ListMode::ActiveGroup));
        assert_eq!(labels(&actor), ["b.txt", "a.txt•"]);
    }

    #[test]
    fn empty_active_group_falls_back_to_whole_window() {
        // the active view can sit outside its group's tab list (e.g. a
        // freshly emptied pane); the fallback widens to the whole window
        let mut host = host_with_two_files();
        host.groups = vec![Vec::new(), vec![DocumentId(1), DocumentId(2)]];
        host.focused = vec![Some(DocumentId(1)), Some(DocumentId(2))];
        host.active_group = 0;
        let mut actor = actor(config(None), host);
        actor.handle_event(Event::Show(ListMode::ActiveGroup));
        assert_eq!(labels(&actor), ["b.txt", "a.txt•"]);
    }

    #[test]
    fn selection_commits_after_restoring() {
        let mut actor = actor(config(None), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        actor.host.calls.clear();
        actor.handle_event(Event::Selected(1));
        assert_eq!(
            actor.host.calls,
            [
                "focus_group(0)",
                "focus_document(1)",
                "focus_group(0)",
                "focus_group(0)",
                "focus_document(2)",
            ]
        );
        assert!(actor.session.is_none());
    }

    #[test]
    fn negative_selection_only_restores() {
        let mut actor = actor(config(None), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        actor.host.calls.clear();
        actor.handle_event(Event::Selected(-1));
        assert_eq!(
            actor.host.calls,
            ["focus_group(0)", "focus_document(1)", "focus_group(0)"]
        );
        assert!(actor.session.is_none());
    }

    #[test]
    fn update_config_applies_to_next_show() {
        let mut actor = actor(config(None), host_with_two_files());
        let mut updated = config(None);
        updated.settings.switcher.mark_dirty_file_char = "+".to_string();
        actor.handle_event(Event::UpdateConfig(updated));
        actor.handle_event(Event::Show(ListMode::Window));
        assert_eq!(labels(&actor), ["b.txt", "a.txt+"]);
    }

    #[test]
    fn panel_focus_event_spends_the_live_token() {
        let mut actor = actor(config(None), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        let token = actor.session.as_ref().unwrap().panel_token().unwrap();
        actor.handle_event(Event::PanelFocused(token));
        // single-assignment handshake: the token is now spent
        assert!(!actor.session.as_mut().unwrap().claim_panel(token));
    }

    #[test]
    fn reinvoking_while_open_restores_the_first_session() {
        let mut actor = actor(config(None), host_with_two_files());
        actor.handle_event(Event::Show(ListMode::Window));
        actor.host.calls.clear();
        actor.handle_event(Event::Show(ListMode::Window));
        // first the old snapshot replays, then the new panel shows
        assert_eq!(actor.host.calls[0], "focus_group(0)");
        assert!(actor.host.calls.last().unwrap().starts_with("show_panel"));
        assert!(actor.session.is_some());
    }

    #[test_log::test(tokio::test)]
    async fn run_drains_the_event_queue_then_exits() {
        let (tx, rx) = actor::channel();
        let actor = SwitcherActor::new(config(None), rx, host_with_two_files());
        tx.try_send(Event::Show(ListMode::Window));
        tx.try_send(Event::Highlighted(1));
        tx.try_send(Event::Selected(-1));
        drop(tx);
        actor.run().await;
    }
}
