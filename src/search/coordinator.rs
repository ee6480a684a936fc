use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::{debug, info};

use super::composer::compose_instruction;
use super::fetcher::GroupSource;
use crate::groups::{Category, Group};

/// Everything the UI shows about the current search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub category: Option<Category>,
    pub groups: Vec<Group>,
    pub loading: bool,
    pub has_searched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTrigger {
    Mount,
    CategoryChange,
    Submit,
}

/// A search that has been started but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub trigger: SearchTrigger,
    pub instruction: String,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Completed { seq: u64, groups: Vec<Group> },
}

/// Owns [`SearchState`] and sequences each search: loading on, fetch,
/// replace results, loading off.
///
/// Every search gets a sequence number. Only the completion of the most
/// recently issued search is applied; older completions are dropped, so
/// overlapping searches cannot leave stale results on screen.
pub struct SearchCoordinator {
    state: SearchState,
    source: Arc<dyn GroupSource>,
    next_seq: u64,
    latest_seq: Option<u64>,
    mounted: bool,
}

impl SearchCoordinator {
    pub fn new(source: Arc<dyn GroupSource>) -> Self {
        Self {
            state: SearchState::default(),
            source,
            next_seq: 1,
            latest_seq: None,
            mounted: false,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Initial search; runs once per coordinator.
    pub fn mount(&mut self) -> Option<SearchRequest> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin(SearchTrigger::Mount))
    }

    /// Record the category filter without searching; used to seed the
    /// filter before the first search.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.state.category = category;
    }

    /// Change the category filter. Starts a search only when the category
    /// actually changed and a search has already run.
    pub fn select_category(&mut self, category: Option<Category>) -> Option<SearchRequest> {
        if self.state.category == category {
            return None;
        }
        self.state.category = category;
        if !self.state.has_searched {
            debug!(category = ?category, "category changed before first search; not searching");
            return None;
        }
        Some(self.begin(SearchTrigger::CategoryChange))
    }

    /// Explicit user search. Always starts a new search, even while one is
    /// still outstanding.
    pub fn submit(&mut self) -> SearchRequest {
        self.begin(SearchTrigger::Submit)
    }

    fn begin(&mut self, trigger: SearchTrigger) -> SearchRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        self.state.loading = true;
        self.state.has_searched = true;
        let instruction = compose_instruction(&self.state.query, self.state.category);
        info!(seq, trigger = ?trigger, instruction = %instruction, category = ?self.state.category, "search started");
        SearchRequest {
            seq,
            trigger,
            instruction,
            category: self.state.category,
        }
    }

    /// Apply a completion. Returns `false` when it belonged to a search
    /// that has since been superseded.
    pub fn apply(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Completed { seq, groups } => {
                if self.latest_seq != Some(seq) {
                    debug!(seq, latest = ?self.latest_seq, "dropping stale search result");
                    return false;
                }
                info!(seq, count = groups.len(), "search results applied");
                self.state.groups = groups;
                self.state.loading = false;
                true
            }
        }
    }

    /// Run the fetch for `req` without touching state.
    pub async fn resolve(&self, req: &SearchRequest) -> SearchEvent {
        resolve_with(self.source.as_ref(), req).await
    }

    /// Start, fetch and apply in one go.
    pub async fn run(&mut self, req: SearchRequest) -> &SearchState {
        let event = self.resolve(&req).await;
        self.apply(event);
        &self.state
    }

    /// Fetch on a background task; the completion arrives on `tx` and must
    /// be handed back to [`SearchCoordinator::apply`] by the owner.
    pub fn spawn(&self, req: SearchRequest, tx: Sender<SearchEvent>) {
        let source = self.source.clone();
        tokio::spawn(async move {
            let event = resolve_with(source.as_ref(), &req).await;
            if tx.send(event).is_err() {
                debug!(seq = req.seq, "search finished after the UI went away");
            }
        });
    }
}

async fn resolve_with(source: &dyn GroupSource, req: &SearchRequest) -> SearchEvent {
    let groups = source.fetch(&req.instruction, req.category).await;
    SearchEvent::Completed {
        seq: req.seq,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Records every call and answers with one group named after the
    /// instruction.
    #[derive(Default)]
    struct EchoSource {
        calls: Mutex<Vec<(String, Option<Category>)>>,
    }

    #[async_trait]
    impl GroupSource for EchoSource {
        async fn fetch(&self, instruction: &str, category: Option<Category>) -> Vec<Group> {
            self.calls
                .lock()
                .unwrap()
                .push((instruction.to_string(), category));
            vec![Group {
                id: "1".into(),
                name: instruction.to_string(),
                ..Group::default()
            }]
        }
    }

    struct EmptySource;

    #[async_trait]
    impl GroupSource for EmptySource {
        async fn fetch(&self, _instruction: &str, _category: Option<Category>) -> Vec<Group> {
            Vec::new()
        }
    }

    fn named(name: &str) -> Vec<Group> {
        vec![Group {
            name: name.into(),
            ..Group::default()
        }]
    }

    #[test]
    fn mount_runs_once_with_default_instruction() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let req = c.mount().unwrap();
        assert_eq!(req.trigger, SearchTrigger::Mount);
        assert_eq!(req.instruction, "popular groups and active communities");
        assert!(c.state().loading);
        assert!(c.state().has_searched);
        assert!(c.mount().is_none());
    }

    #[test]
    fn category_change_before_first_search_does_not_search() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        assert!(c.select_category(Some(Category::Games)).is_none());
        assert_eq!(c.state().category, Some(Category::Games));
        assert!(!c.state().loading);
        let req = c.mount().unwrap();
        assert_eq!(req.instruction, "groups in Games");
        assert_eq!(req.category, Some(Category::Games));
    }

    #[test]
    fn set_category_seeds_filter_without_searching() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        c.set_category(Some(Category::Cooking));
        assert_eq!(c.state().category, Some(Category::Cooking));
        assert!(!c.state().loading);
        assert!(!c.state().has_searched);
        let req = c.mount().unwrap();
        assert_eq!(req.category, Some(Category::Cooking));
        assert_eq!(req.instruction, "groups in Cooking");
    }

    #[test]
    fn reselecting_same_category_does_not_search() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let req = c.mount().unwrap();
        c.apply(SearchEvent::Completed {
            seq: req.seq,
            groups: vec![],
        });
        assert!(c.select_category(Some(Category::Travel)).is_some());
        assert!(c.select_category(Some(Category::Travel)).is_none());
        assert!(c.select_category(None).is_some());
    }

    #[test]
    fn submit_always_starts_a_search() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        c.set_query("  Cars ");
        let a = c.submit();
        let b = c.submit();
        assert_eq!(a.instruction, "Cars");
        assert!(b.seq > a.seq);
        assert_eq!(b.trigger, SearchTrigger::Submit);
    }

    #[test]
    fn results_are_replaced_not_merged() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let first = c.mount().unwrap();
        assert!(c.apply(SearchEvent::Completed {
            seq: first.seq,
            groups: [named("a"), named("b")].concat(),
        }));
        assert_eq!(c.state().groups.len(), 2);

        let second = c.select_category(Some(Category::Games)).unwrap();
        assert_eq!(second.instruction, "groups in Games");
        assert!(c.state().loading);
        // previous results stay visible while loading
        assert_eq!(c.state().groups.len(), 2);
        assert!(c.apply(SearchEvent::Completed {
            seq: second.seq,
            groups: named("c"),
        }));
        assert!(!c.state().loading);
        assert_eq!(c.state().groups, named("c"));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let old = c.submit();
        let new = c.submit();

        // newest resolves first
        assert!(c.apply(SearchEvent::Completed {
            seq: new.seq,
            groups: named("new"),
        }));
        assert!(!c.state().loading);
        // the older one resolving later must not overwrite it
        assert!(!c.apply(SearchEvent::Completed {
            seq: old.seq,
            groups: named("old"),
        }));
        assert_eq!(c.state().groups, named("new"));
    }

    #[test]
    fn stale_completion_does_not_clear_loading() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let old = c.submit();
        let _new = c.submit();
        assert!(!c.apply(SearchEvent::Completed {
            seq: old.seq,
            groups: named("old"),
        }));
        assert!(c.state().loading);
        assert!(c.state().groups.is_empty());
    }

    #[tokio::test]
    async fn run_fetches_and_applies() {
        let source = Arc::new(EchoSource::default());
        let mut c = SearchCoordinator::new(source.clone());
        c.set_query("Cars");
        let req = c.submit();
        let state = c.run(req).await;
        assert!(!state.loading);
        assert_eq!(state.groups[0].name, "Cars");
        assert_eq!(
            source.calls.lock().unwrap().as_slice(),
            &[("Cars".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn failing_source_still_clears_loading() {
        let mut c = SearchCoordinator::new(Arc::new(EmptySource));
        let req = c.mount().unwrap();
        let state = c.run(req).await;
        assert!(!state.loading);
        assert!(state.groups.is_empty());
        assert!(state.has_searched);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_delivers_completion_through_channel() {
        let source = Arc::new(EchoSource::default());
        let mut c = SearchCoordinator::new(source);
        let (tx, rx) = mpsc::channel();
        let req = c.select_category(Some(Category::Cooking));
        assert!(req.is_none());
        let req = c.mount().unwrap();
        let seq = req.seq;
        c.spawn(req, tx);
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            event,
            SearchEvent::Completed {
                seq,
                groups: vec![Group {
                    id: "1".into(),
                    name: "groups in Cooking".into(),
                    ..Group::default()
                }],
            }
        );
        assert!(c.apply(event));
        assert!(!c.state().loading);
    }
}
