// tab-navigator: fuzzy search across open workspace tabs, duplicate-tab
// cleanup, and bulk loading of deferred tabs. The host owns tab lifecycle
// and settings storage; this crate owns the decisions.

pub mod dedup;
pub mod display;
pub mod search;
pub mod settings;
pub mod workspace;

pub use dedup::compute_duplicates;
pub use display::{result_line, ResultLine};
pub use search::{search, MatchTier, MatchedField, RankedResult};
pub use settings::{SearchFacets, Settings, SettingsStore};
pub use workspace::{FileRef, Leaf, LeafId, Workspace, VIEW_TYPE_EMPTY};

// ============================================================================
// Commands
// ============================================================================

/// User-invokable actions, registered with the host command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SearchTabs,
    RemoveDuplicateTabs,
    LoadAllTabs,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::SearchTabs,
        Command::RemoveDuplicateTabs,
        Command::LoadAllTabs,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Command::SearchTabs => "search-tabs",
            Command::RemoveDuplicateTabs => "remove-duplicate-tabs",
            Command::LoadAllTabs => "load-all-tabs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::SearchTabs => "Search tabs",
            Command::RemoveDuplicateTabs => "Remove duplicate tabs",
            Command::LoadAllTabs => "Load all tabs",
        }
    }
}

// ============================================================================
// Search Session
// ============================================================================

/// State for one modal lifetime: query, selection, and the ranked results.
/// Every open and every query change takes a fresh workspace snapshot and
/// recomputes from scratch; nothing survives the session except settings.
pub struct SearchSession {
    query: String,
    selected: Option<usize>,
    facets: SearchFacets,
    leaves: Vec<Leaf>,
    results: Vec<RankedResult>,
}

impl SearchSession {
    pub fn open(ws: &dyn Workspace, facets: SearchFacets) -> Self {
        let mut session = SearchSession {
            query: String::new(),
            selected: None,
            facets,
            leaves: Vec::new(),
            results: Vec::new(),
        };
        session.refresh(ws);
        session
    }

    /// Re-snapshot and re-rank for the current query.
    fn refresh(&mut self, ws: &dyn Workspace) {
        self.leaves = ws.leaves();
        self.results = search(&self.leaves, &self.query, &self.facets);
        self.selected = if self.results.is_empty() { None } else { Some(0) };
    }

    pub fn set_query(&mut self, query: &str, ws: &dyn Workspace) {
        self.query = query.to_string();
        self.refresh(ws);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn leaf_for(&self, result: &RankedResult) -> &Leaf {
        &self.leaves[result.index]
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected {
            if idx + 1 < self.results.len() {
                self.selected = Some(idx + 1);
            }
        } else if !self.results.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(idx) = self.selected {
            if idx > 0 {
                self.selected = Some(idx - 1);
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_id(&self) -> Option<LeafId> {
        self.selected.map(|idx| self.results[idx].id)
    }

    /// Styled lines for the current results, ready for the UI shell.
    pub fn lines(&self, settings: &Settings, max_cols: usize) -> Vec<ResultLine> {
        self.results
            .iter()
            .map(|r| result_line(self.leaf_for(r), r, settings, max_cols))
            .collect()
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// The plugin itself: settings, their store, and at most one live search
/// session (opening a new one replaces the old, as the host destroys a
/// previous modal instance before showing another).
pub struct TabNavigator<S: SettingsStore> {
    settings: Settings,
    store: S,
    session: Option<SearchSession>,
}

impl<S: SettingsStore> TabNavigator<S> {
    /// Plugin load: read settings merged over defaults.
    pub fn load(store: S) -> Self {
        let settings = Settings::from_saved(store.load_data());
        TabNavigator {
            settings,
            store,
            session: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a settings change and persist immediately.
    pub fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.settings);
        self.store.save_data(&self.settings.to_value());
    }

    /// Called once after the host finishes its own startup.
    pub fn on_startup(&mut self, ws: &mut dyn Workspace) {
        if self.settings.load_all_tabs_on_startup {
            self.load_all_tabs(ws);
        }
    }

    pub fn run(&mut self, command: Command, ws: &mut dyn Workspace) {
        match command {
            Command::SearchTabs => {
                self.session = Some(SearchSession::open(ws, self.settings.facets()));
            }
            Command::RemoveDuplicateTabs => self.remove_duplicate_tabs(ws),
            Command::LoadAllTabs => self.load_all_tabs(ws),
        }
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut SearchSession> {
        self.session.as_mut()
    }

    pub fn close_session(&mut self) {
        self.session = None;
    }

    /// Jump to the selected result and close the modal.
    pub fn choose_selected(&mut self, ws: &mut dyn Workspace) {
        if let Some(id) = self.session.as_ref().and_then(|s| s.selected_id()) {
            ws.set_active(id);
        }
        self.session = None;
    }

    fn remove_duplicate_tabs(&self, ws: &mut dyn Workspace) {
        let leaves = ws.leaves();
        let to_remove = compute_duplicates(&leaves);
        if to_remove.is_empty() {
            return;
        }
        eprintln!(
            "[navigator] detaching {} duplicate/empty tabs of {}",
            to_remove.len(),
            leaves.len()
        );
        // Batch detach after the scan; each removal is independent
        for id in to_remove {
            ws.detach(id);
        }
    }

    fn load_all_tabs(&self, ws: &mut dyn Workspace) {
        let deferred: Vec<LeafId> = ws
            .leaves()
            .iter()
            .filter(|l| l.deferred)
            .map(|l| l.id)
            .collect();
        if deferred.is_empty() {
            return;
        }
        eprintln!("[navigator] requesting load of {} deferred tabs", deferred.len());
        for id in deferred {
            ws.load_deferred(id);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
