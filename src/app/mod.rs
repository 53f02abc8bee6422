pub mod persist;
pub mod state;

use std::time::Instant;

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::event::debounce::Debouncer;
use crate::event::Event;
use crate::library::loader::LoadState;
use crate::library::query::{Query, Selection};
use crate::library::song::Song;
use crate::library::sort::{SortKey, Sorter};
use crate::library::{self, Catalog};
use persist::SavedPrefs;
use state::*;

#[derive(Debug)]
pub enum BrowserAction {
    CatalogLoaded(Result<Catalog>),
    SearchQuery(String),
    SetGenres(Selection),
    SetYearOrMood(Selection),
    SetArtists(Selection),
    SetSort(SortKey),
    SetViewMode(ViewMode),
    ToggleViewMode,
    ToggleTheme,
    ResetFilters,
    PickRandom,
    /// Copy the song at this position of the current results.
    CopySong(usize),
}

/// UI state owned by the rendering layer. The catalog and query functions
/// stay pure; everything that changes between user inputs lives here.
#[derive(Debug)]
pub struct Browser {
    pub load: LoadState,
    pub query: Query,
    pub sort: SortKey,
    pub view_mode: ViewMode,
    pub theme: Theme,
    /// Positions into the catalog, in display order.
    pub results: Vec<usize>,
    pub random_pick: Option<usize>,
    pub clipboard: Option<String>,
    search_input: Debouncer<String>,
    prefs_changed: bool,
    sorter: Sorter,
}

impl Browser {
    pub fn new(sorter: Sorter) -> Self {
        Self {
            load: LoadState::Loading,
            query: Query::default(),
            sort: SortKey::Default,
            view_mode: ViewMode::default(),
            theme: Theme::default(),
            results: Vec::new(),
            random_pick: None,
            clipboard: None,
            search_input: Debouncer::default(),
            prefs_changed: false,
            sorter,
        }
    }

    /// Browser set up from the settings file: collation locale, search
    /// debounce and initial sort order.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut browser = Self::new(Sorter::new(&config.collation_locale)?);
        browser.search_input = Debouncer::new(config.debounce());
        browser.sort = config.default_sort;
        Ok(browser)
    }

    pub fn apply_prefs(&mut self, prefs: &SavedPrefs) {
        self.theme = prefs.theme();
        self.view_mode = prefs.view_mode();
    }

    /// Flags to write back, once per explicit toggle.
    pub fn take_prefs_change(&mut self) -> Option<SavedPrefs> {
        if std::mem::take(&mut self.prefs_changed) {
            Some(SavedPrefs::new(self.theme, self.view_mode))
        } else {
            None
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.load.catalog()
    }

    /// Current results, in display order.
    pub fn visible_songs(&self) -> Vec<&Song> {
        match self.catalog() {
            Some(catalog) => self
                .results
                .iter()
                .filter_map(|&i| catalog.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        library::result_summary(self.results.len())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::CatalogReady(result) => {
                self.handle_action(BrowserAction::CatalogLoaded(result));
            }
            Event::SearchInput(text) => self.search_input.push(text, now),
            Event::Tick => {
                if let Some(text) = self.search_input.poll(now) {
                    self.handle_action(BrowserAction::SearchQuery(text));
                }
            }
        }
    }

    /// Run a pending search right away (Enter key or search button).
    pub fn submit_search(&mut self) {
        if let Some(text) = self.search_input.flush() {
            self.handle_action(BrowserAction::SearchQuery(text));
        }
    }

    pub fn handle_action(&mut self, action: BrowserAction) {
        match action {
            BrowserAction::CatalogLoaded(Ok(catalog)) => {
                info!(songs = catalog.len(), "catalog ready");
                self.load = LoadState::Ready(catalog);
                self.refresh();
            }
            BrowserAction::CatalogLoaded(Err(e)) => {
                self.load = LoadState::Failed(e.to_string());
                self.results.clear();
            }
            BrowserAction::SearchQuery(text) => {
                self.query.search_term = text;
                self.refresh();
            }
            BrowserAction::SetGenres(selection) => {
                self.query.genres = selection;
                self.refresh();
            }
            BrowserAction::SetYearOrMood(selection) => {
                self.query.year_or_mood = selection;
                self.refresh();
            }
            BrowserAction::SetArtists(selection) => {
                self.query.artists = selection;
                self.refresh();
            }
            BrowserAction::SetSort(key) => {
                self.sort = key;
                self.refresh();
            }
            BrowserAction::SetViewMode(mode) => {
                if self.view_mode != mode {
                    self.view_mode = mode;
                    self.prefs_changed = true;
                }
            }
            BrowserAction::ToggleViewMode => {
                self.view_mode = self.view_mode.next();
                self.prefs_changed = true;
            }
            BrowserAction::ToggleTheme => {
                self.theme = self.theme.next();
                self.prefs_changed = true;
            }
            BrowserAction::ResetFilters => {
                self.query = Query::default();
                self.sort = SortKey::Default;
                self.refresh();
            }
            BrowserAction::PickRandom => {
                let mut rng = rand::thread_rng();
                self.random_pick = self.results.choose(&mut rng).copied();
            }
            BrowserAction::CopySong(position) => {
                let text = self
                    .results
                    .get(position)
                    .and_then(|&i| self.catalog()?.get(i))
                    .map(Song::clipboard_text);
                if text.is_some() {
                    self.clipboard = text;
                }
            }
        }
    }

    fn refresh(&mut self) {
        let Some(catalog) = self.load.catalog() else {
            self.results.clear();
            return;
        };
        self.results = catalog.search(&self.query, self.sort, &self.sorter);
        if let Some(pick) = self.random_pick {
            if !self.results.contains(&pick) {
                self.random_pick = None;
            }
        }
        debug!(results = self.results.len(), "results refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::parser::Dialect;
    use crate::library::sort::DEFAULT_LOCALE;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const CSV: &str = "歌曲,歌手,年分,類型\n晴天,周杰伦,2003,流行\n七里香,周杰伦/方文山,2004,流行/民谣\nHotel California,Eagles,1976,Rock\n";

    fn browser() -> Browser {
        let mut browser = Browser::new(Sorter::new(DEFAULT_LOCALE).unwrap());
        let catalog = Catalog::from_csv(CSV, Dialect::Naive);
        browser.handle_action(BrowserAction::CatalogLoaded(catalog));
        browser
    }

    fn titles(browser: &Browser) -> Vec<String> {
        browser
            .visible_songs()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    #[test]
    fn nothing_is_visible_while_loading() {
        let browser = Browser::new(Sorter::new(DEFAULT_LOCALE).unwrap());
        assert!(browser.load.is_loading());
        assert!(browser.visible_songs().is_empty());
    }

    #[test]
    fn load_failure_is_surfaced() {
        let mut browser = Browser::new(Sorter::new(DEFAULT_LOCALE).unwrap());
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "songlist.csv");
        browser.handle_action(BrowserAction::CatalogLoaded(Err(err.into())));
        assert!(matches!(browser.load, LoadState::Failed(_)));
        assert!(browser.catalog().is_none());
    }

    #[test]
    fn loaded_catalog_shows_everything_in_file_order() {
        let browser = browser();
        assert_eq!(titles(&browser), vec!["晴天", "七里香", "Hotel California"]);
        assert_eq!(browser.summary(), "顯示 3 首歌曲");
    }

    #[test]
    fn filters_and_sort_compose_then_reset() {
        let mut browser = browser();
        browser.handle_action(BrowserAction::SetArtists(Selection::only(["周杰伦"])));
        browser.handle_action(BrowserAction::SetSort(SortKey::YearDesc));
        assert_eq!(titles(&browser), vec!["七里香", "晴天"]);

        browser.handle_action(BrowserAction::SetSort(SortKey::Default));
        assert_eq!(titles(&browser), vec!["晴天", "七里香"]);

        browser.handle_action(BrowserAction::ResetFilters);
        assert_eq!(browser.results, vec![0, 1, 2]);
    }

    #[test]
    fn no_results_summary() {
        let mut browser = browser();
        browser.handle_action(BrowserAction::SearchQuery("不存在".into()));
        assert!(browser.visible_songs().is_empty());
        assert_eq!(browser.summary(), "沒有找到符合條件的歌曲");
    }

    #[test]
    fn search_input_is_debounced_until_tick() {
        let mut browser = browser();
        let start = Instant::now();
        browser.handle_event(Event::SearchInput("hotel".into()), start);
        browser.handle_event(Event::Tick, start + Duration::from_millis(50));
        assert_eq!(browser.results.len(), 3);

        browser.handle_event(Event::Tick, start + Duration::from_millis(350));
        assert_eq!(titles(&browser), vec!["Hotel California"]);
    }

    #[test]
    fn submit_runs_pending_search_immediately() {
        let mut browser = browser();
        browser.handle_event(Event::SearchInput("晴天".into()), Instant::now());
        browser.submit_search();
        assert_eq!(titles(&browser), vec!["晴天"]);
    }

    #[test]
    fn copy_uses_result_position() {
        let mut browser = browser();
        browser.handle_action(BrowserAction::SetSort(SortKey::TitleDesc));
        let first = browser.visible_songs()[0].clipboard_text();
        browser.handle_action(BrowserAction::CopySong(0));
        assert_eq!(browser.clipboard, Some(first));

        browser.handle_action(BrowserAction::CopySong(99));
        assert!(browser.clipboard.is_some());
    }

    #[test]
    fn random_pick_stays_within_results() {
        let mut browser = browser();
        browser.handle_action(BrowserAction::SetGenres(Selection::only(["Rock"])));
        browser.handle_action(BrowserAction::PickRandom);
        assert_eq!(browser.random_pick, Some(2));

        browser.handle_action(BrowserAction::SearchQuery("晴天".into()));
        assert_eq!(browser.random_pick, None);
        browser.handle_action(BrowserAction::SearchQuery("none at all".into()));
        browser.handle_action(BrowserAction::PickRandom);
        assert_eq!(browser.random_pick, None);
    }

    #[test]
    fn toggles_mark_prefs_for_saving() {
        let mut browser = browser();
        assert_eq!(browser.take_prefs_change(), None);

        browser.handle_action(BrowserAction::ToggleTheme);
        browser.handle_action(BrowserAction::ToggleViewMode);
        let saved = browser.take_prefs_change().unwrap();
        assert_eq!(saved.theme(), Theme::Dark);
        assert_eq!(saved.view_mode(), ViewMode::List);
        assert_eq!(browser.take_prefs_change(), None);

        browser.handle_action(BrowserAction::SetViewMode(ViewMode::List));
        assert_eq!(browser.take_prefs_change(), None);
    }

    #[test]
    fn config_sets_initial_sort_and_debounce() {
        let config = Config {
            default_sort: SortKey::TitleAsc,
            debounce_ms: 0,
            ..Config::default()
        };
        let mut browser = Browser::from_config(&config).unwrap();
        let catalog = Catalog::from_csv(CSV, Dialect::Naive);
        browser.handle_action(BrowserAction::CatalogLoaded(catalog));
        // Han sorts ahead of Latin under `zh`.
        assert_eq!(titles(&browser), vec!["七里香", "晴天", "Hotel California"]);

        let now = Instant::now();
        browser.handle_event(Event::SearchInput("七".into()), now);
        browser.handle_event(Event::Tick, now);
        assert_eq!(titles(&browser), vec!["七里香"]);
    }

    #[test]
    fn restored_prefs_apply() {
        let mut browser = browser();
        browser.apply_prefs(&SavedPrefs::new(Theme::Dark, ViewMode::List));
        assert_eq!(browser.theme, Theme::Dark);
        assert_eq!(browser.view_mode, ViewMode::List);
    }
}
