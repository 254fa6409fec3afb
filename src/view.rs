//! Per-page browse/search state for the dashboard.
//!
//! Each transition returns an [`Effect`] describing the fetch the driver has to
//! perform; results come back through [`BrowseState::default_loaded`],
//! [`BrowseState::search_completed`] or [`BrowseState::fetch_failed`] together
//! with the ticket of the request that produced them. Default loads and
//! searches are tracked separately: only the latest ticket of each kind is
//! applied, and a default load only replaces the visible items while no search
//! has taken over the page.
use crate::media::{Media, MediaKind};
use crate::models::{MediaCollections, Movie, TvShow};
use crate::present::{self, Section};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Searching,
    Results,
    Empty,
}

/// What a blank search submission does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankQuery {
    /// Show the collection loaded on mount again, without a request.
    RestoreOriginal,
    /// Request the default collection again.
    Refetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    LoadDefault { ticket: u64 },
    Search { query: String, ticket: u64 },
}

/// A list a page can hold: a single kind or the movies/shows pair.
pub trait Collection: Clone + Default {
    fn is_empty(&self) -> bool;
    fn find(&self, kind: MediaKind, id: u64) -> Option<Media>;
    fn sections(&self, searching: bool) -> Vec<Section>;
}

fn to_media<T: Clone + Into<Media>>(items: &[T]) -> Vec<Media> {
    items.iter().cloned().map(Into::into).collect()
}

impl Collection for Vec<Movie> {
    fn is_empty(&self) -> bool {
        <[Movie]>::is_empty(self)
    }

    fn find(&self, kind: MediaKind, id: u64) -> Option<Media> {
        if kind != MediaKind::Movie {
            return None;
        }
        self.iter().find(|m| m.id == id).cloned().map(Media::Movie)
    }

    fn sections(&self, searching: bool) -> Vec<Section> {
        Section::build(MediaKind::Movie, &to_media(self), searching)
            .into_iter()
            .collect()
    }
}

impl Collection for Vec<TvShow> {
    fn is_empty(&self) -> bool {
        <[TvShow]>::is_empty(self)
    }

    fn find(&self, kind: MediaKind, id: u64) -> Option<Media> {
        if kind != MediaKind::Show {
            return None;
        }
        self.iter().find(|s| s.id == id).cloned().map(Media::Show)
    }

    fn sections(&self, searching: bool) -> Vec<Section> {
        Section::build(MediaKind::Show, &to_media(self), searching)
            .into_iter()
            .collect()
    }
}

impl Collection for MediaCollections {
    fn is_empty(&self) -> bool {
        MediaCollections::is_empty(self)
    }

    fn find(&self, kind: MediaKind, id: u64) -> Option<Media> {
        match kind {
            MediaKind::Movie => self.movies.find(kind, id),
            MediaKind::Show => self.shows.find(kind, id),
        }
    }

    fn sections(&self, searching: bool) -> Vec<Section> {
        let mut out = self.movies.sections(searching);
        out.extend(self.shows.sections(searching));
        out
    }
}

#[derive(Debug, Clone)]
pub struct BrowseState<C: Collection> {
    blank_query: BlankQuery,
    phase: Phase,
    /// Phase to return to when an in-flight search fails.
    settled: Phase,
    original: C,
    items: C,
    query: String,
    selected: Option<Media>,
    last_ticket: u64,
    default_pending: Option<u64>,
    search_pending: Option<u64>,
    /// Cleared once a search owns the visible items.
    showing_default: bool,
}

impl<C: Collection> BrowseState<C> {
    pub fn new(blank_query: BlankQuery) -> Self {
        Self {
            blank_query,
            phase: Phase::Browsing,
            settled: Phase::Browsing,
            original: C::default(),
            items: C::default(),
            query: String::new(),
            selected: None,
            last_ticket: 0,
            default_pending: None,
            search_pending: None,
            showing_default: true,
        }
    }

    fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    fn load_default(&mut self) -> Effect {
        let ticket = self.next_ticket();
        self.default_pending = Some(ticket);
        Effect::LoadDefault { ticket }
    }

    fn show_original(&mut self) {
        self.items = self.original.clone();
        self.phase = Phase::Browsing;
        self.settled = Phase::Browsing;
    }

    pub fn mount(&mut self) -> Effect {
        self.showing_default = true;
        self.load_default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn submit_search(&mut self) -> Effect {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return match self.blank_query {
                BlankQuery::RestoreOriginal => {
                    // A default load still in flight keeps running and fills the page.
                    self.search_pending = None;
                    self.showing_default = true;
                    self.show_original();
                    Effect::None
                }
                BlankQuery::Refetch => {
                    self.search_pending = None;
                    self.showing_default = true;
                    self.load_default()
                }
            };
        }

        if self.phase != Phase::Searching {
            self.settled = self.phase;
        }
        self.phase = Phase::Searching;
        self.showing_default = false;
        let query = self.query.clone();
        let ticket = self.next_ticket();
        self.search_pending = Some(ticket);
        Effect::Search { query, ticket }
    }

    /// Always records the collection as the page's original; the visible items
    /// follow only while no search has taken over. Returns whether the response
    /// was applied.
    pub fn default_loaded(&mut self, ticket: u64, collection: C) -> bool {
        if self.default_pending != Some(ticket) {
            debug!(ticket, pending = ?self.default_pending, "Dropping stale default load");
            return false;
        }
        self.default_pending = None;
        self.original = collection;
        if self.showing_default {
            self.show_original();
        }
        true
    }

    /// Returns whether the response was applied.
    pub fn search_completed(&mut self, ticket: u64, collection: C) -> bool {
        if self.search_pending != Some(ticket) {
            debug!(ticket, pending = ?self.search_pending, "Dropping stale search response");
            return false;
        }
        self.search_pending = None;
        self.phase = if collection.is_empty() {
            Phase::Empty
        } else {
            Phase::Results
        };
        self.settled = self.phase;
        self.items = collection;
        true
    }

    /// Fetch errors are only logged. A failed search keeps what the page was
    /// showing; a failed default load with a blank query falls back to the
    /// last original collection.
    pub fn fetch_failed(&mut self, ticket: u64, error: &anyhow::Error) {
        if self.default_pending == Some(ticket) {
            self.default_pending = None;
            warn!("Dashboard default load failed: {:#}", error);
            if self.showing_default {
                self.show_original();
            }
        } else if self.search_pending == Some(ticket) {
            self.search_pending = None;
            warn!("Dashboard search failed: {:#}", error);
            if self.phase == Phase::Searching {
                self.phase = self.settled;
            }
        } else {
            debug!(ticket, "Dropping stale fetch failure");
        }
    }

    /// Opens the detail view for one item, replacing any previous selection.
    pub fn select(&mut self, kind: MediaKind, id: u64) -> bool {
        match self.items.find(kind, id) {
            Some(media) => {
                self.selected = Some(media);
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Media> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &C {
        &self.items
    }

    pub fn original(&self) -> &C {
        &self.original
    }

    pub fn is_loading(&self) -> bool {
        self.default_pending.is_some() || self.search_pending.is_some()
    }

    pub fn heading<'a>(&self, default_title: &'a str) -> &'a str {
        present::page_heading(default_title, &self.query)
    }

    pub fn sections(&self) -> Vec<Section> {
        self.items.sections(!self.query.is_empty())
    }

    pub fn no_results_message(&self) -> Option<String> {
        present::no_results_message(&self.query, self.items.is_empty())
    }
}
