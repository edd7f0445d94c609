//! Search session state, independent of the GUI toolkit.
//!
//! The iced application forwards user actions here and renders whatever this
//! state says. A search runs in two halves: [`Session::begin_search`] before the
//! request and [`Session::finish_search`] when the answer comes back. Each
//! search gets a generation number so answers for a cleared or superseded
//! search are dropped.

use crate::catalog::{BookSummary, Field, SearchError, SearchForm, SearchQuery};
use crate::config::FormLayout;
use crate::preferences::ThemeMode;

pub const SEARCH_FAILED: &str = "Something went wrong while searching. Please try again.";
pub const SEARCH_BUSY: &str = "A search is already running.";

/// Transient message shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Why a submission did not start a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    /// Every field was blank
    Empty(&'static str),
    /// Another search is still in flight
    Busy,
}

impl Rejected {
    pub fn message(&self) -> &'static str {
        match self {
            Rejected::Empty(message) => *message,
            Rejected::Busy => SEARCH_BUSY,
        }
    }
}

/// A search that passed validation and should be sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: u64,
    pub query: SearchQuery,
}

/// Everything the UI shows.
#[derive(Debug, Clone)]
pub struct Session {
    pub form: SearchForm,
    pub results: Vec<BookSummary>,
    pub loading: bool,
    pub error: Option<Notice>,
    pub theme: ThemeMode,
    pub show_greeting: bool,
    pub selected: Option<usize>,
    generation: u64,
    next_notice: u64,
}

impl Session {
    pub fn new(layout: FormLayout, theme: ThemeMode) -> Self {
        Self {
            form: SearchForm::new(layout),
            results: Vec::new(),
            loading: false,
            error: None,
            theme,
            show_greeting: true,
            selected: None,
            generation: 0,
            next_notice: 0,
        }
    }

    /// Generation of the most recent search.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        self.form.set(field, value);
    }

    /// Validate the form and start a search.
    ///
    /// On success the results are cleared and the loading flag is set; the
    /// caller sends the returned query. On rejection the session is left
    /// untouched and the caller shows [`Rejected::message`].
    pub fn begin_search(&mut self) -> Result<PendingSearch, Rejected> {
        if self.loading {
            return Err(Rejected::Busy);
        }

        let Some(query) = self.form.to_query() else {
            return Err(Rejected::Empty(self.form.empty_message()));
        };

        self.generation += 1;
        self.results.clear();
        self.selected = None;
        self.error = None;
        self.loading = true;

        Ok(PendingSearch {
            generation: self.generation,
            query,
        })
    }

    /// Apply a provider answer. Returns `false` when the answer is stale and
    /// was dropped.
    pub fn finish_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<BookSummary>, SearchError>,
    ) -> bool {
        if generation != self.generation || !self.loading {
            tracing::debug!("Dropping stale search response (generation {})", generation);
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(books) => {
                self.results = books;
            }
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                self.results.clear();
                self.show_error(SEARCH_FAILED);
            }
        }
        true
    }

    /// Reset fields, results, selection and notices.
    pub fn clear(&mut self) {
        self.form.clear();
        self.results.clear();
        self.selected = None;
        self.error = None;
        self.loading = false;
        self.generation += 1;
    }

    /// Show `message` until [`Session::expire_error`] is called with the
    /// returned id.
    pub fn show_error(&mut self, message: impl Into<String>) -> u64 {
        self.next_notice += 1;
        self.error = Some(Notice {
            id: self.next_notice,
            message: message.into(),
        });
        self.next_notice
    }

    /// Hide the error notice if it is still the one with `id`.
    pub fn expire_error(&mut self, id: u64) {
        if self.error.as_ref().is_some_and(|notice| notice.id == id) {
            self.error = None;
        }
    }

    pub fn hide_greeting(&mut self) {
        self.show_greeting = false;
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Open the detail overlay for a result. Out of range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = Some(index);
        }
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    pub fn selected_book(&self) -> Option<&BookSummary> {
        self.selected.and_then(|i| self.results.get(i))
    }

    /// Nothing to show and nothing on the way.
    pub fn is_idle_empty(&self) -> bool {
        !self.loading && self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(FormLayout::Fields, ThemeMode::Light)
    }

    fn books(n: usize) -> Vec<BookSummary> {
        (0..n).map(|i| BookSummary::new(format!("Book {i}"))).collect()
    }

    fn started(session: &mut Session, title: &str) -> PendingSearch {
        session.set_field(Field::Title, title.to_string());
        session.begin_search().unwrap()
    }

    #[test]
    fn empty_submit_is_rejected_without_request() {
        let mut session = session();
        let rejected = session.begin_search().unwrap_err();
        assert_eq!(
            rejected,
            Rejected::Empty("Please enter a title, author, or subject.")
        );
        assert!(!session.loading);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn begin_clears_previous_results_and_sets_loading() {
        let mut session = session();
        let first = started(&mut session, "Dune");
        session.finish_search(first.generation, Ok(books(3)));
        session.select(1);

        let second = session.begin_search().unwrap();
        assert!(session.loading);
        assert!(session.results.is_empty());
        assert_eq!(session.selected, None);
        assert_eq!(second.query.title.as_deref(), Some("Dune"));
        assert_eq!(second.generation, first.generation + 1);
    }

    #[test]
    fn success_yields_exactly_n_results() {
        for n in [0, 1, 20] {
            let mut session = session();
            let pending = started(&mut session, "Dune");
            assert!(session.finish_search(pending.generation, Ok(books(n))));
            assert_eq!(session.results.len(), n);
            assert!(!session.loading);
            assert!(session.error.is_none());
        }
    }

    #[test]
    fn failure_yields_no_results_and_expiring_error() {
        let mut session = session();
        let pending = started(&mut session, "Dune");
        session.finish_search(pending.generation, Err(SearchError::Request("offline".into())));

        assert!(session.results.is_empty());
        assert!(!session.loading);
        let notice = session.error.clone().unwrap();
        assert_eq!(notice.message, SEARCH_FAILED);

        session.expire_error(notice.id);
        assert!(session.error.is_none());
    }

    #[test]
    fn old_timer_does_not_hide_newer_error() {
        let mut session = session();
        let first = session.show_error("one");
        let second = session.show_error("two");

        session.expire_error(first);
        assert_eq!(session.error.as_ref().map(|n| n.id), Some(second));

        session.expire_error(second);
        assert!(session.error.is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = session();
        session.set_field(Field::Author, "Austen".into());
        session.set_field(Field::Subject, "Romance".into());
        let pending = session.begin_search().unwrap();
        session.finish_search(pending.generation, Ok(books(4)));
        session.select(2);
        session.show_error("boom");

        session.clear();
        assert_eq!(session.form, SearchForm::new(FormLayout::Fields));
        assert!(session.results.is_empty());
        assert!(session.selected.is_none());
        assert!(session.error.is_none());
        assert!(!session.loading);
    }

    #[test]
    fn late_response_after_clear_is_dropped() {
        let mut session = session();
        let pending = started(&mut session, "Dune");
        session.clear();

        assert!(!session.finish_search(pending.generation, Ok(books(5))));
        assert!(session.results.is_empty());
    }

    #[test]
    fn second_submit_while_loading_is_busy() {
        let mut session = session();
        started(&mut session, "Dune");
        assert_eq!(session.begin_search().unwrap_err(), Rejected::Busy);
    }

    #[test]
    fn select_and_dismiss_keep_results() {
        let mut session = session();
        let pending = started(&mut session, "Dune");
        session.finish_search(pending.generation, Ok(books(3)));

        session.select(2);
        assert_eq!(session.selected_book().map(|b| b.title.as_str()), Some("Book 2"));

        session.dismiss();
        assert!(session.selected.is_none());
        assert_eq!(session.results, books(3));
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut session = session();
        session.select(0);
        assert!(session.selected.is_none());
    }

    #[test]
    fn free_text_layout_message() {
        let mut session = Session::new(FormLayout::FreeText, ThemeMode::Dark);
        assert_eq!(
            session.begin_search().unwrap_err().message(),
            "Please enter something to search for."
        );
    }

    #[test]
    fn greeting_and_theme() {
        let mut session = session();
        assert!(session.show_greeting);
        session.hide_greeting();
        assert!(!session.show_greeting);

        assert_eq!(session.toggle_theme(), ThemeMode::Dark);
        assert_eq!(session.toggle_theme(), ThemeMode::Light);
    }
}
