//! # View Controller
//!
//! The controller is the single entry point for UI clients. It owns the view state,
//! the loaded shows, and the current error banner, and it dispatches to `commands`.
//!
//! ## View states
//!
//! ```text
//!  Unauthenticated ──login──▶ Loading ──fetched──▶ ShowList ◀──back── ShowDetail
//!         ▲                                            │                  ▲
//!         └──────────────────logout────────────────────┴──────select──────┘
//! ```
//!
//! Errors never move the view. They set a message ([`Controller::error`]) that stays
//! until dismissed or until the next action starts.
//!
//! ## One action at a time
//!
//! Actions run to completion before returning. While one runs, [`SingleFlight`] is
//! held, and any other action is answered with [`ActionOutcome::Ignored`]. Clients can
//! hold a clone of the flag (see [`Controller::flight`]) to grey out their controls.
//!
//! ## Generic over the outside world
//!
//! `Controller<C: Catalog, P: CredentialProvider>`:
//! - Production: `Controller<HttpCatalog, FileCredentials>`
//! - Testing: `Controller<InMemoryCatalog, InMemoryCredentials>`
//!
//! The canvas is passed per call to [`Controller::insert`], since a client may
//! target a different design each time.

use crate::auth::{BearerToken, CredentialProvider};
use crate::canvas::CanvasSink;
use crate::catalog::Catalog;
use crate::commands::{self, InsertReport, ShowSelector};
use crate::error::ShowCanvasError;
use crate::layout::LayoutKind;
use crate::model::Show;
use std::cell::Cell;
use std::mem;
use std::rc::Rc;
use tracing::error;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Unauthenticated,
    Loading,
    ShowList { query: String },
    ShowDetail { show: Show, query: String },
}

impl View {
    fn query(&self) -> &str {
        match self {
            View::ShowList { query } | View::ShowDetail { query, .. } => query,
            View::Unauthenticated | View::Loading => "",
        }
    }
}

/// Shared "an action is running" flag.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight(Rc<Cell<bool>>);

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.get()
    }

    /// Claim the flag, or `None` if an action already holds it.
    pub fn try_begin(&self) -> Option<FlightGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(FlightGuard(Rc::clone(&self.0)))
    }
}

/// Releases the flag when dropped.
#[derive(Debug)]
pub struct FlightGuard(Rc<Cell<bool>>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ActionOutcome<T> {
    Completed(T),
    /// The action ran and failed; the message is in [`Controller::error`].
    Failed,
    /// Another action was in flight, or the action does not apply to the current view.
    Ignored,
}

impl<T> ActionOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            ActionOutcome::Completed(value) => Some(value),
            ActionOutcome::Failed | ActionOutcome::Ignored => None,
        }
    }
}

pub struct Controller<C: Catalog, P: CredentialProvider> {
    catalog: C,
    credentials: P,
    view: View,
    shows: Vec<Show>,
    error: Option<String>,
    flight: SingleFlight,
}

impl<C: Catalog, P: CredentialProvider> Controller<C, P> {
    pub fn new(catalog: C, credentials: P) -> Self {
        Self {
            catalog,
            credentials,
            view: View::Unauthenticated,
            shows: Vec::new(),
            error: None,
            flight: SingleFlight::new(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn credentials(&self) -> &P {
        &self.credentials
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn flight(&self) -> SingleFlight {
        self.flight.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    /// Shows visible under the current search, in catalog order.
    pub fn filtered_shows(&self) -> Vec<&Show> {
        commands::search::run(&self.shows, self.view.query())
    }

    /// Pick up an existing session. Without a stored token this is a no-op and the
    /// view stays `Unauthenticated`.
    pub fn start(&mut self) -> ActionOutcome<usize> {
        if self.credentials.token().is_none() {
            self.view = View::Unauthenticated;
            return ActionOutcome::Completed(0);
        }
        self.refresh()
    }

    /// Finish the out-of-band sign-in with the token the service handed back.
    pub fn complete_login(&mut self, token: BearerToken) -> ActionOutcome<usize> {
        let Some(_flight) = self.flight.try_begin() else {
            return ActionOutcome::Ignored;
        };
        if let Err(err) = self.credentials.store(&token) {
            self.fail(err);
            return ActionOutcome::Failed;
        }
        self.load_shows()
    }

    /// Re-fetch the show list. Lands on `ShowList`, keeping the search query.
    pub fn refresh(&mut self) -> ActionOutcome<usize> {
        let Some(_flight) = self.flight.try_begin() else {
            return ActionOutcome::Ignored;
        };
        self.load_shows()
    }

    pub fn logout(&mut self) -> ActionOutcome<()> {
        let Some(_flight) = self.flight.try_begin() else {
            return ActionOutcome::Ignored;
        };
        if let Err(err) = self.credentials.clear() {
            self.fail(err);
            return ActionOutcome::Failed;
        }
        self.shows.clear();
        self.error = None;
        self.view = View::Unauthenticated;
        ActionOutcome::Completed(())
    }

    /// Update the search query. Returns how many shows match.
    pub fn search(&mut self, query: &str) -> ActionOutcome<usize> {
        if self.is_busy() {
            return ActionOutcome::Ignored;
        }
        match &mut self.view {
            View::ShowList { query: current } => {
                *current = query.to_string();
                ActionOutcome::Completed(self.filtered_shows().len())
            }
            _ => ActionOutcome::Ignored,
        }
    }

    /// Open a show from the list.
    pub fn select(&mut self, selector: &ShowSelector) -> ActionOutcome<()> {
        let Some(_flight) = self.flight.try_begin() else {
            return ActionOutcome::Ignored;
        };
        let View::ShowList { query } = &self.view else {
            return ActionOutcome::Ignored;
        };
        let query = query.clone();

        let found = {
            let visible = self.filtered_shows();
            commands::helpers::find_show(&visible, &self.shows, selector).cloned()
        };
        match found {
            Ok(show) => {
                self.error = None;
                self.view = View::ShowDetail { show, query };
                ActionOutcome::Completed(())
            }
            Err(err) => {
                self.fail(err);
                ActionOutcome::Failed
            }
        }
    }

    /// Leave the detail view.
    pub fn back(&mut self) -> ActionOutcome<()> {
        if self.is_busy() {
            return ActionOutcome::Ignored;
        }
        match mem::replace(&mut self.view, View::Loading) {
            View::ShowDetail { query, .. } => {
                self.view = View::ShowList { query };
                ActionOutcome::Completed(())
            }
            other => {
                self.view = other;
                ActionOutcome::Ignored
            }
        }
    }

    /// Lay out the selected show with `kind` and write it into `sink`.
    pub fn insert<K: CanvasSink>(&mut self, kind: LayoutKind, sink: &mut K) -> ActionOutcome<InsertReport> {
        let Some(_flight) = self.flight.try_begin() else {
            return ActionOutcome::Ignored;
        };
        let selected = match &self.view {
            View::ShowDetail { show, .. } => Some(show.clone()),
            _ => None,
        };
        let Some(show) = selected else {
            self.fail(ShowCanvasError::InvalidState(
                "open a show before inserting it".to_string(),
            ));
            return ActionOutcome::Failed;
        };

        self.error = None;
        match commands::insert::run(sink, &show, kind) {
            Ok(report) => ActionOutcome::Completed(report),
            Err(err) => {
                error!(show = %show.id, layout = %kind, error = %err, "insert failed");
                self.error = Some(commands::insert::failure_message(kind, &err.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    fn load_shows(&mut self) -> ActionOutcome<usize> {
        let previous = mem::replace(&mut self.view, View::Loading);
        let query = previous.query().to_string();
        self.error = None;

        match commands::shows::load(&self.catalog, &self.credentials) {
            Ok(shows) => {
                let count = shows.len();
                self.shows = shows;
                self.view = View::ShowList { query };
                ActionOutcome::Completed(count)
            }
            Err(ShowCanvasError::NotAuthenticated) => {
                self.view = match previous {
                    View::Unauthenticated | View::Loading => View::Unauthenticated,
                    other => other,
                };
                self.fail(ShowCanvasError::NotAuthenticated);
                ActionOutcome::Failed
            }
            Err(err) => {
                error!(error = %err, "error loading shows");
                self.view = match previous {
                    View::Unauthenticated | View::Loading => View::ShowList { query },
                    other => other,
                };
                self.fail(err);
                ActionOutcome::Failed
            }
        }
    }

    fn fail(&mut self, err: ShowCanvasError) {
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryCredentials;
    use crate::canvas::memory::RecordingCanvas;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::catalog::memory::fixtures::ShowFixture;
    use crate::error::Result;
    use crate::layout::{AssetRef, ImageUpload, Placement};

    type TestController = Controller<InMemoryCatalog, InMemoryCredentials>;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            ShowFixture::new("Glitter Brunch")
                .with_performers(&["Lady Sparkle", "Miss Tique"])
                .show,
            ShowFixture::new("Drag Bingo").with_venue("Pier 9").show,
        ])
        .with_token("tok")
    }

    fn signed_in() -> TestController {
        let mut controller = Controller::new(catalog(), InMemoryCredentials::signed_in("tok"));
        assert_eq!(controller.start(), ActionOutcome::Completed(2));
        controller
    }

    fn in_detail() -> TestController {
        let mut controller = signed_in();
        assert!(controller.select(&ShowSelector::Index(1)).is_completed());
        controller
    }

    #[test]
    fn starts_unauthenticated_without_token() {
        let mut controller = Controller::new(catalog(), InMemoryCredentials::new());
        assert_eq!(controller.start(), ActionOutcome::Completed(0));
        assert_eq!(controller.view(), &View::Unauthenticated);
        assert!(controller.shows().is_empty());
    }

    #[test]
    fn login_stores_token_and_lists_shows() {
        let mut controller = Controller::new(catalog(), InMemoryCredentials::new());
        assert_eq!(
            controller.complete_login(BearerToken::new("tok")),
            ActionOutcome::Completed(2)
        );
        assert_eq!(controller.view(), &View::ShowList { query: String::new() });
        assert!(controller.credentials().token().is_some());
    }

    #[test]
    fn failed_fetch_after_login_shows_empty_list_with_error() {
        let mut controller =
            Controller::new(InMemoryCatalog::failing(), InMemoryCredentials::new());
        assert_eq!(
            controller.complete_login(BearerToken::new("tok")),
            ActionOutcome::Failed
        );
        assert!(matches!(controller.view(), View::ShowList { .. }));
        assert!(controller.shows().is_empty());
        assert!(controller.error().unwrap().starts_with("Failed to load shows"));

        controller.dismiss_error();
        assert!(controller.error().is_none());
    }

    #[test]
    fn search_filters_and_select_uses_visible_positions() {
        let mut controller = signed_in();
        assert_eq!(controller.search("pier"), ActionOutcome::Completed(1));
        assert!(controller.select(&ShowSelector::Index(1)).is_completed());

        match controller.view() {
            View::ShowDetail { show, query } => {
                assert_eq!(show.title, "Drag Bingo");
                assert_eq!(query, "pier");
            }
            other => panic!("expected detail, got {:?}", other),
        }

        assert!(controller.back().is_completed());
        assert_eq!(controller.view(), &View::ShowList { query: "pier".into() });
    }

    #[test]
    fn selecting_a_missing_show_keeps_the_list() {
        let mut controller = signed_in();
        assert_eq!(controller.select(&ShowSelector::Index(9)), ActionOutcome::Failed);
        assert!(matches!(controller.view(), View::ShowList { .. }));
        assert!(controller.error().unwrap().contains("Show not found"));
    }

    #[test]
    fn back_outside_detail_is_ignored() {
        let mut controller = signed_in();
        assert_eq!(controller.back(), ActionOutcome::Ignored);
        assert!(matches!(controller.view(), View::ShowList { .. }));
    }

    #[test]
    fn insert_poster_from_detail() {
        let mut controller = in_detail();
        let mut canvas = RecordingCanvas::new();

        let report = controller
            .insert(LayoutKind::Poster, &mut canvas)
            .completed()
            .unwrap();
        assert_eq!(report.placed, 5);
        assert_eq!(canvas.placed().len(), 5);
        assert!(matches!(controller.view(), View::ShowDetail { .. }));
        assert!(!controller.is_busy());
    }

    #[test]
    fn insert_failure_sets_message_and_keeps_detail() {
        let mut controller = in_detail();
        let mut canvas = RecordingCanvas::new().failing_place_at(1);

        assert_eq!(controller.insert(LayoutKind::Grid, &mut canvas), ActionOutcome::Failed);
        assert!(controller
            .error()
            .unwrap()
            .starts_with("Failed to insert performers"));
        assert_eq!(canvas.placed().len(), 1);
        assert!(matches!(controller.view(), View::ShowDetail { .. }));
        assert!(!controller.is_busy());
    }

    #[test]
    fn insert_without_selection_fails() {
        let mut controller = signed_in();
        let mut canvas = RecordingCanvas::new();
        assert_eq!(controller.insert(LayoutKind::Poster, &mut canvas), ActionOutcome::Failed);
        assert!(canvas.placed().is_empty());
    }

    #[test]
    fn actions_are_ignored_while_one_is_in_flight() {
        let mut controller = in_detail();
        let mut canvas = RecordingCanvas::new();

        let guard = controller.flight().try_begin().unwrap();
        assert_eq!(controller.insert(LayoutKind::Poster, &mut canvas), ActionOutcome::Ignored);
        assert_eq!(controller.refresh(), ActionOutcome::Ignored);
        assert_eq!(controller.back(), ActionOutcome::Ignored);
        assert!(canvas.placed().is_empty());
        drop(guard);

        assert!(controller.insert(LayoutKind::Poster, &mut canvas).is_completed());
    }

    /// Canvas that checks the flight flag each time it is called.
    struct ProbeCanvas {
        flight: SingleFlight,
        second_action_refused: Vec<bool>,
    }

    impl CanvasSink for ProbeCanvas {
        fn place(&mut self, _placement: &Placement) -> Result<()> {
            self.second_action_refused
                .push(self.flight.is_busy() && self.flight.try_begin().is_none());
            Ok(())
        }

        fn upload(&mut self, _image: &ImageUpload) -> Result<AssetRef> {
            Ok(AssetRef("probe".into()))
        }
    }

    #[test]
    fn flight_is_held_for_the_whole_insert() {
        let mut controller = in_detail();
        let mut canvas = ProbeCanvas {
            flight: controller.flight(),
            second_action_refused: Vec::new(),
        };

        assert!(controller.insert(LayoutKind::Poster, &mut canvas).is_completed());
        assert_eq!(canvas.second_action_refused.len(), 5);
        assert!(canvas.second_action_refused.iter().all(|refused| *refused));
        assert!(!controller.is_busy());
    }

    #[test]
    fn logout_returns_to_unauthenticated() {
        let mut controller = signed_in();
        assert!(controller.logout().is_completed());
        assert_eq!(controller.view(), &View::Unauthenticated);
        assert!(controller.shows().is_empty());
        assert!(controller.credentials().token().is_none());
    }

    #[test]
    fn refresh_without_token_keeps_detail_view() {
        let mut controller = in_detail();

        // session file removed behind the controller's back
        controller.credentials = InMemoryCredentials::new();
        assert_eq!(controller.refresh(), ActionOutcome::Failed);

        assert!(matches!(controller.view(), View::ShowDetail { .. }));
        assert_eq!(controller.shows().len(), 2);
        assert!(controller.error().unwrap().starts_with("Not connected"));
    }

    #[test]
    fn refresh_failure_keeps_stale_list() {
        let mut controller = Controller::new(
            InMemoryCatalog::new(vec![ShowFixture::new("A").show]).with_token("tok"),
            InMemoryCredentials::signed_in("tok"),
        );
        assert!(controller.start().is_completed());

        // token revoked on the server side
        controller.credentials = InMemoryCredentials::signed_in("expired");
        assert_eq!(controller.refresh(), ActionOutcome::Failed);
        assert_eq!(controller.shows().len(), 1);
        assert!(matches!(controller.view(), View::ShowList { .. }));
    }
}
