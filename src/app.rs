//! Application state management for skycast
//!
//! [`App`] is the view-state controller: it owns the [`ViewState`], turns key
//! presses into commands, and commits fetch and insight results. Every request
//! carries a sequence number; only the result of the latest request is applied,
//! older completions are dropped.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::cli::StartupConfig;
use crate::contact::ContactForm;
use crate::data::{
    FetchError, ForecastSnapshot, InsightClient, WeatherClient, WeatherSnapshot,
};
use crate::history::SearchHistory;
use crate::worker::WorkerMessage;

/// Shown whenever a fetch cycle fails, whatever the cause
pub const FETCH_ERROR_MESSAGE: &str = "Could not fetch weather data. Please try another city.";

/// Which screen has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Main weather dashboard
    Dashboard,
    /// Typing a city name
    Search,
    /// Filling in the contact form
    Contact,
}

/// Progress of the current fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Progress of the current insight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightStatus {
    Idle,
    Loading,
    Loaded,
}

/// Everything the presentation layer reads
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Canonical city name (as echoed by the provider after a successful fetch)
    pub city: String,
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Option<ForecastSnapshot>,
    pub history: SearchHistory,
    /// Empty until an insight has been received
    pub ai_insight: String,
    /// Empty when there is no error
    pub error: String,
    pub fetch_status: FetchStatus,
    pub insight_status: InsightStatus,
}

impl ViewState {
    fn new(city: &str) -> Self {
        Self {
            city: city.to_string(),
            weather: None,
            forecast: None,
            history: SearchHistory::new(),
            ai_insight: String::new(),
            error: String::new(),
            fetch_status: FetchStatus::Idle,
            insight_status: InsightStatus::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_status == FetchStatus::Loading
    }

    pub fn is_ai_loading(&self) -> bool {
        self.insight_status == InsightStatus::Loading
    }
}

/// A fetch cycle that has been started but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub city: String,
}

/// Result of a fetch cycle
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<(WeatherSnapshot, ForecastSnapshot), FetchError>,
}

/// An insight request that has been started but not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct InsightTicket {
    pub seq: u64,
    pub snapshot: WeatherSnapshot,
}

/// Result of an insight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightOutcome {
    pub seq: u64,
    pub text: String,
}

/// Network work requested by key handling, picked up by the main loop
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Fetch(FetchTicket),
    Insight(InsightTicket),
}

/// Runs one fetch cycle: current conditions, then the forecast
pub async fn run_fetch(client: &WeatherClient, ticket: FetchTicket) -> FetchOutcome {
    FetchOutcome {
        seq: ticket.seq,
        result: fetch_cycle(client, &ticket.city).await,
    }
}

async fn fetch_cycle(
    client: &WeatherClient,
    city: &str,
) -> Result<(WeatherSnapshot, ForecastSnapshot), FetchError> {
    let current = client.fetch_current(city).await?;
    let forecast = client.fetch_forecast(city).await?;
    Ok((current, forecast))
}

/// Runs one insight request
pub async fn run_insight(client: &InsightClient, ticket: InsightTicket) -> InsightOutcome {
    InsightOutcome {
        seq: ticket.seq,
        text: client.get_insight(&ticket.snapshot).await,
    }
}

/// Main application struct managing state and data
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Text typed into the search box
    pub search_input: String,
    /// Contact form contents
    pub contact: ContactForm,
    /// Result of the last contact form submission (link or validation message)
    pub contact_notice: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Animation frame counter
    pub tick: u64,
    view: ViewState,
    contact_email: String,
    fetch_seq: u64,
    insight_seq: u64,
    tasks: Vec<Task>,
    weather_client: WeatherClient,
    insight_client: InsightClient,
}

impl App {
    /// Creates a new App from the startup configuration
    pub fn new(config: &StartupConfig) -> Self {
        let weather_client =
            WeatherClient::new(config.weather_api_key.clone()).with_base_url(&config.weather_url);
        let insight_client =
            InsightClient::new(config.gemini_api_key.clone()).with_base_url(&config.insight_url);

        let mut app = Self::with_clients(&config.default_city, weather_client, insight_client);
        app.contact_email = config.contact_email.clone();
        app
    }

    /// Creates a new App instance with custom clients
    pub fn with_clients(
        default_city: &str,
        weather_client: WeatherClient,
        insight_client: InsightClient,
    ) -> Self {
        Self {
            state: AppState::Dashboard,
            search_input: String::new(),
            contact: ContactForm::new(),
            contact_notice: None,
            show_help: false,
            should_quit: false,
            tick: 0,
            view: ViewState::new(default_city),
            contact_email: crate::contact::DEFAULT_CONTACT_EMAIL.to_string(),
            fetch_seq: 0,
            insight_seq: 0,
            tasks: Vec::new(),
            weather_client,
            insight_client,
        }
    }

    /// Read-only view of the state for rendering
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn weather_client(&self) -> &WeatherClient {
        &self.weather_client
    }

    pub fn insight_client(&self) -> &InsightClient {
        &self.insight_client
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Runs a complete fetch cycle for `city` and applies the result
    pub async fn fetch_weather_data(&mut self, city: &str) {
        let Some(ticket) = self.start_fetch(city) else {
            return;
        };
        let outcome = run_fetch(&self.weather_client, ticket).await;
        self.apply_fetch(outcome);
    }

    /// Requests an insight for the loaded snapshot and applies it.
    ///
    /// Does nothing when no snapshot is loaded.
    pub async fn request_insight(&mut self) {
        let Some(ticket) = self.start_insight() else {
            return;
        };
        let outcome = run_insight(&self.insight_client, ticket).await;
        self.apply_insight(outcome);
    }

    /// Enters the loading state for `city` and issues a new fetch ticket.
    ///
    /// Clears the error and the previous insight; an insight still in flight
    /// becomes stale. Returns `None` for a blank city.
    pub fn start_fetch(&mut self, city: &str) -> Option<FetchTicket> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        self.fetch_seq += 1;
        self.insight_seq += 1;
        self.view.fetch_status = FetchStatus::Loading;
        self.view.error.clear();
        self.view.ai_insight.clear();
        self.view.insight_status = InsightStatus::Idle;

        Some(FetchTicket {
            seq: self.fetch_seq,
            city: city.to_string(),
        })
    }

    /// Commits a fetch result if it belongs to the latest ticket.
    ///
    /// On failure the previous snapshot and forecast stay in place.
    /// Returns whether the outcome was applied.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.fetch_seq {
            warn!(
                seq = outcome.seq,
                latest = self.fetch_seq,
                "Discarding stale fetch result"
            );
            return false;
        }

        match outcome.result {
            Ok((weather, forecast)) => {
                info!(city = %weather.name, entries = forecast.list.len(), "Weather loaded");
                self.view.city = weather.name.clone();
                self.view.history.record(weather.clone());
                self.view.weather = Some(weather);
                self.view.forecast = Some(forecast);
                self.view.fetch_status = FetchStatus::Loaded;
                // Any insight still pending describes the previous snapshot
                self.insight_seq += 1;
                self.view.ai_insight.clear();
                self.view.insight_status = InsightStatus::Idle;
            }
            Err(e) => {
                warn!(error = %e, "Weather fetch failed");
                self.view.error = FETCH_ERROR_MESSAGE.to_string();
                self.view.fetch_status = FetchStatus::Error;
            }
        }
        true
    }

    /// Enters the AI-loading state and issues a new insight ticket.
    ///
    /// Returns `None` when no snapshot is loaded, a fetch cycle is running, or
    /// an insight request is already running.
    pub fn start_insight(&mut self) -> Option<InsightTicket> {
        let snapshot = self.view.weather.clone()?;
        if self.view.is_loading() || self.view.is_ai_loading() {
            return None;
        }

        self.insight_seq += 1;
        self.view.insight_status = InsightStatus::Loading;

        Some(InsightTicket {
            seq: self.insight_seq,
            snapshot,
        })
    }

    /// Stores an insight if it belongs to the latest ticket.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_insight(&mut self, outcome: InsightOutcome) -> bool {
        if outcome.seq != self.insight_seq {
            warn!(
                seq = outcome.seq,
                latest = self.insight_seq,
                "Discarding stale insight"
            );
            return false;
        }

        self.view.ai_insight = outcome.text;
        self.view.insight_status = InsightStatus::Loaded;
        true
    }

    /// Applies a message from the background worker
    pub fn apply_message(&mut self, message: WorkerMessage) -> bool {
        match message {
            WorkerMessage::FetchFinished(outcome) => self.apply_fetch(outcome),
            WorkerMessage::InsightFinished(outcome) => self.apply_insight(outcome),
        }
    }

    /// Takes the network work queued by key handling
    pub fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    /// Queues a fetch cycle for `city`
    pub fn queue_fetch(&mut self, city: &str) {
        if let Some(ticket) = self.start_fetch(city) {
            self.tasks.push(Task::Fetch(ticket));
        }
    }

    /// Queues an insight request for the loaded snapshot
    pub fn queue_insight(&mut self) {
        if let Some(ticket) = self.start_insight() {
            self.tasks.push(Task::Insight(ticket));
        }
    }

    /// Advances the animation frame counter
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `Ctrl-C`: Quit from anywhere
    /// - `q` or `Esc` (in Dashboard): Quit the application
    /// - `/` or `s`: Search for a city
    /// - `a`: Ask for an AI insight
    /// - `1`-`5`: Reload a recent search
    /// - `r`: Reload the current city
    /// - `c`: Open the contact form
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Dashboard => self.handle_dashboard_key(key_event),
            AppState::Search => self.handle_search_key(key_event),
            AppState::Contact => self.handle_contact_key(key_event),
        }
    }

    fn handle_dashboard_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search_input.clear();
                self.state = AppState::Search;
            }
            KeyCode::Char('a') => {
                self.queue_insight();
            }
            KeyCode::Char('r') => {
                let city = self.view.city.clone();
                self.queue_fetch(&city);
            }
            KeyCode::Char('c') => {
                self.contact_notice = None;
                self.state = AppState::Contact;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char(digit @ '1'..='5') => {
                let index = digit as usize - '1' as usize;
                if let Some(name) = self.view.history.get(index).map(|entry| entry.name.clone()) {
                    self.queue_fetch(&name);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.search_input.clear();
                self.state = AppState::Dashboard;
            }
            KeyCode::Enter => {
                let city = self.search_input.trim().to_string();
                if city.is_empty() {
                    return;
                }
                self.search_input.clear();
                self.state = AppState::Dashboard;
                self.queue_fetch(&city);
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('s')
        {
            self.submit_contact();
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.state = AppState::Dashboard;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.contact.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.contact.focus_previous();
            }
            KeyCode::Enter => {
                if self.contact.focus == crate::contact::ContactField::Message {
                    self.contact.newline();
                } else {
                    self.contact.focus_next();
                }
            }
            KeyCode::Backspace => {
                self.contact.pop_char();
            }
            KeyCode::Char(c) => {
                self.contact.push_char(c);
            }
            _ => {}
        }
    }

    /// Validates the contact form and composes the `mailto:` link
    pub fn submit_contact(&mut self) {
        match self.contact.mailto_link(&self.contact_email) {
            Ok(link) => {
                info!("Contact link composed");
                self.contact_notice = Some(link);
            }
            Err(e) => {
                self.contact_notice = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::insight::UNAVAILABLE_MESSAGE;

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        App::with_clients(
            "London",
            WeatherClient::new("KEY").with_base_url("http://127.0.0.1:9"),
            InsightClient::new(None),
        )
    }

    fn success(seq: u64, name: &str) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Ok((fixtures::current(name), fixtures::forecast(name))),
        }
    }

    fn failure(seq: u64) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Err(FetchError::Status {
                endpoint: "weather",
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    // ========================================================================
    // Fetch cycle
    // ========================================================================

    #[test]
    fn test_initial_state() {
        let app = test_app();
        assert_eq!(app.state, AppState::Dashboard);
        assert_eq!(app.view().city, "London");
        assert!(app.view().weather.is_none());
        assert!(app.view().forecast.is_none());
        assert!(app.view().error.is_empty());
        assert!(app.view().ai_insight.is_empty());
        assert_eq!(app.view().fetch_status, FetchStatus::Idle);
    }

    #[test]
    fn test_start_fetch_enters_loading_and_clears() {
        let mut app = test_app();
        app.view.error = "old".to_string();
        app.view.ai_insight = "old insight".to_string();

        let ticket = app.start_fetch("  Paris ").unwrap();

        assert_eq!(ticket.city, "Paris");
        assert_eq!(ticket.seq, 1);
        assert!(app.view().is_loading());
        assert!(app.view().error.is_empty());
        assert!(app.view().ai_insight.is_empty());
    }

    #[test]
    fn test_start_fetch_blank_city_is_ignored() {
        let mut app = test_app();
        assert!(app.start_fetch("   ").is_none());
        assert_eq!(app.view().fetch_status, FetchStatus::Idle);
    }

    #[test]
    fn test_apply_success_uses_provider_name() {
        let mut app = test_app();
        let ticket = app.start_fetch("london").unwrap();

        assert!(app.apply_fetch(success(ticket.seq, "London")));

        assert_eq!(app.view().city, "London");
        assert_eq!(app.view().weather.as_ref().unwrap().name, "London");
        assert_eq!(app.view().history.first().unwrap().name, "London");
        assert!(app.view().forecast.is_some());
        assert_eq!(app.view().fetch_status, FetchStatus::Loaded);
        assert!(!app.view().is_loading());
    }

    #[test]
    fn test_apply_failure_keeps_last_good_state() {
        let mut app = test_app();
        let ticket = app.start_fetch("Paris").unwrap();
        app.apply_fetch(success(ticket.seq, "Paris"));

        let ticket = app.start_fetch("Atlantis").unwrap();
        assert!(app.apply_fetch(failure(ticket.seq)));

        assert_eq!(app.view().weather.as_ref().unwrap().name, "Paris");
        assert!(app.view().forecast.is_some());
        assert_eq!(app.view().error, FETCH_ERROR_MESSAGE);
        assert_eq!(app.view().fetch_status, FetchStatus::Error);
        assert!(!app.view().is_loading());
        assert_eq!(app.view().history.len(), 1);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut app = test_app();
        let first = app.start_fetch("Paris").unwrap();
        let second = app.start_fetch("Tokyo").unwrap();

        // Second request completes first
        assert!(app.apply_fetch(success(second.seq, "Tokyo")));
        assert!(!app.apply_fetch(success(first.seq, "Paris")));

        assert_eq!(app.view().city, "Tokyo");
        assert_eq!(app.view().history.len(), 1);
    }

    #[test]
    fn test_stale_failure_does_not_set_error() {
        let mut app = test_app();
        let first = app.start_fetch("Atlantis").unwrap();
        let _second = app.start_fetch("Tokyo").unwrap();

        assert!(!app.apply_fetch(failure(first.seq)));
        assert!(app.view().error.is_empty());
        assert!(app.view().is_loading());
    }

    #[test]
    fn test_history_is_capped_through_fetches() {
        let mut app = test_app();
        for city in ["A", "B", "C", "D", "E", "F"] {
            let ticket = app.start_fetch(city).unwrap();
            app.apply_fetch(success(ticket.seq, city));
        }
        assert_eq!(app.view().history.len(), 5);
        assert_eq!(app.view().history.first().unwrap().name, "F");
    }

    // ========================================================================
    // Insight
    // ========================================================================

    #[test]
    fn test_start_insight_without_weather_is_noop() {
        let mut app = test_app();
        assert!(app.start_insight().is_none());
        assert_eq!(app.view().insight_status, InsightStatus::Idle);
        assert!(app.view().ai_insight.is_empty());
    }

    #[tokio::test]
    async fn test_request_insight_without_weather_is_noop() {
        let mut app = test_app();
        app.request_insight().await;
        assert!(app.view().ai_insight.is_empty());
        assert!(!app.view().is_ai_loading());
    }

    #[tokio::test]
    async fn test_request_insight_unconfigured_returns_message() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        app.request_insight().await;

        assert_eq!(app.view().ai_insight, UNAVAILABLE_MESSAGE);
        assert_eq!(app.view().insight_status, InsightStatus::Loaded);
    }

    #[test]
    fn test_start_insight_twice_is_declined_while_loading() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        assert!(app.start_insight().is_some());
        assert!(app.view().is_ai_loading());
        assert!(app.start_insight().is_none());
    }

    #[test]
    fn test_new_search_discards_in_flight_insight() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        let insight = app.start_insight().unwrap();
        let _ = app.start_fetch("Paris").unwrap();

        assert!(!app.view().is_ai_loading());
        assert!(!app.apply_insight(InsightOutcome {
            seq: insight.seq,
            text: "Wear a coat".to_string(),
        }));
        assert!(app.view().ai_insight.is_empty());
    }

    #[test]
    fn test_insight_declined_while_search_loading() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        let _ = app.start_fetch("Paris").unwrap();
        assert!(app.start_insight().is_none());
        assert!(!app.view().is_ai_loading());

        app.handle_key(key_event(KeyCode::Char('a')));
        assert!(app.take_tasks().is_empty());
    }

    #[test]
    fn test_insight_for_previous_city_not_shown_after_new_search() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        let paris = app.start_fetch("Paris").unwrap();
        // Ticket taken against the London snapshot, bypassing the loading guard
        app.view.fetch_status = FetchStatus::Loaded;
        let london_insight = app.start_insight().unwrap();
        assert_eq!(london_insight.snapshot.name, "London");

        assert!(app.apply_fetch(success(paris.seq, "Paris")));
        assert!(!app.view().is_ai_loading());
        assert!(!app.apply_insight(InsightOutcome {
            seq: london_insight.seq,
            text: "London tip".to_string(),
        }));

        assert_eq!(app.view().city, "Paris");
        assert!(app.view().ai_insight.is_empty());
        assert_eq!(app.view().insight_status, InsightStatus::Idle);
    }

    #[test]
    fn test_apply_message_routes_outcomes() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        assert!(app.apply_message(WorkerMessage::FetchFinished(success(ticket.seq, "London"))));

        let insight = app.start_insight().unwrap();
        assert!(app.apply_message(WorkerMessage::InsightFinished(InsightOutcome {
            seq: insight.seq,
            text: "Sunglasses".to_string(),
        })));
        assert_eq!(app.view().ai_insight, "Sunglasses");
    }

    // ========================================================================
    // Key handling
    // ========================================================================

    #[test]
    fn test_q_quits_from_dashboard() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_search() {
        let mut app = test_app();
        app.state = AppState::Search;
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_slash_enters_search() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('/')));
        assert_eq!(app.state, AppState::Search);
    }

    #[test]
    fn test_search_enter_queues_fetch() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('s')));
        type_text(&mut app, "Parisx");
        app.handle_key(key_event(KeyCode::Backspace));
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.search_input.is_empty());
        assert!(app.view().is_loading());

        let tasks = app.take_tasks();
        assert_eq!(
            tasks,
            vec![Task::Fetch(FetchTicket {
                seq: 1,
                city: "Paris".to_string()
            })]
        );
        assert!(app.take_tasks().is_empty());
    }

    #[test]
    fn test_search_enter_with_blank_input_stays() {
        let mut app = test_app();
        app.state = AppState::Search;
        type_text(&mut app, "   ");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.state, AppState::Search);
        assert!(app.take_tasks().is_empty());
    }

    #[test]
    fn test_q_is_typed_in_search() {
        let mut app = test_app();
        app.state = AppState::Search;
        type_text(&mut app, "Quito");
        assert!(!app.should_quit);
        assert_eq!(app.search_input, "Quito");
    }

    #[test]
    fn test_esc_cancels_search() {
        let mut app = test_app();
        app.state = AppState::Search;
        type_text(&mut app, "Rome");
        app.handle_key(key_event(KeyCode::Esc));

        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.search_input.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_a_without_weather_queues_nothing() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('a')));
        assert!(app.take_tasks().is_empty());
    }

    #[test]
    fn test_a_with_weather_queues_insight() {
        let mut app = test_app();
        let ticket = app.start_fetch("London").unwrap();
        app.apply_fetch(success(ticket.seq, "London"));

        app.handle_key(key_event(KeyCode::Char('a')));

        let tasks = app.take_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(matches!(tasks[0], Task::Insight(_)));
    }

    #[test]
    fn test_digit_reloads_history_entry() {
        let mut app = test_app();
        for city in ["Paris", "Tokyo"] {
            let ticket = app.start_fetch(city).unwrap();
            app.apply_fetch(success(ticket.seq, city));
        }

        app.handle_key(key_event(KeyCode::Char('2')));

        match app.take_tasks().as_slice() {
            [Task::Fetch(ticket)] => assert_eq!(ticket.city, "Paris"),
            other => panic!("Expected one fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_digit_without_history_entry_does_nothing() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('5')));
        assert!(app.take_tasks().is_empty());
    }

    #[test]
    fn test_r_reloads_current_city() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('r')));

        match app.take_tasks().as_slice() {
            [Task::Fetch(ticket)] => assert_eq!(ticket.city, "London"),
            other => panic!("Expected one fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('/')));
        assert_eq!(app.state, AppState::Dashboard);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_contact_form_flow() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('c')));
        assert_eq!(app.state, AppState::Contact);

        type_text(&mut app, "Ada");
        app.handle_key(key_event(KeyCode::Enter));
        type_text(&mut app, "ada@example.com");
        app.handle_key(key_event(KeyCode::Tab));
        type_text(&mut app, "Hi");
        app.handle_key(key_event(KeyCode::Enter));
        type_text(&mut app, "there");

        assert_eq!(app.contact.message, "Hi\nthere");

        app.handle_key(ctrl('s'));
        let notice = app.contact_notice.clone().unwrap();
        assert!(notice.starts_with("mailto:"));

        app.handle_key(key_event(KeyCode::Esc));
        assert_eq!(app.state, AppState::Dashboard);
    }

    #[test]
    fn test_contact_submit_reports_missing_field() {
        let mut app = test_app();
        app.state = AppState::Contact;
        app.handle_key(ctrl('s'));
        assert_eq!(
            app.contact_notice.as_deref(),
            Some("Please fill in the name field")
        );
    }

    #[test]
    fn test_on_tick_advances() {
        let mut app = test_app();
        app.on_tick();
        app.on_tick();
        assert_eq!(app.tick, 2);
    }

    #[test]
    fn test_new_uses_startup_config() {
        let config = StartupConfig {
            default_city: "Oslo".to_string(),
            contact_email: "me@example.com".to_string(),
            ..StartupConfig::default()
        };
        let app = App::new(&config);
        assert_eq!(app.view().city, "Oslo");
        assert_eq!(app.contact_email(), "me@example.com");
        assert!(!app.insight_client().is_configured());
    }
}
