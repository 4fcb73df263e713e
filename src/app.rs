//! Application state management for Ayumi
//!
//! This module wires the resolver and presentation gate together, starts the
//! cold-start resolution, and handles keyboard input for the dashboard view.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::DailyCache;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::content::{Content, Section, StaticFallback};
use crate::gate::{DisplayState, PresentationGate};
use crate::provider::{DashboardClient, ProviderError};
use crate::resolver::DailyContentResolver;

/// Main application struct managing view state and content resolution
pub struct App {
    /// Index into `Section::ALL` of the section being read
    pub selected_section: usize,
    /// Scroll offset within the current section
    pub scroll_offset: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// When the last resolution finished
    pub last_refresh: Option<DateTime<Local>>,
    resolver: Arc<DailyContentResolver>,
    gate: PresentationGate,
    fallback: StaticFallback,
    /// Resolution currently in flight, if any
    pending: Option<JoinHandle<Arc<Content>>>,
}

impl App {
    /// Creates an App from parts already wired together
    ///
    /// `resolver` should publish into `gate`.
    pub fn new(
        resolver: Arc<DailyContentResolver>,
        gate: PresentationGate,
        fallback: StaticFallback,
    ) -> Self {
        Self {
            selected_section: 0,
            scroll_offset: 0,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            resolver,
            gate,
            fallback,
            pending: None,
        }
    }

    /// Builds the production wiring and arms the loading deadline
    ///
    /// Must be called inside a tokio runtime, once per process start.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let fallback = StaticFallback::new();
        let gate = PresentationGate::arm(config.deadline, fallback.clone());
        let provider = DashboardClient::new(config.backend_url.as_str(), config.request_timeout)?;

        let resolver = DailyContentResolver::new(
            DailyCache::new(config.cache_store()),
            Arc::new(provider),
            Arc::new(SystemClock),
            fallback.clone(),
            Arc::new(gate.clone()),
        );

        Ok(Self::new(Arc::new(resolver), gate, fallback))
    }

    /// Creates an App with a custom provider, in-memory cache and fixed day (for testing)
    #[cfg(test)]
    pub fn with_provider(
        provider: Arc<dyn crate::provider::ContentProvider>,
        deadline: Duration,
    ) -> Self {
        let fallback = StaticFallback::new();
        let gate = PresentationGate::arm(deadline, fallback.clone());
        let clock = crate::clock::FixedClock(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"),
        );
        let resolver = DailyContentResolver::new(
            DailyCache::new(Arc::new(crate::cache::MemoryStore::new())),
            provider,
            Arc::new(clock),
            fallback.clone(),
            Arc::new(gate.clone()),
        );
        Self::new(Arc::new(resolver), gate, fallback)
    }

    /// Starts the cold-start resolution in the background
    pub fn start(&mut self, force_refresh: bool) {
        self.spawn_resolve(force_refresh, None);
    }

    /// Starts a user-requested refresh unless one is already running
    pub fn refresh(&mut self) {
        if self.is_refreshing() {
            return;
        }
        let current = self.gate.content();
        self.spawn_resolve(true, current);
    }

    fn spawn_resolve(&mut self, force_refresh: bool, current: Option<Arc<Content>>) {
        let resolver = self.resolver.clone();
        self.pending = Some(tokio::spawn(async move {
            resolver.resolve(force_refresh, current).await
        }));
    }

    /// Whether a resolution is still in flight
    pub fn is_refreshing(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Records completion of a finished resolution; call once per tick
    pub fn poll_pending(&mut self) {
        if self.pending.as_ref().is_some_and(|h| h.is_finished()) {
            self.pending = None;
            self.last_refresh = Some(Local::now());
        }
    }

    /// Waits for the in-flight resolution and returns its result
    ///
    /// Falls back to what is on screen, or the bundled dashboard, if the
    /// resolution task was lost.
    pub async fn wait_for_resolution(&mut self) -> Arc<Content> {
        if let Some(handle) = self.pending.take() {
            if let Ok(content) = handle.await {
                self.last_refresh = Some(Local::now());
                return content;
            }
        }
        self.gate.content().unwrap_or_else(|| self.fallback.get())
    }

    /// Like `wait_for_resolution`, but gives up after `deadline`
    ///
    /// On expiry the resolution keeps running in the background and whatever
    /// is on screen is returned, or the bundled dashboard if nothing is.
    pub async fn wait_within(&mut self, deadline: Duration) -> Arc<Content> {
        match tokio::time::timeout(deadline, self.wait_for_resolution()).await {
            Ok(content) => content,
            Err(_) => {
                debug!(?deadline, "resolution still running at deadline");
                self.gate.content().unwrap_or_else(|| self.fallback.get())
            }
        }
    }

    pub fn display_state(&self) -> DisplayState {
        self.gate.state()
    }

    /// Content currently on screen
    pub fn content(&self) -> Option<Arc<Content>> {
        self.gate.content()
    }

    pub fn current_section(&self) -> Section {
        Section::ALL[self.selected_section % Section::ALL.len()]
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (any state); `Esc` also quits from the dashboard
    /// - `Left`/`h`, `Right`/`l`/`Tab`: Previous/next section
    /// - `Up`/`k`, `Down`/`j`: Scroll the section
    /// - `g`: Scroll to top
    /// - `r`: Fetch a fresh dashboard
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
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

        match self.display_state() {
            DisplayState::Loading => {
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            DisplayState::Error => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.refresh();
                }
                _ => {}
            },
            DisplayState::Ready => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                    self.previous_section();
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                    self.next_section();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_offset = self.scroll_offset.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
                KeyCode::Char('g') => {
                    self.scroll_offset = 0;
                }
                KeyCode::Char('r') => {
                    self.refresh();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves to the next section, wrapping to the first
    fn next_section(&mut self) {
        self.selected_section = (self.selected_section + 1) % Section::ALL.len();
        self.scroll_offset = 0;
    }

    /// Moves to the previous section, wrapping to the last
    fn previous_section(&mut self) {
        let count = Section::ALL.len();
        self.selected_section = (self.selected_section + count - 1) % count;
        self.scroll_offset = 0;
    }
}

/// Provider that answers after a delay, counting calls
#[cfg(test)]
pub(crate) struct DelayedProvider {
    pub delay: Duration,
    pub calls: std::sync::atomic::AtomicUsize,
    pub fail: bool,
}

#[cfg(test)]
impl DelayedProvider {
    pub fn new(delay: Duration, fail: bool) -> Self {
        Self {
            delay,
            calls: std::sync::atomic::AtomicUsize::new(0),
            fail,
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl crate::provider::ContentProvider for DelayedProvider {
    async fn generate(&self) -> Result<Content, ProviderError> {
        let call = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(ProviderError::Status(502))
        } else {
            Ok(crate::content::bundled_content(format!("fetch-{}", call)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::Ordering;

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(delay: Duration, fail: bool) -> (App, Arc<DelayedProvider>) {
        let provider = Arc::new(DelayedProvider::new(delay, fail));
        let app = App::with_provider(provider.clone(), Duration::from_millis(1500));
        (app, provider)
    }

    #[tokio::test(start_paused = true)]
    async fn test_app_starts_loading() {
        let (app, _provider) = test_app(Duration::from_secs(1), false);
        assert_eq!(app.display_state(), DisplayState::Loading);
        assert!(app.content().is_none());
        assert_eq!(app.current_section(), Section::Verse);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_shows_fallback_then_fresh_content() {
        let (mut app, provider) = test_app(Duration::from_secs(5), false);
        app.start(false);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(app.display_state(), DisplayState::Ready);
        assert!(app.is_refreshing());
        assert_ne!(app.content().unwrap().date, "fetch-1");

        let resolved = app.wait_for_resolution().await;
        assert_eq!(resolved.date, "fetch-1");
        assert_eq!(app.content().unwrap().date, "fetch-1");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(app.last_refresh.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_key_forces_fetch_without_interim() {
        let (mut app, provider) = test_app(Duration::from_millis(100), false);
        app.start(false);
        app.wait_for_resolution().await;

        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(app.is_refreshing());
        // What is on screen stays until the refresh completes
        assert_eq!(app.content().unwrap().date, "fetch-1");

        let resolved = app.wait_for_resolution().await;
        assert_eq!(resolved.date, "fetch-2");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_is_ignored_while_in_flight() {
        let (mut app, provider) = test_app(Duration::from_secs(1), false);
        app.start(false);
        tokio::time::sleep(Duration::from_millis(10)).await;

        app.refresh();
        app.refresh();
        app.wait_for_resolution().await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_shows_fallback() {
        let (mut app, _provider) = test_app(Duration::from_millis(10), true);
        app.start(false);
        let resolved = app.wait_for_resolution().await;

        assert_eq!(app.display_state(), DisplayState::Ready);
        assert_eq!(resolved.verse.reference, "2 Corinthians 5:7");
    }

    #[tokio::test(start_paused = true)]
    async fn test_section_navigation_wraps() {
        let (mut app, _provider) = test_app(Duration::ZERO, false);
        app.start(false);
        app.wait_for_resolution().await;

        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.current_section(), Section::History);

        app.handle_key(key_event(KeyCode::Right));
        app.handle_key(key_event(KeyCode::Tab));
        assert_eq!(app.current_section(), Section::Passage);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_resets_on_section_change() {
        let (mut app, _provider) = test_app(Duration::ZERO, false);
        app.start(false);
        app.wait_for_resolution().await;

        app.handle_key(key_event(KeyCode::Char('j')));
        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, 2);
        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.scroll_offset, 1);

        app.handle_key(key_event(KeyCode::Char('l')));
        assert_eq!(app.scroll_offset, 0);

        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.scroll_offset, 0, "Scroll should not underflow");
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_overlay_intercepts_keys() {
        let (mut app, _provider) = test_app(Duration::ZERO, false);
        app.start(false);
        app.wait_for_resolution().await;

        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.current_section(), Section::Verse);

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_quit_while_loading() {
        let (mut app, _provider) = test_app(Duration::from_secs(10), false);

        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(!app.is_refreshing());

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_pending_records_completion() {
        let (mut app, _provider) = test_app(Duration::from_millis(50), false);
        app.start(false);

        app.poll_pending();
        assert!(app.last_refresh.is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        app.poll_pending();
        assert!(app.last_refresh.is_some());
        assert!(!app.is_refreshing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_within_returns_fresh_content_in_time() {
        let (mut app, _provider) = test_app(Duration::from_millis(200), false);
        app.start(false);

        let content = app.wait_within(Duration::from_millis(1500)).await;

        assert_eq!(content.date, "fetch-1");
        assert!(app.last_refresh.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_within_gives_up_on_slow_provider() {
        let (mut app, provider) = test_app(Duration::from_secs(30), false);
        app.start(false);
        let started = tokio::time::Instant::now();

        let content = app.wait_within(Duration::from_millis(1500)).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(content.verse.reference, "2 Corinthians 5:7");
        assert_ne!(content.date, "fetch-1");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
