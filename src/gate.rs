//! Bounded-wait presentation gate
//!
//! The gate owns what the view layer displays and guarantees the loading
//! screen is left within a fixed deadline. The deadline timer is armed once,
//! when the gate is created at cold start. Whichever comes first, the first
//! resolver publication or the deadline, moves the gate from `Loading` to
//! `Ready`; on deadline the bundled fallback becomes the displayed content.
//! Later publications swap the displayed content without changing state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::content::{Content, StaticFallback};
use crate::resolver::{ContentSink, Publication};

/// Default time the loading screen may stay up
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(1500);

/// What the view layer should currently draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Ready,
    /// Hard failure screen; resolution never reports one today
    Error,
}

/// Snapshot of the gate: display state plus the content on screen
#[derive(Debug, Clone)]
pub struct GateView {
    pub state: DisplayState,
    pub content: Option<Arc<Content>>,
}

impl GateView {
    fn loading() -> Self {
        Self {
            state: DisplayState::Loading,
            content: None,
        }
    }
}

/// Deadline-bounded holder of the displayed dashboard
///
/// Cheap to clone; clones share state and the single deadline timer.
/// Must be created inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct PresentationGate {
    view: Arc<watch::Sender<GateView>>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PresentationGate {
    /// Creates the gate in `Loading` and arms the deadline timer
    pub fn arm(deadline: Duration, fallback: StaticFallback) -> Self {
        let (tx, _rx) = watch::channel(GateView::loading());
        let view = Arc::new(tx);

        let timer_view = view.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            timer_view.send_if_modified(|view| {
                if view.state != DisplayState::Loading {
                    return false;
                }
                view.content = Some(fallback.get());
                view.state = DisplayState::Ready;
                true
            });
        });

        Self {
            view,
            timer: Arc::new(Mutex::new(Some(handle))),
        }
    }

    /// Shows `content`, leaving `Loading` if still there
    pub fn show(&self, content: Arc<Content>) {
        self.view.send_modify(|view| {
            view.content = Some(content);
            if view.state == DisplayState::Loading {
                view.state = DisplayState::Ready;
            }
        });
        self.disarm();
    }

    /// Cancels the deadline timer; a no-op once it has fired
    fn disarm(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }

    pub fn state(&self) -> DisplayState {
        self.view.borrow().state
    }

    /// Content currently on screen, if any
    pub fn content(&self) -> Option<Arc<Content>> {
        self.view.borrow().content.clone()
    }

    pub fn snapshot(&self) -> GateView {
        self.view.borrow().clone()
    }

    /// Receiver that is notified on every state or content change
    pub fn subscribe(&self) -> watch::Receiver<GateView> {
        self.view.subscribe()
    }
}

impl ContentSink for PresentationGate {
    fn publish(&self, publication: Publication) {
        self.show(publication.content);
    }
}
