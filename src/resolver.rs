//! Daily content resolution
//!
//! Decides which dashboard should be on screen right now. A same-day cache
//! entry is served directly. Otherwise the bundled fallback is published as an
//! interim value (when nothing is on screen yet) and the provider is asked for
//! fresh content, which replaces the fallback and the cache entry on success.
//! Failures are logged and absorbed: `resolve` always yields a dashboard.
//!
//! Publications go to a `ContentSink` as they happen, so a listener sees the
//! interim value before the final one. In-flight fetches are never cancelled;
//! when calls overlap, the last cache write and the last publication win.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::DailyCache;
use crate::clock::Clock;
use crate::content::{Content, StaticFallback};
use crate::provider::{ContentProvider, ProviderError};

/// Whether a publication is a placeholder or the result of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishKind {
    /// Static fallback shown while a fetch is in flight
    Interim,
    /// Cached, freshly fetched or fallback content ending a resolution
    Final,
}

/// A dashboard handed to the view layer
#[derive(Debug, Clone)]
pub struct Publication {
    pub kind: PublishKind,
    pub content: Arc<Content>,
}

/// Receiver of resolver publications
pub trait ContentSink: Send + Sync {
    fn publish(&self, publication: Publication);
}

impl ContentSink for mpsc::UnboundedSender<Publication> {
    fn publish(&self, publication: Publication) {
        // A dropped receiver only means nobody is watching any more
        let _ = self.send(publication);
    }
}

/// Why a fetch produced no fresh content
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider panicked instead of returning
    #[error("Content provider panicked")]
    Panicked,
}

/// Resolves the dashboard for the current day
pub struct DailyContentResolver {
    cache: DailyCache,
    provider: Arc<dyn ContentProvider>,
    clock: Arc<dyn Clock>,
    fallback: StaticFallback,
    sink: Arc<dyn ContentSink>,
}

impl DailyContentResolver {
    pub fn new(
        cache: DailyCache,
        provider: Arc<dyn ContentProvider>,
        clock: Arc<dyn Clock>,
        fallback: StaticFallback,
        sink: Arc<dyn ContentSink>,
    ) -> Self {
        Self {
            cache,
            provider,
            clock,
            fallback,
            sink,
        }
    }

    /// Produces the dashboard to show now
    ///
    /// `current` is what the caller is already displaying, if anything.
    /// Returns the last content published by this call.
    pub async fn resolve(&self, force_refresh: bool, current: Option<Arc<Content>>) -> Arc<Content> {
        let today = self.clock.today();

        if !force_refresh {
            match self.cache.read() {
                Some(entry) if entry.day == today => {
                    debug!(day = %today, "serving cached dashboard");
                    let content = Arc::new(entry.content);
                    self.publish(PublishKind::Final, content.clone());
                    return content;
                }
                Some(entry) => {
                    debug!(cached_day = %entry.day, day = %today, "cached dashboard is stale");
                }
                None => debug!("no cached dashboard"),
            }
        }

        let interim = if current.is_none() {
            let fallback = self.fallback.get();
            self.publish(PublishKind::Interim, fallback.clone());
            Some(fallback)
        } else {
            None
        };

        match self.fetch_fresh(&today).await {
            Ok(content) => {
                info!(day = %today, "fetched fresh dashboard");
                self.publish(PublishKind::Final, content.clone());
                content
            }
            Err(e) => {
                warn!(error = %e, "dashboard generation failed, using static fallback");
                match interim {
                    Some(fallback) => fallback,
                    None => {
                        let fallback = self.fallback.get();
                        self.publish(PublishKind::Final, fallback.clone());
                        fallback
                    }
                }
            }
        }
    }

    /// Asks the provider for new content and caches it under `today`
    ///
    /// A failed cache write is logged and otherwise ignored; the fetched
    /// content is still returned.
    async fn fetch_fresh(&self, today: &str) -> Result<Arc<Content>, FetchError> {
        // The call itself sits inside the guard too, so a provider that
        // panics before handing back its future is caught as well
        let content = AssertUnwindSafe(async { self.provider.generate().await })
            .catch_unwind()
            .await
            .map_err(|_| FetchError::Panicked)??;

        if let Err(e) = self.cache.write(&content, today) {
            warn!(error = %e, "failed to persist dashboard");
        }

        Ok(Arc::new(content))
    }

    fn publish(&self, kind: PublishKind, content: Arc<Content>) {
        self.sink.publish(Publication { kind, content });
    }
}
