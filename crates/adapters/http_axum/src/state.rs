//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use occulight_app::controller::GroupStatus;
use occulight_app::ports::SensorFeed;

/// Application state shared across all axum handlers.
///
/// Generic over the sensor feed to avoid dynamic dispatch. `Clone` is
/// implemented manually so `F` itself does not need to be `Clone`; only the
/// `Arc` wrappers are cloned.
pub struct AppState<F> {
    /// Status receivers, one per group, in configured order.
    pub groups: Arc<Vec<watch::Receiver<GroupStatus>>>,
    /// Where sensor readings received over HTTP are sent.
    pub feed: Arc<F>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            groups: Arc::clone(&self.groups),
            feed: Arc::clone(&self.feed),
        }
    }
}

impl<F> AppState<F>
where
    F: SensorFeed + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// Takes the feed as an `Arc` so it can be shared with the controllers
    /// that use the same integration as their event source.
    pub fn new(groups: Vec<watch::Receiver<GroupStatus>>, feed: Arc<F>) -> Self {
        Self {
            groups: Arc::new(groups),
            feed,
        }
    }

    /// Latest status of every group, in configured order.
    #[must_use]
    pub fn statuses(&self) -> Vec<GroupStatus> {
        self.groups.iter().map(|rx| rx.borrow().clone()).collect()
    }

    /// Latest status of the group called `name`.
    #[must_use]
    pub fn status(&self, name: &str) -> Option<GroupStatus> {
        self.groups.iter().find_map(|rx| {
            let status = rx.borrow();
            (status.name == name).then(|| status.clone())
        })
    }
}
