//! One-time initialization of the embedded player API.
//!
//! Any number of viewers may ask for the API at once; the first caller runs
//! the initializer and everyone else awaits the same in-flight attempt. A
//! failed attempt leaves the loader empty so a later call can retry.

use std::future::Future;

use tokio::sync::{watch, OnceCell};
use tracing::{debug, info, warn};

use crate::error::{PlayerError, PlayerResult};

/// Shared, lazily initialized player API handle.
#[derive(Debug)]
pub struct ApiLoader<T> {
    name: &'static str,
    api: OnceCell<T>,
    ready: watch::Sender<bool>,
}

impl<T> ApiLoader<T> {
    pub fn new(name: &'static str) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            name,
            api: OnceCell::new(),
            ready,
        }
    }

    /// Return the API, running `init` if nothing has loaded it yet.
    pub async fn load<F, Fut>(&self, init: F) -> PlayerResult<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PlayerResult<T>>,
    {
        if let Some(api) = self.api.get() {
            return Ok(api);
        }

        let api = self
            .api
            .get_or_try_init(move || async move {
                debug!(api = self.name, "Loading player API");
                init().await
            })
            .await
            .map_err(|e| {
                warn!(api = self.name, error = %e, "Player API failed to load");
                e
            })?;

        // send_replace never fails, even without receivers.
        if !self.ready.send_replace(true) {
            info!(api = self.name, "Player API ready");
        }
        Ok(api)
    }

    /// The loaded API, if ready.
    pub fn get(&self) -> Option<&T> {
        self.api.get()
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Wait until some caller has loaded the API.
    pub async fn wait_ready(&self) -> PlayerResult<&T> {
        let mut rx = self.ready.subscribe();
        rx.wait_for(|ready| *ready)
            .await
            .map_err(|_| PlayerError::ChannelClosed)?;
        self.api
            .get()
            .ok_or_else(|| PlayerError::api_load(format!("{} signalled ready without a value", self.name)))
    }
}
