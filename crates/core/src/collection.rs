//! Fetched collection shared by every list screen
//!
//! Holds the full list as last fetched, its loading state and the banner
//! message of the last failure. Filtered views borrow from it; nothing here
//! talks to the network itself.

use std::future::Future;

use crate::error::ServerMessage;
use crate::filter::{apply, Filter};

/// Where a collection is in its fetch cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Banner text for the failed fetch
    Failed(String),
}

/// A list fetched from the backend for the lifetime of one screen
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    items: Vec<T>,
    state: LoadState,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
        }
    }
}

impl<T> RemoteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` and replace the collection with its result.
    ///
    /// On failure the previous items are kept and the state carries the
    /// server's message, or `fallback` when the error has none.
    pub async fn load<Fut, E>(&mut self, fetch: Fut, fallback: &str) -> &LoadState
    where
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: ServerMessage + std::fmt::Display,
    {
        self.state = LoadState::Loading;
        match fetch.await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Collection loaded");
                self.items = items;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Collection fetch failed");
                let message = e.server_message().unwrap_or(fallback).to_string();
                self.state = LoadState::Failed(message);
            }
        }
        &self.state
    }

    /// Replace the items directly, e.g. with a server-side query result
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = LoadState::Ready;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Message for the page-level banner, if the last fetch failed
    pub fn banner(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Dismiss the banner without touching the items
    pub fn dismiss(&mut self) {
        if matches!(self.state, LoadState::Failed(_)) {
            self.state = if self.items.is_empty() {
                LoadState::Idle
            } else {
                LoadState::Ready
            };
        }
    }

    /// Items accepted by `filter`
    pub fn view<F>(&self, filter: &F) -> Vec<&T>
    where
        F: Filter<T> + ?Sized,
    {
        apply(&self.items, filter)
    }
}
