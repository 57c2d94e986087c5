//! Lazy, request-deduplicating cache of subcategory lists.
//!
//! Each category id is in one of three states:
//!
//! - **Absent** - no key in the map; nothing fetched yet, or the last
//!   attempt failed
//! - **Pending** - one request is in flight; further `ensure` calls are
//!   no-ops
//! - **Present** - the list arrived and is kept for the rest of the session
//!
//! `ensure` moves Absent -> Pending and spawns the fetch. The result comes
//! back as a [`NavEvent::SubcategoriesLoaded`] and is applied with
//! [`SubcategoryCache::complete`], moving Pending -> Present on success or
//! back to Absent on failure. Failures are never remembered, so the next
//! hover retries. There is no invalidation: a Present entry is never
//! refetched.
//!
//! Each request carries the generation it was issued under. A completion
//! whose generation does not match the current Pending entry (for example
//! one that lands after [`SubcategoryCache::clear`]) is dropped.

use std::collections::HashMap;
use tokio::sync::mpsc;

use super::events::{catch_task_panic, deliver, NavEvent};
use crate::taxonomy::{Subcategory, TaxonomyClient, TaxonomyError};

#[derive(Debug)]
enum Entry {
    Pending { generation: u64 },
    Present(Vec<Subcategory>),
}

/// Read view of a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Absent,
    Pending,
    Present(&'a [Subcategory]),
}

/// What [`SubcategoryCache::complete`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Entry is now Present.
    Stored,
    /// Fetch failed; entry is Absent again and may be retried.
    Failed,
    /// No matching Pending entry; the result was discarded.
    Stale,
}

pub struct SubcategoryCache {
    client: TaxonomyClient,
    events: mpsc::Sender<NavEvent>,
    entries: HashMap<String, Entry>,
    next_generation: u64,
    requests_issued: u64,
}

impl SubcategoryCache {
    pub fn new(client: TaxonomyClient, events: mpsc::Sender<NavEvent>) -> Self {
        Self {
            client,
            events,
            entries: HashMap::new(),
            next_generation: 0,
            requests_issued: 0,
        }
    }

    pub fn get(&self, category_id: &str) -> Lookup<'_> {
        match self.entries.get(category_id) {
            None => Lookup::Absent,
            Some(Entry::Pending { .. }) => Lookup::Pending,
            Some(Entry::Present(subs)) => Lookup::Present(subs),
        }
    }

    /// The cached list, only when the entry is Present.
    pub fn present(&self, category_id: &str) -> Option<&[Subcategory]> {
        match self.get(category_id) {
            Lookup::Present(subs) => Some(subs),
            Lookup::Absent | Lookup::Pending => None,
        }
    }

    /// Make sure `category_id` is cached or on its way.
    ///
    /// An Absent entry becomes `Pending` under a fresh generation and one
    /// fetch task is spawned; its result comes back as
    /// [`NavEvent::SubcategoriesLoaded`] and must be handed to
    /// [`complete`](Self::complete).
    ///
    /// # Arguments
    ///
    /// * `category_id` - Id of the hovered top-level category
    ///
    /// # Returns
    ///
    /// `true` when a new request was spawned, `false` when the entry is
    /// already Present or Pending.
    ///
    /// # Panics
    ///
    /// Spawns onto the current tokio runtime, so it panics outside one.
    pub fn ensure(&mut self, category_id: &str) -> bool {
        match self.entries.get(category_id) {
            Some(Entry::Present(_)) => {
                tracing::trace!(category_id, "Subcategories already cached");
                return false;
            }
            Some(Entry::Pending { generation }) => {
                tracing::debug!(category_id, generation, "Subcategory fetch already in flight");
                return false;
            }
            None => {}
        }

        self.next_generation = self.next_generation.wrapping_add(1);
        let generation = self.next_generation;
        self.entries
            .insert(category_id.to_owned(), Entry::Pending { generation });
        self.requests_issued += 1;

        tracing::debug!(category_id, generation, "Fetching subcategories");
        spawn_subcategory_fetch(
            self.client.clone(),
            category_id.to_owned(),
            generation,
            self.events.clone(),
        );
        true
    }

    /// Apply the result of a fetch spawned by [`ensure`](Self::ensure).
    pub fn complete(
        &mut self,
        category_id: &str,
        generation: u64,
        result: Result<Vec<Subcategory>, TaxonomyError>,
    ) -> Completion {
        let is_current = matches!(
            self.entries.get(category_id),
            Some(Entry::Pending { generation: pending }) if *pending == generation
        );
        if !is_current {
            tracing::debug!(category_id, generation, "Discarding stale subcategory result");
            return Completion::Stale;
        }

        match result {
            Ok(subs) => {
                tracing::debug!(category_id, count = subs.len(), "Cached subcategories");
                self.entries
                    .insert(category_id.to_owned(), Entry::Present(subs));
                Completion::Stored
            }
            Err(e) => {
                tracing::warn!(category_id, error = %e, "Subcategory fetch failed");
                self.entries.remove(category_id);
                Completion::Failed
            }
        }
    }

    /// Forget everything. In-flight results arriving afterwards are stale.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total requests spawned over the cache's lifetime.
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    pub fn client(&self) -> &TaxonomyClient {
        &self.client
    }
}

fn spawn_subcategory_fetch(
    client: TaxonomyClient,
    category_id: String,
    generation: u64,
    tx: mpsc::Sender<NavEvent>,
) {
    tokio::spawn(async move {
        let result = match catch_task_panic(client.fetch_subcategories(&category_id)).await {
            Ok(result) => result,
            Err(panic_msg) => {
                tracing::error!(task = "subcategory_fetch", category_id = %category_id, error = %panic_msg, "Background task panicked");
                Err(TaxonomyError::TaskPanicked(panic_msg))
            }
        };
        deliver(
            &tx,
            NavEvent::SubcategoriesLoaded {
                category_id,
                generation,
                result,
            },
        )
        .await;
    });
}
