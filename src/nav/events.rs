//! Completion events from background taxonomy fetches.
//!
//! Fetches run as tokio tasks and never touch navigation state directly.
//! They report through an `mpsc` channel and the owner of the
//! [`NavigationSurface`](super::NavigationSurface) applies the result on its
//! own loop, so every state mutation happens in one place.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

use crate::taxonomy::{Category, Subcategory, TaxonomyError};

/// Result of a background fetch, stamped with the generation it was issued
/// under so late arrivals can be recognised and dropped.
#[derive(Debug)]
pub enum NavEvent {
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<Category>, TaxonomyError>,
    },
    SubcategoriesLoaded {
        category_id: String,
        generation: u64,
        result: Result<Vec<Subcategory>, TaxonomyError>,
    },
}

/// Runs `future`, turning a panic into `Err(message)`.
pub(crate) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            }
        })
}

/// Sends `event`, logging instead of failing when the surface is gone.
///
/// A closed channel means the surface was torn down while the request was
/// in flight; the result is simply discarded.
pub(crate) async fn deliver(tx: &mpsc::Sender<NavEvent>, event: NavEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, "Dropping fetch result (receiver dropped)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_passes_through_value() {
        let result = catch_task_panic(async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_message() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_deliver_to_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        deliver(
            &tx,
            NavEvent::CategoriesLoaded {
                generation: 1,
                result: Ok(Vec::new()),
            },
        )
        .await;
    }
}
