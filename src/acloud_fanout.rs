//! Concurrent fan-out over parent entities.
//!
//! Unique responsibility: run one listing per parent (organisation, cluster)
//! concurrently, wait for all of them, and merge the outcomes deterministically.
//!
//! Guarantees:
//! - Every unit runs to completion; a failure does not cancel its siblings.
//! - Outcomes are merged in parent order, never completion order.
//! - Any failure fails the whole aggregation. The reported error is the first
//!   failing parent in parent order, annotated with its identifier.
//! - No parents means no work and an empty result.
//!
//! Cancellation is the caller's: dropping the returned future drops every
//! in-flight unit with it.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::{
    acloud_error::AcloudError,
    acloud_sort::{DeterministicOrder, sort_deterministic},
};

/// List `resource` for every parent concurrently and concatenate the results
/// in parent order.
///
/// `label` names a parent in the error returned when its listing fails.
///
/// # Errors
///
/// Returns [`AcloudError::FanOut`] wrapping the first failure in parent order.
pub async fn fan_out<'a, P, T, L, F, Fut>(
    resource: &'static str,
    parents: &'a [P],
    label: L,
    list: F,
) -> Result<Vec<T>, AcloudError>
where
    P: Sync,
    T: Send,
    L: Fn(&P) -> String + Send,
    F: Fn(&'a P) -> Fut + Send,
    Fut: Future<Output = Result<Vec<T>, AcloudError>> + Send,
{
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    debug!(resource, parents = parents.len(), "fanning out listing");

    // join_all is the completion barrier; its output keeps submission order.
    let outcomes = join_all(parents.iter().map(&list)).await;

    let mut merged = Vec::new();
    for (parent, outcome) in parents.iter().zip(outcomes) {
        match outcome {
            Ok(mut items) => merged.append(&mut items),
            Err(source) => {
                return Err(AcloudError::FanOut {
                    resource,
                    parent: label(parent),
                    source: Box::new(source),
                });
            }
        }
    }

    debug!(resource, items = merged.len(), "fan-out complete");
    Ok(merged)
}

/// [`fan_out`] followed by the deterministic sort.
///
/// # Errors
///
/// Returns [`AcloudError::FanOut`] wrapping the first failure in parent order.
pub async fn fan_out_sorted<'a, P, T, L, F, Fut>(
    resource: &'static str,
    parents: &'a [P],
    label: L,
    list: F,
) -> Result<Vec<T>, AcloudError>
where
    P: Sync,
    T: DeterministicOrder + Send,
    L: Fn(&P) -> String + Send,
    F: Fn(&'a P) -> Fut + Send,
    Fut: Future<Output = Result<Vec<T>, AcloudError>> + Send,
{
    let mut merged = fan_out(resource, parents, label, list).await?;
    sort_deterministic(&mut merged);
    Ok(merged)
}
