//! Generic asynchronous fetch-state container
//!
//! [`FetchHandle`] wraps any zero-argument async producer and manages its
//! load/error/data lifecycle:
//!
//! - Triggers automatically on creation and on dependency change (when
//!   `auto_start` is set), or manually via [`FetchHandle::refetch`]
//! - Stores the outcome in a [`FetchState`] snapshot observable through
//!   [`FetchHandle::state`] or a watch subscription
//! - Never re-throws a producer failure; errors are normalized to
//!   [`ErrorInfo`] and stored
//! - Discards outcomes that settle after [`FetchHandle::reset`] or after the
//!   handle is dropped, via a generation counter captured at trigger time
//!
//! A failing cycle leaves the previous `data` in place, so consumers can
//! keep showing the last good result next to the new error until a refetch
//! succeeds or `reset` clears everything.
//!
//! Overlapping triggers are not serialized: when two cycles run at once the
//! final state belongs to whichever settles last, not whichever was issued
//! last. Callers needing strict ordering must gate their own triggers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::FutureExt;
//! use movie_discovery::{Config, FetchHandle, MovieClient, QueryRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(MovieClient::new(Config::new("tmdb-api-token"))?);
//!
//! let query = "batman".to_string();
//! let handle = FetchHandle::new(
//!     {
//!         let client = Arc::clone(&client);
//!         let query = query.clone();
//!         move || {
//!             let client = Arc::clone(&client);
//!             let request = QueryRequest::search(query.clone());
//!             async move { client.fetch_movies(&request).await }.boxed()
//!         }
//!     },
//!     vec![query],
//!     true,
//! );
//!
//! let mut states = handle.subscribe();
//! let settled = states.wait_for(|s| !s.loading).await?;
//! println!("{} movies", settled.data.as_ref().map_or(0, |m| m.len()));
//! # Ok(())
//! # }
//! ```

use crate::error::{ErrorInfo, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Message stored when a producer panics instead of returning an error
const UNKNOWN_ERROR_MESSAGE: &str = "an unknown error occurred";

/// Boxed zero-argument async producer wrapped by a [`FetchHandle`]
pub type Producer<T> = dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync;

/// Snapshot of one fetch container's lifecycle
///
/// `loading` is true exactly while a trigger cycle is in flight. `error`
/// and freshly produced `data` are mutually exclusive within one cycle,
/// but stale data from an earlier success may coexist with a newer error.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    /// Most recently committed successful result
    pub data: Option<T>,
    /// True while a trigger cycle is in flight
    pub loading: bool,
    /// Failure of the most recently settled cycle, if any
    pub error: Option<ErrorInfo>,
}

impl<T> FetchState<T> {
    /// True when nothing has been produced yet (also the post-reset state)
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && self.error.is_none() && !self.loading
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// State shared between the handle and its in-flight cycles
struct Shared<T> {
    state: watch::Sender<FetchState<T>>,
    generation: AtomicU64,
}

/// Handle over a producer's fetch state
///
/// `T` is the produced value, `D` the element type of the dependency
/// sequence gating automatic re-triggers. Dropping the handle tears the
/// container down: cycles still in flight settle into the void.
pub struct FetchHandle<T, D = ()> {
    shared: Arc<Shared<T>>,
    producer: Arc<Producer<T>>,
    dependencies: Mutex<Vec<D>>,
    auto_start: bool,
}

impl<T, D> FetchHandle<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: PartialEq,
{
    /// Creates a handle over `producer`.
    ///
    /// If `auto_start` is true a trigger cycle begins immediately, and
    /// future dependency changes reported through
    /// [`update_dependencies`](Self::update_dependencies) re-trigger
    /// automatically. With `auto_start` false, only explicit
    /// [`refetch`](Self::refetch) calls run the producer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<F>(producer: F, dependencies: Vec<D>, auto_start: bool) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        let handle = Self {
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
            }),
            producer: Arc::new(producer),
            dependencies: Mutex::new(dependencies),
            auto_start,
        };
        if handle.auto_start {
            handle.trigger();
        }
        handle
    }

    /// Starts a new trigger cycle immediately.
    ///
    /// Ignores the dependency gate and `auto_start`, and neither cancels
    /// nor waits for cycles already in flight.
    pub fn refetch(&self) {
        debug!("manual refetch requested");
        self.trigger();
    }

    /// Synchronously clears the container back to idle.
    ///
    /// Cycles in flight at this moment are superseded: their outcomes are
    /// discarded when they settle.
    pub fn reset(&self) {
        let generation = &self.shared.generation;
        self.shared.state.send_modify(|state| {
            generation.fetch_add(1, Ordering::AcqRel);
            *state = FetchState::default();
        });
        debug!("fetch state reset");
    }

    /// Reports the current dependency sequence.
    ///
    /// Elements are compared pairwise against the previous snapshot (a
    /// length mismatch counts as a change). On change the snapshot is
    /// replaced and, when `auto_start` is set, a new cycle triggers.
    pub fn update_dependencies(&self, dependencies: Vec<D>) {
        let changed = {
            let mut snapshot = match self.dependencies.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let unequal = snapshot.len() != dependencies.len()
                || snapshot.iter().zip(dependencies.iter()).any(|(a, b)| a != b);
            if unequal {
                *snapshot = dependencies;
            }
            unequal
        };
        if changed && self.auto_start {
            debug!("dependency change detected, re-triggering");
            self.trigger();
        }
    }

    /// Clone of the current state snapshot
    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    /// Most recently committed data, if any
    pub fn data(&self) -> Option<T> {
        self.shared.state.borrow().data.clone()
    }

    /// True while a cycle is in flight
    pub fn loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    /// Error of the most recently settled cycle, if any
    pub fn error(&self) -> Option<ErrorInfo> {
        self.shared.state.borrow().error.clone()
    }

    /// Subscribes to state transitions.
    ///
    /// The receiver observes every commit: trigger start, settle, and
    /// reset. Useful for driving a render loop or awaiting a settle in
    /// tests via `Receiver::wait_for`.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Runs one trigger cycle: mark loading, run the producer, commit the
    /// outcome unless the generation moved on while it was in flight.
    fn trigger(&self) {
        let future = (self.producer)();

        // Generation capture and the loading transition happen inside one
        // send_modify so a concurrent reset cannot interleave between them.
        let generation = &self.shared.generation;
        let mut issued = 0;
        self.shared.state.send_modify(|state| {
            issued = generation.load(Ordering::Acquire);
            state.loading = true;
            state.error = None;
        });

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(future).catch_unwind().await;

            if shared.generation.load(Ordering::Acquire) != issued {
                debug!(issued, "discarding outcome of superseded cycle");
                return;
            }

            shared.state.send_modify(|state| {
                match outcome {
                    Ok(Ok(value)) => {
                        state.data = Some(value);
                        state.error = None;
                    }
                    Ok(Err(err)) => {
                        warn!(error = %err, "fetch cycle failed");
                        state.error = Some(ErrorInfo::from(&err));
                    }
                    Err(_panic) => {
                        warn!("fetch producer panicked");
                        state.error = Some(ErrorInfo::new(UNKNOWN_ERROR_MESSAGE));
                    }
                }
                state.loading = false;
            });
        });
    }
}

impl<T, D> Drop for FetchHandle<T, D> {
    fn drop(&mut self) {
        // Teardown: outcomes settling from here on must not be applied.
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
    use tokio::time::{Duration, sleep};

    type Handle = FetchHandle<u32, u32>;

    fn ok_after(value: u32, delay: Duration) -> impl Fn() -> BoxFuture<'static, Result<u32>> + Send + Sync {
        move || {
            async move {
                sleep(delay).await;
                Ok(value)
            }
            .boxed()
        }
    }

    async fn settled(rx: &mut watch::Receiver<FetchState<u32>>) -> FetchState<u32> {
        rx.wait_for(|s| !s.loading && (s.data.is_some() || s.error.is_some()))
            .await
            .unwrap()
            .clone()
    }

    #[tokio::test]
    async fn resolving_producer_settles_with_data() {
        let handle: Handle = FetchHandle::new(ok_after(7, Duration::from_millis(5)), vec![], true);
        let mut rx = handle.subscribe();

        assert!(handle.loading());

        let state = settled(&mut rx).await;
        assert_eq!(state.data, Some(7));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn rejecting_producer_keeps_previous_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move || {
                let call = calls.fetch_add(1, AtomicOrdering::SeqCst);
                async move {
                    if call == 0 {
                        Ok(5)
                    } else {
                        Err(Error::Unknown("boom".to_string()))
                    }
                }
                .boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![], true);
        let mut rx = handle.subscribe();

        let first = settled(&mut rx).await;
        assert_eq!(first.data, Some(5));

        handle.refetch();
        let second = rx.wait_for(|s| s.error.is_some()).await.unwrap().clone();

        assert_eq!(second.error, Some(ErrorInfo::new("boom")));
        assert_eq!(second.data, Some(5), "stale data must survive a failure");
        assert!(!second.loading);
    }

    #[tokio::test]
    async fn reset_is_synchronous_and_discards_in_flight_cycles() {
        let handle: Handle =
            FetchHandle::new(ok_after(9, Duration::from_millis(30)), vec![], true);

        assert!(handle.loading());
        handle.reset();

        let state = handle.state();
        assert!(state.is_idle(), "reset must idle the state immediately");

        // Let the superseded cycle settle; it must commit nothing.
        sleep(Duration::from_millis(120)).await;
        assert!(handle.state().is_idle());
    }

    #[tokio::test]
    async fn refetch_works_after_reset() {
        let handle: Handle = FetchHandle::new(ok_after(3, Duration::from_millis(5)), vec![], true);
        let mut rx = handle.subscribe();

        settled(&mut rx).await;
        handle.reset();
        assert!(handle.state().is_idle());

        handle.refetch();
        let state = settled(&mut rx).await;
        assert_eq!(state.data, Some(3));
    }

    #[tokio::test]
    async fn auto_start_false_waits_for_explicit_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, AtomicOrdering::SeqCst);
                async move { Ok(11) }.boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![], false);

        sleep(Duration::from_millis(30)).await;
        assert!(handle.state().is_idle());
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);

        let mut rx = handle.subscribe();
        handle.refetch();
        let state = settled(&mut rx).await;
        assert_eq!(state.data, Some(11));
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dependency_change_retriggers_only_on_inequality() {
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, AtomicOrdering::SeqCst);
                async move { Ok(1) }.boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![1], true);
        let mut rx = handle.subscribe();
        settled(&mut rx).await;
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);

        // Equal snapshot: no new cycle
        handle.update_dependencies(vec![1]);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);

        // Value change
        handle.update_dependencies(vec![2]);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);

        // Length change counts as inequality
        handle.update_dependencies(vec![2, 3]);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 3);
    }

    #[tokio::test]
    async fn dependency_change_without_auto_start_does_not_trigger() {
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, AtomicOrdering::SeqCst);
                async move { Ok(1) }.boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![1], false);

        handle.update_dependencies(vec![2]);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
        assert!(handle.state().is_idle());
    }

    #[tokio::test]
    async fn overlapping_cycles_settle_last_write_wins() {
        // First cycle is slow, second is fast: the fast one commits first
        // and the slow one overwrites it. Final state belongs to the cycle
        // that settled last, not the one issued last.
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move || {
                let call = calls.fetch_add(1, AtomicOrdering::SeqCst);
                async move {
                    if call == 0 {
                        sleep(Duration::from_millis(80)).await;
                        Ok(1)
                    } else {
                        sleep(Duration::from_millis(10)).await;
                        Ok(2)
                    }
                }
                .boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![], true);
        let mut rx = handle.subscribe();
        handle.refetch();

        rx.wait_for(|s| s.data == Some(2)).await.unwrap();
        let final_state = rx.wait_for(|s| s.data == Some(1)).await.unwrap().clone();
        assert!(!final_state.loading);
    }

    #[tokio::test]
    async fn outcomes_after_teardown_are_discarded() {
        let produced = Arc::new(AtomicBool::new(false));
        let producer = {
            let produced = Arc::clone(&produced);
            move || {
                let produced = Arc::clone(&produced);
                async move {
                    sleep(Duration::from_millis(30)).await;
                    produced.store(true, AtomicOrdering::SeqCst);
                    Ok(42)
                }
                .boxed()
            }
        };
        let handle: Handle = FetchHandle::new(producer, vec![], true);
        let rx = handle.subscribe();

        drop(handle);
        sleep(Duration::from_millis(120)).await;

        assert!(
            produced.load(AtomicOrdering::SeqCst),
            "producer itself still runs to completion"
        );
        let state = rx.borrow();
        assert_eq!(state.data, None, "late outcome must not be applied");
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn panicking_producer_is_normalized_to_unknown_error() {
        let producer = || {
            async move {
                if std::hint::black_box(true) {
                    panic!("producer exploded");
                }
                Ok(0)
            }
            .boxed()
        };
        let handle: Handle = FetchHandle::new(producer, vec![], true);
        let mut rx = handle.subscribe();

        let state = rx.wait_for(|s| s.error.is_some()).await.unwrap().clone();
        assert_eq!(state.error, Some(ErrorInfo::new(UNKNOWN_ERROR_MESSAGE)));
        assert!(!state.loading);
        assert_eq!(state.data, None);
    }
}
