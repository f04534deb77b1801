//! Concurrent fan-out of one fetch across many arguments.
//!
//! [`fan_out`] runs `fetch(arg)` for every argument at once and waits for all
//! of them. Results are collected in arrival order and the link between an
//! argument and its result is deliberately dropped, matching how the query
//! dispatcher consumes them (flatten successes, report the first error).
//!
//! [`fan_out_keyed`] is the alternate mode that keeps `(arg, result)` pairs
//! for callers that need per-site diagnostics.
//!
//! All units are polled on the caller's task through a `FuturesUnordered`,
//! so the success and error collections have a single owner and need no
//! locking. A `CancellationToken` stops the join early; completed results
//! are kept and the number of abandoned units is reported.

use std::future::Future;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

// ── AggregateOutcome ─────────────────────────────────────────────────

/// Result of fanning a fetch out across N arguments.
///
/// Both sequences are in arrival order. Only the counts are meaningful:
/// nothing records which argument produced which entry.
#[derive(Debug)]
pub struct AggregateOutcome<T, E> {
    pub successes: Vec<T>,
    pub errors: Vec<E>,
    /// Units abandoned because the cancellation token fired.
    pub cancelled: usize,
}

impl<T, E> Default for AggregateOutcome<T, E> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            errors: Vec::new(),
            cancelled: 0,
        }
    }
}

impl<T, E> AggregateOutcome<T, E> {
    fn with_capacity(n: usize) -> Self {
        Self {
            successes: Vec::with_capacity(n),
            errors: Vec::with_capacity(n),
            cancelled: 0,
        }
    }

    /// Number of units that ran to completion.
    pub fn completed(&self) -> usize {
        self.successes.len() + self.errors.len()
    }

    /// `true` when every unit finished (none were cancelled).
    pub fn is_complete(&self) -> bool {
        self.cancelled == 0
    }
}

// ── Unkeyed fan-out ──────────────────────────────────────────────────

/// Run `fetch` for every argument concurrently and join on all of them.
///
/// An empty argument list returns an empty outcome without calling `fetch`.
/// A failing unit never affects its siblings.
pub async fn fan_out<A, T, E, F, Fut>(
    args: impl IntoIterator<Item = A>,
    fetch: F,
) -> AggregateOutcome<T, E>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    fan_out_with_cancel(args, fetch, &CancellationToken::new()).await
}

/// [`fan_out`] with an external cancellation signal.
///
/// When `cancel` fires, in-flight units are dropped and the outcome holds
/// whatever completed before that point.
pub async fn fan_out_with_cancel<A, T, E, F, Fut>(
    args: impl IntoIterator<Item = A>,
    fetch: F,
    cancel: &CancellationToken,
) -> AggregateOutcome<T, E>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<Fut> = args.into_iter().map(&fetch).collect();
    let mut outcome = AggregateOutcome::with_capacity(pending.len());
    if pending.is_empty() {
        return outcome;
    }

    let units = pending.len();
    debug!(units, "fan-out started");

    loop {
        tokio::select! {
            biased;
            next = pending.next() => match next {
                Some(Ok(value)) => outcome.successes.push(value),
                Some(Err(err)) => outcome.errors.push(err),
                None => break,
            },
            () = cancel.cancelled() => {
                outcome.cancelled = pending.len();
                warn!(units, cancelled = outcome.cancelled, "fan-out cancelled");
                break;
            }
        }
    }

    debug!(
        units,
        successes = outcome.successes.len(),
        errors = outcome.errors.len(),
        "fan-out finished"
    );
    outcome
}

// ── Keyed fan-out ────────────────────────────────────────────────────

/// Result of [`fan_out_keyed`]: every completed unit paired with its argument.
#[derive(Debug)]
pub struct KeyedOutcome<A, T, E> {
    /// `(argument, result)` in arrival order.
    pub results: Vec<(A, Result<T, E>)>,
    /// Arguments whose units were abandoned on cancellation, in input order.
    pub cancelled: Vec<A>,
}

impl<A, T, E> KeyedOutcome<A, T, E> {
    /// Arguments whose fetch failed, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (&A, &E)> {
        self.results
            .iter()
            .filter_map(|(arg, result)| result.as_ref().err().map(|e| (arg, e)))
    }

    /// Drop the argument correspondence, yielding the unkeyed outcome.
    pub fn into_aggregate(self) -> AggregateOutcome<T, E> {
        let mut outcome = AggregateOutcome::with_capacity(self.results.len());
        outcome.cancelled = self.cancelled.len();
        for (_, result) in self.results {
            match result {
                Ok(value) => outcome.successes.push(value),
                Err(err) => outcome.errors.push(err),
            }
        }
        outcome
    }
}

/// Fan out like [`fan_out_with_cancel`] but keep which argument produced
/// which result.
pub async fn fan_out_keyed<A, T, E, F, Fut>(
    args: impl IntoIterator<Item = A>,
    fetch: F,
    cancel: &CancellationToken,
) -> KeyedOutcome<A, T, E>
where
    A: Clone,
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let args: Vec<A> = args.into_iter().collect();
    let mut done = vec![false; args.len()];
    let mut results = Vec::with_capacity(args.len());

    let mut pending: FuturesUnordered<_> = args
        .iter()
        .cloned()
        .enumerate()
        .map(|(idx, arg)| {
            let unit = fetch(arg);
            async move { (idx, unit.await) }
        })
        .collect();

    loop {
        tokio::select! {
            biased;
            next = pending.next() => match next {
                Some((idx, result)) => {
                    done[idx] = true;
                    results.push((args[idx].clone(), result));
                }
                None => break,
            },
            () = cancel.cancelled() => {
                warn!(units = args.len(), cancelled = pending.len(), "keyed fan-out cancelled");
                break;
            }
        }
    }

    let cancelled = args
        .into_iter()
        .zip(done)
        .filter_map(|(arg, finished)| (!finished).then_some(arg))
        .collect();

    KeyedOutcome { results, cancelled }
}
