//! Result-wrapped variants of the concurrency combinators.
//!
//! Each combinator keeps its native settlement semantics (ordering, partial
//! failure, aggregate failure) and only the final settle/reject is funneled
//! through the wrapper. The typed functions ([`all`], [`race`], [`any`],
//! [`all_settled`]) are the normal surface; [`Dispatch`] is the name-keyed
//! path for callers that select a combinator at runtime, with a fallback
//! entry for unsupported names that fails at call time rather than at lookup
//! time.

use futures_util::future::{BoxFuture, join_all, select_all, select_ok, try_join_all};
use thiserror::Error;

use crate::either::Either;
use crate::reason::Reason;
use crate::wrap::settle;

/// Failures synthesized by the combinator layer itself.
#[derive(Debug, Error)]
pub enum CombinatorError {
    /// Every input to `any` failed; the underlying errors are collapsed into
    /// this one aggregate error rather than preserved as a list.
    #[error("All promises were rejected")]
    AllRejected,
    /// A name-keyed lookup named a combinator the primitive does not expose.
    #[error("property {0} not found on might_fail")]
    UnknownCombinator(String),
    /// `race` over zero inputs would suspend forever; it fails fast instead.
    #[error("race called with no pending operations")]
    EmptyRace,
}

impl From<CombinatorError> for Reason {
    fn from(err: CombinatorError) -> Self {
        Self::Error(err.into())
    }
}

/// Succeed with the ordered values of every input, or fail with the first
/// failure by completion order, normalized.
///
/// On that first failure the remaining inputs are cancelled (dropped), so
/// their side effects may never run.
pub async fn all<T, E, F, I>(inputs: I) -> Either<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    Either::from_settled(try_join_all(inputs.into_iter().map(settle)).await)
}

/// Settle with whichever input settles first, success or failure.
///
/// Zero inputs would never settle, so an empty `race` fails fast with
/// [`CombinatorError::EmptyRace`] instead of suspending forever.
pub async fn race<T, E, F, I>(inputs: I) -> Either<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    let pending: Vec<_> = inputs
        .into_iter()
        .map(|pending| Box::pin(settle(pending)))
        .collect();
    if pending.is_empty() {
        return Either::fail(CombinatorError::EmptyRace);
    }
    let (first, _index, _rest) = select_all(pending).await;
    Either::from_settled(first)
}

/// Succeed with the first input to succeed; fail only if every input fails.
///
/// The individual failures are collapsed into one aggregate error with the
/// fixed message `All promises were rejected`, matching the all-failed case.
pub async fn any<T, E, F, I>(inputs: I) -> Either<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    let pending: Vec<_> = inputs
        .into_iter()
        .map(|pending| Box::pin(settle(pending)))
        .collect();
    if pending.is_empty() {
        return Either::fail(CombinatorError::AllRejected);
    }
    match select_ok(pending).await {
        Ok((value, _rest)) => Either::might(value),
        Err(_last) => Either::fail(CombinatorError::AllRejected),
    }
}

/// Drive every input to completion and report each outcome in input order.
/// Never fails: the returned `Either` is always the success side.
pub async fn all_settled<T, E, F, I>(inputs: I) -> Either<Vec<Settled<T>>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    let outcomes = join_all(inputs.into_iter().map(settle)).await;
    Either::might(
        outcomes
            .into_iter()
            .map(|outcome| match outcome {
                Ok(value) => Settled::Fulfilled(value),
                Err(reason) => Settled::Rejected(reason.normalize()),
            })
            .collect(),
    )
}

/// Per-input outcome reported by [`all_settled`].
#[derive(Debug)]
pub enum Settled<T> {
    /// The input succeeded with this value.
    Fulfilled(T),
    /// The input failed; its reason, normalized.
    Rejected(anyhow::Error),
}

impl<T> Settled<T> {
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Fulfilled(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Fulfilled(_) => None,
            Self::Rejected(err) => Some(err),
        }
    }
}

/// The settlement shape produced by the name-keyed path, since combinators
/// disagree on whether they yield one value, an ordered list, or a settled
/// report.
#[derive(Debug)]
pub enum Outcome<T> {
    Value(T),
    List(Vec<T>),
    Settled(Vec<Settled<T>>),
}

/// Name-keyed combinator dispatch.
///
/// [`Dispatch::resolve`] is the explicit mapping from combinator names to
/// implementations; it is side-effect-free and total, so looking up an
/// unsupported name never fails. Invoking the resolved entry is what yields
/// a failed [`Either`] naming the missing combinator.
///
/// ```
/// use might_fail::Dispatch;
///
/// let unknown = Dispatch::resolve("bogus");
/// assert!(matches!(unknown, Dispatch::Unknown(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    All,
    Race,
    Any,
    AllSettled,
    /// Resolved from a name the primitive does not expose; fails when called.
    Unknown(String),
}

impl Dispatch {
    /// Map a combinator name to its implementation. Both the camelCase name
    /// of the source interface and the snake_case spelling are accepted.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "race" => Self::Race,
            "any" => Self::Any,
            "allSettled" | "all_settled" => Self::AllSettled,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Invoke the resolved combinator over uniformly boxed inputs.
    ///
    /// Every arm forwards through the same settlement path; no combinator
    /// carries wrapping logic of its own. The `Unknown` arm synthesizes its
    /// failure here, at call time.
    pub async fn call<T>(
        &self,
        inputs: Vec<BoxFuture<'_, Result<T, Reason>>>,
    ) -> Either<Outcome<T>> {
        match self {
            Self::All => all(inputs).await.map(Outcome::List),
            Self::Race => race(inputs).await.map(Outcome::Value),
            Self::Any => any(inputs).await.map(Outcome::Value),
            Self::AllSettled => all_settled(inputs).await.map(Outcome::Settled),
            Self::Unknown(name) => {
                tracing::warn!(combinator = %name, "unknown combinator invoked");
                Either::fail(CombinatorError::UnknownCombinator(name.clone()))
            }
        }
    }
}
