//! Awaiting one pending operation into an [`Either`].

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt as _;

use crate::either::Either;
use crate::reason::Reason;

/// Drive a pending operation to completion, converting both failure channels
/// (an `Err` return and a panic while polling) into a classified [`Reason`].
///
/// This is the single settlement path: the wrapper and every combinator run
/// their inputs through it, so a panic inside any input surfaces exactly like
/// a rejection would.
pub(crate) async fn settle<T, E, F>(pending: F) -> Result<T, Reason>
where
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    match AssertUnwindSafe(pending).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(reason)) => Err(reason.into()),
        Err(payload) => Err(Reason::from_panic(payload)),
    }
}

/// Await `pending` and return its outcome as an [`Either`].
///
/// Never re-raises: an `Err` is normalized into the failure side, and a panic
/// while polling is caught and normalized the same way. The caller always
/// receives a settled `Either`.
///
/// ```
/// # use might_fail::might_fail;
/// # futures_util::future::FutureExt::now_or_never(async {
/// let either = might_fail(async { Ok::<_, anyhow::Error>("success") }).await;
/// assert_eq!(either.result(), Some(&"success"));
/// # }).unwrap();
/// ```
pub async fn might_fail<T, E, F>(pending: F) -> Either<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<Reason>,
{
    Either::from_settled(settle(pending).await)
}

/// Like [`might_fail`], for futures whose only failure channel is a panic.
pub async fn might_fail_infallible<T, F>(pending: F) -> Either<T>
where
    F: Future<Output = T>,
{
    might_fail(async move { Ok::<_, Reason>(pending.await) }).await
}
