//! The two-field result record.

use crate::reason::Reason;

/// The settled outcome of an operation that might fail.
///
/// Exactly one of the two fields is `Some` in every constructed value; the
/// other is `None`. The fields are private and every constructor maintains
/// the invariant, so no `Either` ever holds both a result and an error, or
/// neither.
///
/// Callers branch on which side is present:
///
/// ```
/// use might_fail::might;
///
/// let either = might(5);
/// match either.into_result() {
///     Ok(value) => assert_eq!(value, 5),
///     Err(_) => unreachable!(),
/// }
/// ```
#[derive(Debug)]
#[must_use]
pub struct Either<T> {
    result: Option<T>,
    error: Option<anyhow::Error>,
}

impl<T> Either<T> {
    /// Wrap a known-good value.
    pub fn might(value: T) -> Self {
        Self {
            result: Some(value),
            error: None,
        }
    }

    /// Wrap a known failure reason, applying the same normalization rules as
    /// the async failure path.
    pub fn fail(reason: impl Into<Reason>) -> Self {
        Self {
            result: None,
            error: Some(reason.into().normalize()),
        }
    }

    pub(crate) fn from_settled(settled: Result<T, Reason>) -> Self {
        match settled {
            Ok(value) => Self::might(value),
            Err(reason) => Self::fail(reason),
        }
    }

    /// The success value, if this is the success side.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// The normalized error, if this is the failure side.
    #[must_use]
    pub fn error(&self) -> Option<&anyhow::Error> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }

    /// Map the success side, leaving a failure untouched.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Either<U> {
        Either {
            result: self.result.map(op),
            error: self.error,
        }
    }

    /// Destructure into `(result, error)` for two-field binding at the call
    /// site. Exactly one side is `Some`.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<anyhow::Error>) {
        (self.result, self.error)
    }

    /// Convert back into a `Result` for callers re-entering `?` territory.
    pub fn into_result(self) -> Result<T, anyhow::Error> {
        match (self.result, self.error) {
            (Some(value), None) => Ok(value),
            (None, Some(err)) => Err(err),
            // Unreachable by construction; normalize rather than panic.
            (Some(value), Some(_)) => Ok(value),
            (None, None) => Err(anyhow::anyhow!("Unknown error")),
        }
    }
}

/// Wrap a known-good value. The synchronous counterpart of `might_fail`'s
/// success path.
pub fn might<T>(value: T) -> Either<T> {
    Either::might(value)
}

/// Wrap a known failure reason, normalized exactly as an async rejection
/// would be.
pub fn fail<T>(reason: impl Into<Reason>) -> Either<T> {
    Either::fail(reason)
}
