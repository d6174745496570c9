//! Error-accumulating result combinators.
//!
//! A decode result is either a value or a non-empty list of failures.
//! Independent sub-results are merged with [`sequence`] or [`zip`], which
//! keep *every* failure. Dependent steps chain with `?` or `and_then`, which
//! stop at the first failure because there is nothing left to accumulate.

use crate::{ConfigFailure, NonEmptyList};

/// Result of a decode step.
pub type ConfigResult<T> = Result<T, NonEmptyList<ConfigFailure>>;

/// A failed result holding one failure.
pub fn invalid<T>(failure: ConfigFailure) -> ConfigResult<T> {
    Err(NonEmptyList::new(failure))
}

/// Collect independent results.
///
/// Succeeds with all values, in order, iff every element succeeded.
/// Otherwise fails with the concatenation of every element's failures.
/// An empty input succeeds with an empty vector.
pub fn sequence<T, E, I>(results: I) -> Result<Vec<T>, NonEmptyList<E>>
where
    I: IntoIterator<Item = Result<T, NonEmptyList<E>>>,
{
    let mut values = Vec::new();
    let mut failures: Option<NonEmptyList<E>> = None;

    for result in results {
        match result {
            Ok(value) => {
                if failures.is_none() {
                    values.push(value);
                }
            }
            Err(errors) => {
                if let Some(acc) = failures.as_mut() {
                    acc.append(errors);
                } else {
                    failures = Some(errors);
                }
            }
        }
    }

    match failures {
        Some(errors) => Err(errors),
        None => Ok(values),
    }
}

/// Combine two independent results, keeping the failures of both.
pub fn zip<A, B, E>(
    left: Result<A, NonEmptyList<E>>,
    right: Result<B, NonEmptyList<E>>,
) -> Result<(A, B), NonEmptyList<E>> {
    match (left, right) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
        (Err(mut left), Err(right)) => {
            left.append(right);
            Err(left)
        }
    }
}
