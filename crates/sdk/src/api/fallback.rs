//! Single-fallback attempt sequence.
//!
//! A few endpoints have an alternate form that works on servers rejecting the
//! preferred one. The alternate is tried once, only after the primary failed.

use crate::error::{AmbariError, AmbariResult};
use std::future::Future;
use tracing::warn;

/// Which attempt produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Primary,
    Fallback,
}

/// Outcome of a primary-then-fallback sequence.
#[derive(Debug)]
pub struct Fallback<T> {
    pub value: T,
    pub attempt: Attempt,
    /// Why the primary attempt was abandoned, when the fallback answered.
    pub primary_error: Option<AmbariError>,
}

impl<T> Fallback<T> {
    pub fn used_fallback(&self) -> bool {
        self.attempt == Attempt::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fallback<U> {
        Fallback {
            value: f(self.value),
            attempt: self.attempt,
            primary_error: self.primary_error,
        }
    }
}

/// Await `primary`; if it fails, build and await the fallback exactly once.
pub async fn with_fallback<T, P, F, Fut>(primary: P, fallback: F) -> AmbariResult<Fallback<T>>
where
    P: Future<Output = AmbariResult<T>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AmbariResult<T>>,
{
    let primary_error = match primary.await {
        Ok(value) => {
            return Ok(Fallback {
                value,
                attempt: Attempt::Primary,
                primary_error: None,
            })
        }
        Err(e) => e,
    };

    warn!(error = %primary_error, "Primary attempt failed, trying fallback");

    match fallback().await {
        Ok(value) => Ok(Fallback {
            value,
            attempt: Attempt::Fallback,
            primary_error: Some(primary_error),
        }),
        Err(fallback_error) => Err(AmbariError::FallbackFailed {
            primary: Box::new(primary_error),
            fallback: Box::new(fallback_error),
        }),
    }
}
