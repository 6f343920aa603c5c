//! Conveniences backed by the time zone database compiled into the crate.
//!
//! Every method here forwards to its `_with_provider` counterpart with a
//! global [`TzdbProvider`].

mod datetime;
mod now;
mod zone;
mod zoneddatetime;

use std::sync::{LazyLock, Mutex};

use tempora_provider::TzdbProvider;

use crate::{TemporalError, TemporalResult};

pub(crate) static TZ_PROVIDER: LazyLock<Mutex<TzdbProvider>> =
    LazyLock::new(|| Mutex::new(TzdbProvider::default()));

/// Runs `f` with the compiled provider locked.
pub(crate) fn with_tz_provider<T>(
    f: impl FnOnce(&TzdbProvider) -> TemporalResult<T>,
) -> TemporalResult<T> {
    let provider = TZ_PROVIDER
        .lock()
        .map_err(|_| TemporalError::general("Unable to acquire lock"))?;
    f(&provider)
}
