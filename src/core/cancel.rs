//! Cooperative cancellation
//!
//! Long-running loops call [`CancellationToken::check`] once per iteration and
//! bail out with [`CatlsError::Cancelled`] as soon as the token fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::model::CatlsError;

/// Shared cancellation flag; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` once the token has fired
    pub fn check(&self) -> Result<(), CatlsError> {
        if self.is_cancelled() {
            Err(CatlsError::Cancelled)
        } else {
            Ok(())
        }
    }
}
