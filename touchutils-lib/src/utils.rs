use std::sync::{LockResult, PoisonError};

use tracing::warn;

pub trait RecoverPoison<T> {
    fn recover(self) -> T;
}

impl<T> RecoverPoison<T> for LockResult<T> {
    fn recover(self) -> T {
        self.unwrap_or_else(|e: PoisonError<T>| {
            warn!("Tracker lock poisoned, recovering");
            e.into_inner()
        })
    }
}
