//! Bridges between spawned network tasks and the single-threaded UI.
//!
//! Each in-flight operation parks its outcome in a shared slot; the owning
//! state manager polls the slot once per frame from `update_from_async`.
//! Slots are written exactly once and consumed exactly once.

use std::future::Future;
use std::sync::{Arc, Mutex};

pub type Slot<T> = Arc<Mutex<Option<T>>>;

pub fn new_slot<T>() -> Slot<T> {
    Arc::new(Mutex::new(None))
}

/// Park a finished task's outcome for the UI thread to pick up.
pub fn fill<T>(slot: &Slot<T>, value: T) {
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(value);
    }
}

/// Non-blocking poll; clears the pending slot once its value is taken.
pub fn poll<T>(pending: &mut Option<Slot<T>>) -> Option<T> {
    let value = match pending {
        Some(slot) => slot.try_lock().ok().and_then(|mut guard| guard.take()),
        None => None,
    };
    if value.is_some() {
        *pending = None;
    }
    value
}

pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}
