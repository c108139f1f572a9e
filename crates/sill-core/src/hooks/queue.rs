use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A queue shared between a native hook callback (producer) and the tick
/// (consumer). Clones share the same storage.
#[derive(Debug)]
pub struct HookQueue<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

impl<T> HookQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, item: T) {
        self.lock().push_back(item);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking producer must not take the consumer down with it.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Clone for HookQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for HookQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
