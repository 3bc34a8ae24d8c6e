//! Thread-name registry
//!
//! Maps a per-thread key to a human-assigned label so log lines can say
//! `(ingest)` instead of `(17)`.
//!
//! - Keys come from a process-wide counter, handed out lazily the first time a
//!   thread asks for one. They are never reused, so a label left behind by a
//!   thread that exited without releasing it cannot attach to a later thread.
//!   The cost is that such entries stay in the map until removed.
//! - One reader/writer lock guards the whole map.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);
static GLOBAL: OnceLock<Arc<ThreadNames>> = OnceLock::new();

thread_local! {
    static CURRENT_KEY: ThreadKey = ThreadKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed));
}

/// Opaque identifier of an OS thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadKey(u64);

impl ThreadKey {
    pub fn current() -> ThreadKey {
        CURRENT_KEY.with(|k| *k)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ThreadNames {
    names: RwLock<HashMap<ThreadKey, String>>,
}

impl ThreadNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by `Logger::new` and the free functions.
    pub fn global() -> &'static Arc<ThreadNames> {
        GLOBAL.get_or_init(|| Arc::new(ThreadNames::new()))
    }

    /// Name the calling thread. Overwrites any previous label for it.
    pub fn assign(self: &Arc<Self>, label: impl Into<String>) -> NameHandle {
        let key = ThreadKey::current();
        self.names.write().insert(key, label.into());
        NameHandle {
            key,
            names: Arc::clone(self),
        }
    }

    pub fn remove(&self, key: ThreadKey) {
        self.names.write().remove(&key);
    }

    /// Label for `key`, or its decimal form when unnamed.
    pub fn resolve(&self, key: ThreadKey) -> String {
        match self.names.read().get(&key) {
            Some(label) => label.clone(),
            None => key.to_string(),
        }
    }

    pub fn resolve_current(&self) -> String {
        self.resolve(ThreadKey::current())
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

/// Returned by [`ThreadNames::assign`]; releasing it removes that thread's label.
///
/// Dropping the handle without calling [`NameHandle::release`] keeps the label.
#[must_use = "keep the handle to remove the name later, or call `release`"]
#[derive(Debug)]
pub struct NameHandle {
    key: ThreadKey,
    names: Arc<ThreadNames>,
}

impl NameHandle {
    pub fn key(&self) -> ThreadKey {
        self.key
    }

    /// Remove the label. May be called from any thread.
    pub fn release(self) {
        self.names.remove(self.key);
    }
}

/// Name the calling thread in the process-wide registry.
pub fn assign_thread_name(label: impl Into<String>) -> NameHandle {
    ThreadNames::global().assign(label)
}

pub fn remove_thread_name(key: ThreadKey) {
    ThreadNames::global().remove(key);
}
