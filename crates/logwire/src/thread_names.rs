//! Per-thread logger name suffixes
//!
//! Worker threads log under `<base>-<suffix>` so their output can be told
//! apart. The suffix comes from one of two places:
//!
//! - ambient: a suffix registered for the calling thread with
//!   [`ThreadNames::register`], falling back to the thread's own name;
//! - explicit: a [`WorkerContext`] handed to the worker when it is spawned.
//!
//! `ThreadId`s are never reused within a process, so a registered suffix
//! can't leak onto an unrelated later thread.

use dashmap::DashMap;
use std::thread::{self, Thread, ThreadId};

/// Name the standard library gives the process's main thread
const MAIN_THREAD_NAME: &str = "main";

/// Which thread counts as the unsuffixed "main" context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainThread {
    Named,
    Id(ThreadId),
}

/// Registry of suffixes keyed by thread identity
#[derive(Debug)]
pub struct ThreadNames {
    suffixes: DashMap<ThreadId, String>,
    main: MainThread,
}

impl Default for ThreadNames {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadNames {
    /// The thread named `main` is the main context
    pub fn new() -> Self {
        Self {
            suffixes: DashMap::new(),
            main: MainThread::Named,
        }
    }

    /// Designate a specific thread as the main context
    pub fn with_main_thread(main: ThreadId) -> Self {
        Self {
            suffixes: DashMap::new(),
            main: MainThread::Id(main),
        }
    }

    /// Associate `suffix` with the calling thread, replacing any earlier one
    pub fn register(&self, suffix: impl Into<String>) {
        self.suffixes.insert(thread::current().id(), suffix.into());
    }

    pub fn is_main(&self, thread: &Thread) -> bool {
        match self.main {
            MainThread::Named => thread.name() == Some(MAIN_THREAD_NAME),
            MainThread::Id(id) => thread.id() == id,
        }
    }

    /// Suffix for `thread`, or `None` on the main context
    pub fn suffix_for(&self, thread: &Thread) -> Option<String> {
        if self.is_main(thread) {
            return None;
        }
        let suffix = self
            .suffixes
            .get(&thread.id())
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| thread_identity(thread));
        Some(suffix)
    }

    /// Effective logger name for `base` on the calling thread
    pub fn effective_name(&self, base: &str) -> String {
        match self.suffix_for(&thread::current()) {
            Some(suffix) => join(base, &suffix),
            None => base.to_string(),
        }
    }
}

/// The thread's own name, or its id for unnamed threads
fn thread_identity(thread: &Thread) -> String {
    thread
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:?}", thread.id()))
}

fn join(base: &str, suffix: &str) -> String {
    format!("{base}-{suffix}")
}

/// Explicit naming context carried into a worker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkerContext {
    suffix: Option<String>,
}

impl WorkerContext {
    /// Unsuffixed context
    pub fn main() -> Self {
        Self { suffix: None }
    }

    pub fn worker(suffix: impl Into<String>) -> Self {
        Self {
            suffix: Some(suffix.into()),
        }
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn effective_name(&self, base: &str) -> String {
        match &self.suffix {
            Some(suffix) => join(base, suffix),
            None => base.to_string(),
        }
    }
}
