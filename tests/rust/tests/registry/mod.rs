//! Logger registry integration tests
//!
//! Idempotent setup, thread naming, deferred file handlers and the
//! end-to-end console/file flow, plus diagnostics forwarded back into a
//! registry.

mod forwarding;
mod idempotence;
mod thread_names;
