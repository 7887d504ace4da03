//! Deferred loan evaluation for the web server.
//!
//! Submitted applications are queued by [`QueueScheduler`]; the queue worker
//! waits out the evaluation delay for each job and then asks the
//! underwriting service to decide it.

mod queue_worker;

pub use queue_worker::{underwriting_queue_worker, QueueScheduler};
