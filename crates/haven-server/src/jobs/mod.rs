//! Background Processing
//!
//! A Postgres-backed job queue: services enqueue through [`JobQueue`],
//! the [`worker::JobWorker`] claims due rows and dispatches them, and the
//! [`scheduler::SweepScheduler`] drives the time-based sweeps.

pub mod queue;
pub mod scheduler;
pub mod worker;

pub use queue::JobQueue;
pub use scheduler::{SweepConfig, SweepScheduler};
pub use worker::{JobWorker, WorkerConfig};
