//! roentgen-session: stateful enhancement engine over the pure pipeline.
//!
//! A session owns one loaded radiograph, routes transform calls through
//! `roentgen-pipeline`, and keeps a bounded undo/redo log of committed
//! states. Hosts drive it from a single thread and render whatever
//! buffer it reports as current; the session emits `tracing` events
//! rather than printing.

pub mod history;
pub mod session;

pub use history::HistoryLog;
pub use session::PipelineSession;
