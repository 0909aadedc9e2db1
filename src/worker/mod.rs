//! Background worker for file I/O.
//!
//! Image files are read and encoded on a Zellij worker thread so the plugin's
//! update loop never blocks on the filesystem. The Zellij `ZellijWorker` glue
//! lives in the binary; this module is plain request/response logic.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: [`MemoriesWorker`] and the image loading itself

pub mod handler;
pub mod messages;

pub use handler::{load_image, MemoriesWorker};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name used for both the worker and its plugin messages.
pub const WORKER_NAME: &str = "memories";
