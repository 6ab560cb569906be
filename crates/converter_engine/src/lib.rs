//! Converter engine: HTTP client, download persistence and effect execution.
mod client;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{ClientSettings, ConversionClient, ReqwestClient, Upload};
pub use engine::{EngineConfig, EngineHandle};
pub use filename::safe_file_name;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{ClientError, EngineEvent, FailureKind, RequestId};
