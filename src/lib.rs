pub mod event;
pub mod result;
pub mod error;
pub mod config;
pub mod facility;
pub mod client;
pub mod recorder;

pub mod init;
pub mod noop;

pub use client::EventLoggingClient;
pub use config::RecorderConfig;
pub use event::EventMessage;
pub use facility::{LoggingFacility, TracingFacility};
pub use recorder::{DefaultLoggerRecorder, DefaultSidecarRecorder, EventRecorder};
pub use result::LogResult;
