// Launch analytics engine library root

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod views;

pub use error::{EngineError, RecordError};
pub use pipeline::{PipelineReport, ReportPipeline};
