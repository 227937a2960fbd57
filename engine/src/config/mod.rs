pub mod settings;

pub use settings::{DisplayConfig, PipelineSettings};
