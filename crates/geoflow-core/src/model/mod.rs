//! Modelos neutrales del motor (PipelineContext).

pub mod context;

pub use context::PipelineContext;
