//! Engine module for the pipeline engine facade.
//!
//! Provides lookup over the finalized registry and the synchronous executor
//! honoring cooperative short-circuiting and the interceptor before/after
//! contract.

pub mod core;
mod executor;

pub use self::core::PipelineEngine;

pub(crate) use self::executor::run_elements;
