//! Definiciones relacionadas a Steps.
//!
//! Un step es la unidad de trabajo que el motor compone; este módulo define:
//! - `PipelineStep`: interfaz neutral consumida por el engine.
//! - `PipelineHook`: step no-op que marca un punto de empalme.
//! - `PipelineInterceptor` + `InterceptorStep`: contrato before/after y su
//!   step compuesto.
//! - `PipelineElement`: el conjunto cerrado de variantes que forman una
//!   lista finalizada.

pub mod definition;
pub mod element;
pub mod interceptor;
pub mod macros; // macro pipeline_step!

pub use definition::{PipelineHook, PipelineStep};
pub use element::PipelineElement;
pub use interceptor::{ExecutionMode, InterceptorStep, PipelineInterceptor};
