//! geoflow-core: Motor de composición y ejecución de pipelines.
//!
//! Compila definiciones crudas (con herencia por delegate, hooks de
//! extensión e interceptores transversales) a listas de steps planas e
//! inmutables, las indexa por `(name, scope)` y las ejecuta de forma
//! síncrona con corto-circuito cooperativo.
pub mod builder;
pub mod definition;
pub mod engine;
pub mod errors;
pub mod model;
pub mod registry;
pub mod step;

pub use builder::{build_registry, PipelineBuilder};
pub use definition::PipelineDefinition;
pub use engine::PipelineEngine;
pub use errors::PipelineError;
pub use model::PipelineContext;
pub use registry::{FinalizedPipeline, PipelineRegistry, PipelineStamp};
pub use step::{ExecutionMode, InterceptorStep, PipelineElement, PipelineHook, PipelineInterceptor, PipelineStep};

// La macro pipeline_step! ya se exporta en la raíz vía #[macro_export].
