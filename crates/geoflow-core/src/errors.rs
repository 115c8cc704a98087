//! Errores del motor de pipelines.
//!
//! Se dividen en tres familias (ver política de propagación):
//! - Configuración (build time): detienen el arranque de la aplicación.
//! - Lookup (call time): pipeline inexistente para `(name, scope)`.
//! - Ejecución (call time): un step o interceptor señaló un fallo; se
//!   propaga sin modificar, sin reintentos y sin tragarse el error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    /// La definición declara a la vez lista de steps y delegate.
    #[error("pipeline '{0}' declares both an explicit step list and a delegate")]
    StepsAndDelegate(String),

    /// El delegate referenciado no existe entre las definiciones registradas.
    #[error("pipeline '{pipeline}' delegates to unknown pipeline '{delegate}'")]
    UnknownDelegate { pipeline: String, delegate: String },

    /// Ciclo en la cadena de delegates (A -> B -> ... -> A).
    #[error("delegate cycle detected while resolving pipeline '{0}'")]
    DelegateCycle(String),

    /// Una extensión apunta a un hook que no existe en la cadena aplanada.
    #[error("extension targets hook '{hook}' which is absent from pipeline '{pipeline}'")]
    NoMatchingHook { pipeline: String, hook: String },

    /// Un interceptor nombra explícitamente un step que no es resoluble.
    #[error("interceptor '{interceptor}' references unresolvable step '{step_id}' in pipeline '{pipeline}'")]
    UnknownInterceptorStep {
        pipeline: String,
        interceptor: String,
        step_id: String,
    },

    /// Rango invertido: el from resuelto queda después del to.
    #[error("interceptor '{interceptor}' declares an invalid nesting in pipeline '{pipeline}' (from '{from}' after to '{to}')")]
    InvalidNesting {
        pipeline: String,
        interceptor: String,
        from: String,
        to: String,
    },

    /// Dos interceptores se solapan sin anidarse (rango parcialmente cubierto).
    #[error("interceptor '{interceptor}' overlaps an already wrapped range at step '{step_id}' in pipeline '{pipeline}'")]
    OverlappingInterceptors {
        pipeline: String,
        interceptor: String,
        step_id: String,
    },

    /// Lookup sin resultado, ni exacto ni con fallback al scope nulo.
    #[error("no pipeline registered for name '{name}' and scope {scope:?}")]
    PipelineNotFound { name: String, scope: Option<String> },

    /// Clave obligatoria ausente en el contexto.
    #[error("missing required context key '{0}'")]
    MissingContextKey(String),

    /// La clave existe pero su valor no se puede decodificar al tipo pedido.
    #[error("context key '{key}' holds an incompatible value: {reason}")]
    InvalidContextValue { key: String, reason: String },

    /// Fallo señalado por un step o por un interceptor durante la ejecución.
    #[error("step '{step_id}' failed: {message}")]
    StepFailed { step_id: String, message: String },

    #[error("internal: {0}")]
    Internal(String),
}
