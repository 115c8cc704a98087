//! Contrato de Step consumido por el motor.

use crate::errors::PipelineError;
use crate::model::PipelineContext;

/// Trait que define un step de pipeline. El motor no conoce nada de la
/// semántica del step: sólo su `id` (único dentro de un pipeline finalizado)
/// y su ejecución contra el par contexto/response.
pub trait PipelineStep<R>: Send + Sync {
    /// Identificador estable y único dentro del pipeline finalizado.
    fn id(&self) -> &str;

    /// Ejecuta el step. Un error aborta la ejecución completa del pipeline y
    /// se propaga al caller sin modificar.
    fn execute(&self, context: &mut PipelineContext, response: &mut R) -> Result<(), PipelineError>;
}

/// Hook: step no-op que expone su `id` como punto de empalme válido para
/// extensiones de definiciones más específicas. Sigue siendo un step y se
/// ejecuta como tal; el empalme ocurre inmediatamente después de él, nunca
/// dentro.
#[derive(Debug, Clone)]
pub struct PipelineHook {
    id: String,
}

impl PipelineHook {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl<R> PipelineStep<R> for PipelineHook {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, _context: &mut PipelineContext, _response: &mut R) -> Result<(), PipelineError> {
        Ok(())
    }
}
