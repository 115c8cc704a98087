//! Core PipelineEngine implementation

use std::sync::Arc;

use crate::builder::build_registry;
use crate::definition::PipelineDefinition;
use crate::errors::PipelineError;
use crate::model::PipelineContext;
use crate::registry::{FinalizedPipeline, PipelineRegistry};

use super::executor::run_elements;

/// Fachada del motor: construye el registro una vez y, a partir de ahí,
/// sirve lookups y ejecuciones de sólo lectura.
///
/// La fase de ejecución es segura para callers concurrentes ilimitados: cada
/// llamada construye su propio `PipelineContext` y aporta su propio response;
/// el motor no toca estado mutable compartido.
pub struct PipelineEngine<R> {
    registry: PipelineRegistry<R>,
}

impl<R> std::fmt::Debug for PipelineEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineEngine").finish_non_exhaustive()
    }
}

impl<R> PipelineEngine<R> {
    /// Construye el motor finalizando todas las definiciones crudas.
    /// Los errores de configuración se devuelven aquí, antes de servir nada.
    pub fn build(definitions: Vec<PipelineDefinition<R>>) -> Result<Self, PipelineError> {
        Ok(Self { registry: build_registry(definitions)? })
    }

    pub fn from_registry(registry: PipelineRegistry<R>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PipelineRegistry<R> {
        &self.registry
    }

    /// Contexto vacío por request; se descarta al terminar la llamada.
    pub fn new_context(&self) -> PipelineContext {
        PipelineContext::new()
    }

    /// Lookup con fallback de scope (ver `PipelineRegistry::lookup`).
    pub fn lookup(&self, name: &str, scope: Option<&str>) -> Result<Arc<FinalizedPipeline<R>>, PipelineError> {
        self.registry.lookup(name, scope)
    }

    /// Ejecuta un pipeline finalizado contra el par contexto/response.
    pub fn execute(&self,
                   pipeline: &FinalizedPipeline<R>,
                   context: &mut PipelineContext,
                   response: &mut R)
                   -> Result<(), PipelineError> {
        log::trace!("executing pipeline '{}'", pipeline.stamp());
        run_elements(pipeline.elements(), context, response)
    }

    /// Conveniencia: lookup + execute en una llamada.
    pub fn execute_by_name(&self,
                           name: &str,
                           scope: Option<&str>,
                           context: &mut PipelineContext,
                           response: &mut R)
                           -> Result<(), PipelineError> {
        let pipeline = self.lookup(name, scope)?;
        self.execute(&pipeline, context, response)
    }
}
