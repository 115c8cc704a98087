//! Builder de pipelines: definiciones crudas -> registro finalizado.
//!
//! Corre una sola vez, en el arranque, sobre el conjunto estático de
//! definiciones. Fases por definición:
//! 1. Aplanado de la cadena de delegates + empalme de extensiones.
//! 2. Envoltura de interceptores (resolución de rangos, validación de
//!    anidamiento, orden por ancho).
//! El resultado es una lista de steps autocontenida e inmutable por
//! definición, deduplicada por stamp en el registro (la última gana).

mod flatten;
mod order;
mod wrap;

use crate::definition::PipelineDefinition;
use crate::errors::PipelineError;
use crate::registry::{FinalizedPipeline, PipelineRegistry, PipelineStamp};

/// Builder consumible en el estilo de construcción encadenada.
pub struct PipelineBuilder<R> {
    definitions: Vec<PipelineDefinition<R>>,
}

impl<R> PipelineBuilder<R> {
    pub fn new() -> Self {
        Self { definitions: Vec::new() }
    }

    pub fn add(mut self, definition: PipelineDefinition<R>) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn add_all(mut self, definitions: impl IntoIterator<Item = PipelineDefinition<R>>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    pub fn build(self) -> Result<PipelineRegistry<R>, PipelineError> {
        build_registry(self.definitions)
    }
}

impl<R> Default for PipelineBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finaliza todas las definiciones y construye el registro.
///
/// Los errores de configuración son fatales: una aplicación no debe arrancar
/// con un conjunto de pipelines roto.
pub fn build_registry<R>(definitions: Vec<PipelineDefinition<R>>) -> Result<PipelineRegistry<R>, PipelineError> {
    for def in &definitions {
        if def.has_explicit_steps() && def.delegate_name().is_some() {
            return Err(PipelineError::StepsAndDelegate(def.name().to_string()));
        }
    }

    let index = order::delegate_index(&definitions);
    let build_order = order::build_order(&definitions, &index)?;

    let mut finalized: Vec<Option<FinalizedPipeline<R>>> = definitions.iter().map(|_| None).collect();
    for idx in build_order {
        let def = &definitions[idx];
        let chain = order::delegate_chain(&definitions, &index, idx)?;
        let flattened = flatten::flatten_chain(&definitions, &chain, def.name())?;
        let wrapped = wrap::wrap_interceptors(&definitions, &chain, flattened, def.name())?;

        let stamp = PipelineStamp::new(def.name(), def.scope().map(String::from));
        log::debug!("pipeline '{stamp}' finalized with {} top-level element(s)", wrapped.len());
        finalized[idx] = Some(FinalizedPipeline::new(stamp, wrapped));
    }

    // El registro se puebla en el orden de entrada: con stamps duplicados
    // gana la última definición suministrada, no la última finalizada.
    let mut registry = PipelineRegistry::new();
    for slot in finalized {
        let pipeline = slot.ok_or_else(|| PipelineError::Internal("definition skipped by build order".to_string()))?;
        registry.insert(pipeline);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PipelineContext;
    use crate::step::PipelineStep;

    type Resp = Vec<String>;

    struct RecordStep {
        id: &'static str,
    }

    impl PipelineStep<Resp> for RecordStep {
        fn id(&self) -> &str {
            self.id
        }
        fn execute(&self, _context: &mut PipelineContext, response: &mut Resp) -> Result<(), PipelineError> {
            response.push(self.id.to_string());
            Ok(())
        }
    }

    #[test]
    fn steps_and_delegate_together_are_rejected() {
        let defs = vec![PipelineDefinition::new("base").step(RecordStep { id: "s1" }),
                        PipelineDefinition::new("bad").step(RecordStep { id: "s2" }).delegate("base")];
        let err = build_registry(defs).unwrap_err();
        assert_eq!(err, PipelineError::StepsAndDelegate("bad".to_string()));
    }

    #[test]
    fn empty_flattened_pipeline_is_allowed() {
        // Una definición vacía no es un caso especial: produce una lista vacía.
        let defs: Vec<PipelineDefinition<Resp>> = vec![PipelineDefinition::new("empty")];
        let registry = build_registry(defs).unwrap();
        let pipeline = registry.lookup("empty", None).unwrap();
        assert!(pipeline.is_empty());
    }

    #[test]
    fn registration_order_decides_stamp_override() {
        let defs = vec![PipelineDefinition::new("p").step(RecordStep { id: "first" }),
                        PipelineDefinition::new("p").step(RecordStep { id: "second" })];
        let registry = build_registry(defs).unwrap();
        assert_eq!(registry.len(), 1);
        let pipeline = registry.lookup("p", None).unwrap();
        assert_eq!(pipeline.elements()[0].id(), "second");
    }
}
