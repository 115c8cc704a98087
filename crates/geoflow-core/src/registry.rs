//! Registro de pipelines finalizados, indexado por stamp `(name, scope)`.
//!
//! El registro es un valor inmutable producido por el build y compartido por
//! referencia entre callers concurrentes; no hay estado global ni mutación
//! posterior al arranque.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;
use crate::step::PipelineElement;

/// Par `(name, scope)` que identifica un pipeline finalizado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineStamp {
    pub name: String,
    pub scope: Option<String>,
}

impl PipelineStamp {
    pub fn new(name: impl Into<String>, scope: Option<String>) -> Self {
        Self { name: name.into(), scope }
    }
}

impl fmt::Display for PipelineStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}@{}", self.name, scope),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Pipeline finalizado: stamp + lista de elementos en la que los rangos de
/// interceptores ya fueron reemplazados, de adentro hacia afuera, por steps
/// compuestos. Nunca se muta después de construido.
pub struct FinalizedPipeline<R> {
    stamp: PipelineStamp,
    elements: Vec<PipelineElement<R>>,
}

impl<R> FinalizedPipeline<R> {
    pub(crate) fn new(stamp: PipelineStamp, elements: Vec<PipelineElement<R>>) -> Self {
        Self { stamp, elements }
    }

    pub fn stamp(&self) -> &PipelineStamp {
        &self.stamp
    }

    pub fn name(&self) -> &str {
        &self.stamp.name
    }

    pub fn scope(&self) -> Option<&str> {
        self.stamp.scope.as_deref()
    }

    pub fn elements(&self) -> &[PipelineElement<R>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<R> fmt::Debug for FinalizedPipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizedPipeline")
            .field("stamp", &self.stamp)
            .field("elements", &self.elements.len())
            .finish()
    }
}

/// Índice de pipelines finalizados con fallback de scope en el lookup.
pub struct PipelineRegistry<R> {
    pipelines: HashMap<PipelineStamp, Arc<FinalizedPipeline<R>>>,
}

impl<R> fmt::Debug for PipelineRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRegistry")
            .field("pipelines", &self.pipelines)
            .finish()
    }
}

impl<R> PipelineRegistry<R> {
    pub(crate) fn new() -> Self {
        Self { pipelines: HashMap::new() }
    }

    /// Registra un pipeline. Si el stamp ya existía, el último gana: así la
    /// configuración de la aplicación puede sobreescribir defaults del
    /// framework sin un paso de borrado explícito.
    pub(crate) fn insert(&mut self, pipeline: FinalizedPipeline<R>) {
        let stamp = pipeline.stamp().clone();
        if self.pipelines.contains_key(&stamp) {
            log::debug!("pipeline '{stamp}' overridden by a later definition");
        }
        self.pipelines.insert(stamp, Arc::new(pipeline));
    }

    /// Lookup exacto por `(name, scope)`; si no hay entrada y el scope era
    /// no-nulo, reintenta con `(name, None)` (el default agnóstico al scope).
    /// Nunca devuelve un pipeline de otro nombre, sólo uno menos específico.
    pub fn lookup(&self, name: &str, scope: Option<&str>) -> Result<Arc<FinalizedPipeline<R>>, PipelineError> {
        let exact = PipelineStamp::new(name, scope.map(String::from));
        if let Some(p) = self.pipelines.get(&exact) {
            return Ok(Arc::clone(p));
        }
        if scope.is_some() {
            let fallback = PipelineStamp::new(name, None);
            if let Some(p) = self.pipelines.get(&fallback) {
                log::debug!("pipeline '{exact}' not registered, falling back to '{fallback}'");
                return Ok(Arc::clone(p));
            }
        }
        Err(PipelineError::PipelineNotFound { name: name.to_string(),
                                              scope: scope.map(String::from) })
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Stamps registrados (orden no determinista).
    pub fn stamps(&self) -> impl Iterator<Item = &PipelineStamp> {
        self.pipelines.keys()
    }
}
