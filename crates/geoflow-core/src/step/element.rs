//! Conjunto cerrado de variantes de elemento de pipeline.
//!
//! Un pipeline finalizado es una lista de `PipelineElement`. Representar los
//! tres casos como variantes etiquetadas (step plano, hook, step compuesto de
//! interceptor) evita inspección de tipos en runtime cuando el builder
//! re-resuelve endpoints sobre listas que ya contienen compuestos.

use std::sync::Arc;

use crate::errors::PipelineError;
use crate::model::PipelineContext;

use super::definition::PipelineStep;
use super::interceptor::InterceptorStep;

pub enum PipelineElement<R> {
    /// Step plano suministrado por el caller.
    Step(Arc<dyn PipelineStep<R>>),
    /// Step que además es punto de empalme para extensiones.
    Hook(Arc<dyn PipelineStep<R>>),
    /// Compuesto construido por el builder alrededor de un sub-rango.
    Wrapped(InterceptorStep<R>),
}

impl<R> std::fmt::Debug for PipelineElement<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineElement::Step(s) => f.debug_tuple("Step").field(&s.id()).finish(),
            PipelineElement::Hook(s) => f.debug_tuple("Hook").field(&s.id()).finish(),
            PipelineElement::Wrapped(w) => f.debug_tuple("Wrapped").field(&w.id()).finish(),
        }
    }
}

impl<R> PipelineElement<R> {
    /// Id del elemento: el del step, o el del interceptor si es compuesto.
    pub fn id(&self) -> &str {
        match self {
            PipelineElement::Step(s) => s.id(),
            PipelineElement::Hook(s) => s.id(),
            PipelineElement::Wrapped(w) => w.id(),
        }
    }

    pub fn is_hook(&self) -> bool {
        matches!(self, PipelineElement::Hook(_))
    }

    /// Ejecución polimórfica única para las tres variantes. Los compuestos
    /// recursan de forma natural: un compuesto es simplemente otro elemento.
    pub fn execute(&self, context: &mut PipelineContext, response: &mut R) -> Result<(), PipelineError> {
        match self {
            PipelineElement::Step(s) => s.execute(context, response),
            PipelineElement::Hook(s) => s.execute(context, response),
            PipelineElement::Wrapped(w) => w.execute(context, response),
        }
    }
}

impl<R> Clone for PipelineElement<R> {
    fn clone(&self) -> Self {
        match self {
            PipelineElement::Step(s) => PipelineElement::Step(Arc::clone(s)),
            PipelineElement::Hook(s) => PipelineElement::Hook(Arc::clone(s)),
            PipelineElement::Wrapped(w) => PipelineElement::Wrapped(w.clone()),
        }
    }
}
