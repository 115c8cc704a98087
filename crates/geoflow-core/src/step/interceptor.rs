//! Contrato de interceptor y su step compuesto.
//!
//! Un interceptor envuelve un sub-rango contiguo de steps con un contrato
//! before/after. El resultado de `before_steps` selecciona el modo de
//! ejecución; el motor no sabe nada del propósito del interceptor.

use std::sync::Arc;

use crate::engine::run_elements;
use crate::errors::PipelineError;
use crate::model::PipelineContext;

use super::element::PipelineElement;

/// Modo de ejecución elegido por `before_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Ejecutar los steps envueltos y luego `after_steps` (modo por defecto).
    #[default]
    ExecuteAll,
    /// Ejecutar los steps envueltos pero omitir `after_steps`.
    ExecuteStepsNotAfter,
    /// Omitir los steps envueltos y llamar sólo a `after_steps`.
    ExecuteAfterOnly,
}

/// Trait consumido por el motor para envolver rangos de steps.
pub trait PipelineInterceptor<R>: Send + Sync {
    fn id(&self) -> &str;

    /// Primer step del rango (None = primer step del pipeline aplanado).
    fn from_step_id(&self) -> Option<&str> {
        None
    }

    /// Último step del rango (None = último step del pipeline aplanado).
    fn to_step_id(&self) -> Option<&str> {
        None
    }

    /// Se invoca antes del rango envuelto; su resultado decide el modo.
    fn before_steps(&self, _context: &mut PipelineContext, _response: &mut R) -> Result<ExecutionMode, PipelineError> {
        Ok(ExecutionMode::ExecuteAll)
    }

    /// Se invoca después del rango (según el modo elegido).
    fn after_steps(&self, _context: &mut PipelineContext, _response: &mut R) -> Result<(), PipelineError> {
        Ok(())
    }
}

/// Step compuesto construido por el builder: retiene una copia privada del
/// sub-rango envuelto (en orden original) y los endpoints resueltos del
/// rango. Una vez construido no interactúa más con la lista exterior.
pub struct InterceptorStep<R> {
    interceptor: Arc<dyn PipelineInterceptor<R>>,
    from_id: String,
    to_id: String,
    steps: Vec<PipelineElement<R>>,
}

impl<R> InterceptorStep<R> {
    pub(crate) fn new(interceptor: Arc<dyn PipelineInterceptor<R>>,
                      from_id: String,
                      to_id: String,
                      steps: Vec<PipelineElement<R>>)
                      -> Self {
        Self { interceptor,
               from_id,
               to_id,
               steps }
    }

    pub fn id(&self) -> &str {
        self.interceptor.id()
    }

    /// Endpoint `from` resuelto en el momento de la envoltura.
    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    /// Endpoint `to` resuelto en el momento de la envoltura.
    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    /// Sub-rango envuelto (puede contener a su vez steps compuestos).
    pub fn steps(&self) -> &[PipelineElement<R>] {
        &self.steps
    }

    /// Máquina de estados before/steps/after. Los steps anidados respetan el
    /// flag `finished` exactamente igual que el nivel superior; un error de
    /// `before_steps`, de un step anidado o de `after_steps` aborta toda la
    /// ejecución circundante.
    pub fn execute(&self, context: &mut PipelineContext, response: &mut R) -> Result<(), PipelineError> {
        let mode = self.interceptor.before_steps(context, response)?;
        log::trace!("interceptor '{}' selected mode {:?}", self.id(), mode);
        match mode {
            ExecutionMode::ExecuteAll => {
                run_elements(&self.steps, context, response)?;
                self.interceptor.after_steps(context, response)
            }
            ExecutionMode::ExecuteStepsNotAfter => run_elements(&self.steps, context, response),
            ExecutionMode::ExecuteAfterOnly => self.interceptor.after_steps(context, response),
        }
    }
}

impl<R> Clone for InterceptorStep<R> {
    fn clone(&self) -> Self {
        Self { interceptor: Arc::clone(&self.interceptor),
               from_id: self.from_id.clone(),
               to_id: self.to_id.clone(),
               steps: self.steps.clone() }
    }
}
