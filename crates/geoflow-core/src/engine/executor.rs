//! Recorrido de listas de elementos finalizadas.

use crate::errors::PipelineError;
use crate::model::PipelineContext;
use crate::step::PipelineElement;

/// Recorre la lista en orden. Antes de invocar cada elemento consulta el flag
/// `finished`: si está fijado, el recorrido se detiene de inmediato (parada
/// dura: también los wrappers de interceptor aún pendientes quedan sin
/// ejecutar). Un error de cualquier elemento aborta y se propaga sin tocar.
pub(crate) fn run_elements<R>(elements: &[PipelineElement<R>],
                              context: &mut PipelineContext,
                              response: &mut R)
                              -> Result<(), PipelineError> {
    for element in elements {
        if context.is_finished() {
            log::trace!("context finished, stopping before step '{}'", element.id());
            break;
        }
        log::trace!("executing step '{}'", element.id());
        element.execute(context, response)?;
    }
    Ok(())
}
