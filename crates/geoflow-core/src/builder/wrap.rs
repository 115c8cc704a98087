//! Envoltura de interceptores sobre la lista aplanada.
//!
//! Los specs se recogen a lo largo de la cadena (los propios de la definición
//! antes que los heredados), se resuelven sus endpoints contra la lista
//! aplanada y se ordenan ascendentemente por ancho. Procesar primero el más
//! angosto hace que los más anchos encuentren sus endpoints ya reemplazados
//! por compuestos y terminen, de forma natural, envolviendo rangos exteriores
//! que contienen rangos ya envueltos. Cada envoltura produce una lista nueva
//! (actualización funcional): el índice vigente de un step siempre se lee
//! sobre el snapshot de la pasada en curso.

use std::sync::Arc;

use crate::definition::PipelineDefinition;
use crate::errors::PipelineError;
use crate::step::{InterceptorStep, PipelineElement, PipelineInterceptor};

struct ResolvedInterceptor<R> {
    interceptor: Arc<dyn PipelineInterceptor<R>>,
    from_id: String,
    to_id: String,
    /// Clave de ordenación durante la construcción; no sobrevive al build.
    width: usize,
}

#[derive(Clone, Copy)]
enum Endpoint {
    From,
    To,
}

pub(super) fn wrap_interceptors<R>(definitions: &[PipelineDefinition<R>],
                                   chain: &[usize],
                                   flattened: Vec<PipelineElement<R>>,
                                   pipeline_name: &str)
                                   -> Result<Vec<PipelineElement<R>>, PipelineError> {
    let collected: Vec<Arc<dyn PipelineInterceptor<R>>> = chain.iter()
                                                               .flat_map(|&idx| {
                                                                   definitions[idx].interceptors().iter().cloned()
                                                               })
                                                               .collect();
    if collected.is_empty() {
        return Ok(flattened);
    }
    if flattened.is_empty() {
        return Err(PipelineError::Internal(format!(
            "interceptor '{}' declared on empty pipeline '{pipeline_name}'",
            collected[0].id()
        )));
    }

    let mut resolved = resolve_specs(collected, &flattened, pipeline_name)?;
    resolved.sort_by_key(|spec| spec.width); // estable: a igual ancho decide el orden de recolección

    let mut current = flattened;
    for spec in resolved {
        let from_idx = locate(&current, &spec.from_id, Endpoint::From, spec.interceptor.id(), pipeline_name)?;
        let to_idx = locate(&current, &spec.to_id, Endpoint::To, spec.interceptor.id(), pipeline_name)?;
        if from_idx > to_idx {
            return Err(PipelineError::InvalidNesting { pipeline: pipeline_name.to_string(),
                                                       interceptor: spec.interceptor.id().to_string(),
                                                       from: spec.from_id,
                                                       to: spec.to_id });
        }

        let nested: Vec<PipelineElement<R>> = current[from_idx..=to_idx].to_vec();
        let mut next = Vec::with_capacity(current.len() - nested.len() + 1);
        next.extend_from_slice(&current[..from_idx]);
        next.push(PipelineElement::Wrapped(InterceptorStep::new(Arc::clone(&spec.interceptor),
                                                                spec.from_id.clone(),
                                                                spec.to_id.clone(),
                                                                nested)));
        next.extend_from_slice(&current[to_idx + 1..]);
        current = next;
    }
    Ok(current)
}

/// Resolución inicial de endpoints contra la lista aplanada (sin compuestos
/// todavía): defaults al primer/último elemento, error si un id explícito no
/// aparece, error si el rango resuelto queda invertido.
fn resolve_specs<R>(collected: Vec<Arc<dyn PipelineInterceptor<R>>>,
                    flattened: &[PipelineElement<R>],
                    pipeline_name: &str)
                    -> Result<Vec<ResolvedInterceptor<R>>, PipelineError> {
    let mut resolved = Vec::with_capacity(collected.len());
    for interceptor in collected {
        let from_id = match interceptor.from_step_id() {
            Some(id) => id.to_string(),
            None => flattened[0].id().to_string(),
        };
        let to_id = match interceptor.to_step_id() {
            Some(id) => id.to_string(),
            None => flattened[flattened.len() - 1].id().to_string(),
        };
        let from_idx = index_of(flattened, &from_id, interceptor.id(), pipeline_name)?;
        let to_idx = index_of(flattened, &to_id, interceptor.id(), pipeline_name)?;
        if from_idx > to_idx {
            return Err(PipelineError::InvalidNesting { pipeline: pipeline_name.to_string(),
                                                       interceptor: interceptor.id().to_string(),
                                                       from: from_id,
                                                       to: to_id });
        }
        resolved.push(ResolvedInterceptor { interceptor,
                                            from_id,
                                            to_id,
                                            width: to_idx - from_idx + 1 });
    }
    Ok(resolved)
}

fn index_of<R>(elements: &[PipelineElement<R>],
               id: &str,
               interceptor_id: &str,
               pipeline_name: &str)
               -> Result<usize, PipelineError> {
    elements.iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| PipelineError::UnknownInterceptorStep { pipeline: pipeline_name.to_string(),
                                                                   interceptor: interceptor_id.to_string(),
                                                                   step_id: id.to_string() })
}

/// Índice vigente de un endpoint en la lista en curso. Un elemento compuesto
/// se compara por sus endpoints registrados, no por su propia identidad: así
/// un endpoint que coincide con el borde de un rango ya envuelto se encuentra
/// correctamente. Un endpoint `from` que sólo coincide con el borde `to` de
/// un compuesto (o viceversa) declara un solape sin anidamiento: error.
fn locate<R>(elements: &[PipelineElement<R>],
             id: &str,
             endpoint: Endpoint,
             interceptor_id: &str,
             pipeline_name: &str)
             -> Result<usize, PipelineError> {
    for (i, element) in elements.iter().enumerate() {
        match element {
            PipelineElement::Wrapped(w) => {
                let (own, opposite) = match endpoint {
                    Endpoint::From => (w.from_id(), w.to_id()),
                    Endpoint::To => (w.to_id(), w.from_id()),
                };
                if own == id {
                    return Ok(i);
                }
                if opposite == id {
                    return Err(PipelineError::OverlappingInterceptors { pipeline: pipeline_name.to_string(),
                                                                        interceptor: interceptor_id.to_string(),
                                                                        step_id: id.to_string() });
                }
            }
            other => {
                if other.id() == id {
                    return Ok(i);
                }
            }
        }
    }
    // El id existía al resolver pero quedó enterrado dentro de un rango ya
    // envuelto sin coincidir con sus bordes: deja de ser resoluble.
    Err(PipelineError::UnknownInterceptorStep { pipeline: pipeline_name.to_string(),
                                                interceptor: interceptor_id.to_string(),
                                                step_id: id.to_string() })
}
