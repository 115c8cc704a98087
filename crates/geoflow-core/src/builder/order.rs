//! Orden de construcción y resolución de cadenas de delegates.
//!
//! Una definición sólo se finaliza después de sus delegates. El orden total
//! se obtiene caminando la cadena de delegates de cada definición y
//! antecediendo cada ancestro aún no ordenado. El camino lleva un conjunto de
//! visitados: un ciclo de delegates es un error de configuración, no un
//! cuelgue.

use std::collections::{HashMap, HashSet};

use crate::definition::PipelineDefinition;
use crate::errors::PipelineError;

/// Índice de resolución de delegates: nombre -> índice de la definición sin
/// scope con ese nombre (la última registrada gana, coherente con el
/// override por stamp del registro).
pub(super) fn delegate_index<R>(definitions: &[PipelineDefinition<R>]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, def) in definitions.iter().enumerate() {
        if def.scope().is_none() {
            index.insert(def.name().to_string(), i);
        }
    }
    index
}

/// Cadena de delegates empezando por `start`: `[concreta, padre, ..., base]`.
pub(super) fn delegate_chain<R>(definitions: &[PipelineDefinition<R>],
                                index: &HashMap<String, usize>,
                                start: usize)
                                -> Result<Vec<usize>, PipelineError> {
    let mut chain = vec![start];
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);

    let mut current = start;
    while let Some(delegate) = definitions[current].delegate_name() {
        let next = *index.get(delegate)
                         .ok_or_else(|| PipelineError::UnknownDelegate { pipeline: definitions[current].name()
                                                                                                       .to_string(),
                                                                         delegate: delegate.to_string() })?;
        if !visited.insert(next) {
            return Err(PipelineError::DelegateCycle(definitions[start].name().to_string()));
        }
        chain.push(next);
        current = next;
    }
    Ok(chain)
}

/// Orden total de finalización: todo delegate precede a sus dependientes.
pub(super) fn build_order<R>(definitions: &[PipelineDefinition<R>],
                             index: &HashMap<String, usize>)
                             -> Result<Vec<usize>, PipelineError> {
    let mut ordered = Vec::with_capacity(definitions.len());
    let mut placed = vec![false; definitions.len()];

    for i in 0..definitions.len() {
        let chain = delegate_chain(definitions, index, i)?;
        for &idx in chain.iter().rev() {
            if !placed[idx] {
                placed[idx] = true;
                ordered.push(idx);
            }
        }
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::PipelineDefinition;

    type Resp = Vec<String>;

    #[test]
    fn delegates_precede_dependents() {
        // a -> b -> c (c es base); se registran en orden inverso
        let defs: Vec<PipelineDefinition<Resp>> = vec![PipelineDefinition::new("a").delegate("b"),
                                                       PipelineDefinition::new("b").delegate("c"),
                                                       PipelineDefinition::new("c").hook("h")];
        let index = delegate_index(&defs);
        let order = build_order(&defs, &index).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn delegate_cycle_is_a_configuration_error() {
        let defs: Vec<PipelineDefinition<Resp>> = vec![PipelineDefinition::new("a").delegate("b"),
                                                       PipelineDefinition::new("b").delegate("a")];
        let index = delegate_index(&defs);
        let err = build_order(&defs, &index).unwrap_err();
        assert_eq!(err, PipelineError::DelegateCycle("a".to_string()));
    }

    #[test]
    fn unknown_delegate_is_reported_with_both_names() {
        let defs: Vec<PipelineDefinition<Resp>> = vec![PipelineDefinition::new("a").delegate("nope")];
        let index = delegate_index(&defs);
        let err = build_order(&defs, &index).unwrap_err();
        assert_eq!(err,
                   PipelineError::UnknownDelegate { pipeline: "a".to_string(),
                                                    delegate: "nope".to_string() });
    }
}
