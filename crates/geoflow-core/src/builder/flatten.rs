//! Aplanado de cadenas de delegates y empalme de extensiones.
//!
//! El aplanado concatena las listas de steps de la cadena empezando por la
//! base, y luego empalma cada extensión inmediatamente después de su hook.
//! El escaneo de hooks va desde la cola para no invalidar los índices de los
//! hooks anteriores. Toda extensión declarada debe consumirse exactamente una
//! vez; un desajuste en el conteo es un error de configuración (protege
//! contra steps de plugin silenciosamente descartados).

use std::collections::HashSet;
use std::sync::Arc;

use crate::definition::PipelineDefinition;
use crate::errors::PipelineError;
use crate::step::PipelineElement;

pub(super) fn flatten_chain<R>(definitions: &[PipelineDefinition<R>],
                               chain: &[usize],
                               pipeline_name: &str)
                               -> Result<Vec<PipelineElement<R>>, PipelineError> {
    // Concatenar base-de-la-cadena primero.
    let mut elements: Vec<PipelineElement<R>> = chain.iter()
                                                     .rev()
                                                     .flat_map(|&idx| definitions[idx].elements().iter().cloned())
                                                     .collect();

    let declared: usize = chain.iter().map(|&idx| definitions[idx].extensions().len()).sum();
    if declared == 0 {
        return Ok(elements);
    }

    // Empalme desde la cola. Para cada hook se aplican primero las extensiones
    // de los ancestros y al final las de la definición más concreta, de modo
    // que la concreta queda pegada al hook (orden de override a favor de la
    // definición concreta).
    let mut consumed = 0usize;
    let mut pos = elements.len();
    while pos > 0 {
        pos -= 1;
        if !elements[pos].is_hook() {
            continue;
        }
        let hook_id = elements[pos].id().to_string();
        for &idx in chain.iter().rev() {
            for (target, step) in definitions[idx].extensions() {
                if target == &hook_id {
                    elements.insert(pos + 1, PipelineElement::Step(Arc::clone(step)));
                    consumed += 1;
                }
            }
        }
    }

    if consumed != declared {
        let hooks: HashSet<&str> = elements.iter()
                                           .filter(|e| e.is_hook())
                                           .map(|e| e.id())
                                           .collect();
        for &idx in chain {
            for (target, _) in definitions[idx].extensions() {
                if !hooks.contains(target.as_str()) {
                    return Err(PipelineError::NoMatchingHook { pipeline: pipeline_name.to_string(),
                                                               hook: target.clone() });
                }
            }
        }
        // Conteo desajustado sin hook ausente: hook duplicado en la cadena.
        return Err(PipelineError::Internal(format!(
            "extension count mismatch in pipeline '{pipeline_name}' ({consumed} consumed, {declared} declared)"
        )));
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::PipelineDefinition;
    use crate::model::PipelineContext;
    use crate::step::PipelineStep;

    type Resp = Vec<String>;

    // Step de prueba que registra su id en el response
    struct RecordStep {
        id: &'static str,
    }

    impl RecordStep {
        fn new(id: &'static str) -> Self {
            Self { id }
        }
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

    fn ids<R>(elements: &[PipelineElement<R>]) -> Vec<String> {
        elements.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn extension_lands_immediately_after_its_hook() {
        let defs: Vec<PipelineDefinition<Resp>> =
            vec![PipelineDefinition::new("base").hook("h").step(RecordStep::new("s1")),
                 PipelineDefinition::new("child").delegate("base")
                                                 .extension("h", RecordStep::new("e1"))];
        let flat = flatten_chain(&defs, &[1, 0], "child").unwrap();
        assert_eq!(ids(&flat), vec!["h", "e1", "s1"]);
    }

    #[test]
    fn concrete_extension_sits_closer_to_the_hook_than_inherited_ones() {
        let defs: Vec<PipelineDefinition<Resp>> =
            vec![PipelineDefinition::new("base").hook("h"),
                 PipelineDefinition::new("mid").delegate("base")
                                               .extension("h", RecordStep::new("e_mid")),
                 PipelineDefinition::new("child").delegate("mid")
                                                 .extension("h", RecordStep::new("e_child"))];
        let flat = flatten_chain(&defs, &[2, 1, 0], "child").unwrap();
        assert_eq!(ids(&flat), vec!["h", "e_child", "e_mid"]);
    }

    #[test]
    fn extension_without_hook_fails() {
        let defs: Vec<PipelineDefinition<Resp>> =
            vec![PipelineDefinition::new("base").step(RecordStep::new("s1")),
                 PipelineDefinition::new("child").delegate("base")
                                                 .extension("missing", RecordStep::new("e1"))];
        let err = flatten_chain(&defs, &[1, 0], "child").unwrap_err();
        assert_eq!(err,
                   PipelineError::NoMatchingHook { pipeline: "child".to_string(),
                                                   hook: "missing".to_string() });
    }
}
