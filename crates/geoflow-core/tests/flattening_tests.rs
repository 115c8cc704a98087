//! Aplanado de cadenas de delegates y cobertura de extensiones.

use geoflow_core::{PipelineContext, PipelineDefinition, PipelineEngine, PipelineError, PipelineStep};

type Resp = Vec<String>;

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

#[test]
fn three_level_chain_flattens_base_first_with_extensions_spliced() {
    // A -> B -> C (C es la base); cada nivel empalma en su hook
    let defs = vec![PipelineDefinition::new("c").step(RecordStep::new("c1"))
                                                .hook("h1")
                                                .step(RecordStep::new("c2"))
                                                .hook("h2"),
                    PipelineDefinition::new("b").delegate("c")
                                                .extension("h1", RecordStep::new("b1")),
                    PipelineDefinition::new("a").delegate("b")
                                                .extension("h2", RecordStep::new("a1"))];

    let engine = PipelineEngine::build(defs).expect("chain should finalize");
    let pipeline = engine.lookup("a", None).unwrap();

    let ids: Vec<&str> = pipeline.elements().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["c1", "h1", "b1", "c2", "h2", "a1"]);

    // Los hooks se ejecutan como steps (no-op) y el resto en orden
    let mut ctx = engine.new_context();
    let mut resp = Vec::new();
    engine.execute(&pipeline, &mut ctx, &mut resp).unwrap();
    assert_eq!(resp, vec!["c1", "b1", "c2", "a1"]);
}

#[test]
fn intermediate_definitions_of_the_chain_also_get_finalized() {
    let defs = vec![PipelineDefinition::new("c").step(RecordStep::new("c1")).hook("h1"),
                    PipelineDefinition::new("b").delegate("c")
                                                .extension("h1", RecordStep::new("b1")),
                    PipelineDefinition::new("a").delegate("b")];

    let engine = PipelineEngine::build(defs).unwrap();

    let b = engine.lookup("b", None).unwrap();
    let ids: Vec<&str> = b.elements().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["c1", "h1", "b1"]);

    // "a" no declara nada propio: hereda el aplanado de "b" completo
    let a = engine.lookup("a", None).unwrap();
    let ids: Vec<&str> = a.elements().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["c1", "h1", "b1"]);
}

#[test]
fn extension_for_absent_hook_fails_at_build_time() {
    let defs = vec![PipelineDefinition::new("base").step(RecordStep::new("s1")),
                    PipelineDefinition::new("child").delegate("base")
                                                    .extension("ghost_hook", RecordStep::new("e1"))];

    let err = PipelineEngine::build(defs).unwrap_err();
    assert_eq!(err,
               PipelineError::NoMatchingHook { pipeline: "child".to_string(),
                                               hook: "ghost_hook".to_string() },
               "a dropped plugin step must never be silent");
}

#[test]
fn a_hook_with_behavior_still_runs_and_accepts_extensions() {
    let defs = vec![PipelineDefinition::new("base").hook_step(RecordStep::new("h1"))
                                                   .step(RecordStep::new("s1")),
                    PipelineDefinition::new("child").delegate("base")
                                                    .extension("h1", RecordStep::new("e1"))];

    let engine = PipelineEngine::build(defs).unwrap();
    let pipeline = engine.lookup("child", None).unwrap();

    let mut ctx = engine.new_context();
    let mut resp = Vec::new();
    engine.execute(&pipeline, &mut ctx, &mut resp).unwrap();
    assert_eq!(resp, vec!["h1", "e1", "s1"], "the hook itself executes before the splice");
}

#[test]
fn delegate_cycle_fails_instead_of_hanging() {
    let defs: Vec<PipelineDefinition<Resp>> = vec![PipelineDefinition::new("a").delegate("b"),
                                                   PipelineDefinition::new("b").delegate("a")];
    let err = PipelineEngine::build(defs).unwrap_err();
    assert!(matches!(err, PipelineError::DelegateCycle(_)), "got {err:?}");
}
