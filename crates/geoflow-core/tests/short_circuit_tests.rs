//! Corto-circuito cooperativo vía el flag finished del contexto.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use geoflow_core::{ExecutionMode, PipelineContext, PipelineDefinition, PipelineEngine, PipelineError,
                   PipelineInterceptor, PipelineStep};

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

struct FinishStep {
    id: &'static str,
}

impl PipelineStep<Resp> for FinishStep {
    fn id(&self) -> &str {
        self.id
    }
    fn execute(&self, context: &mut PipelineContext, response: &mut Resp) -> Result<(), PipelineError> {
        response.push(self.id.to_string());
        context.set_finished(true);
        Ok(())
    }
}

/// Interceptor con contadores de invocación para verificar el contrato
/// before/after bajo corto-circuito.
struct CountingInterceptor {
    id: &'static str,
    mode: ExecutionMode,
    before_calls: Arc<AtomicUsize>,
    after_calls: Arc<AtomicUsize>,
}

impl PipelineInterceptor<Resp> for CountingInterceptor {
    fn id(&self) -> &str {
        self.id
    }
    fn from_step_id(&self) -> Option<&str> {
        Some("n1")
    }
    fn to_step_id(&self) -> Option<&str> {
        Some("n3")
    }
    fn before_steps(&self, _ctx: &mut PipelineContext, _response: &mut Resp) -> Result<ExecutionMode, PipelineError> {
        self.before_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.mode)
    }
    fn after_steps(&self, _ctx: &mut PipelineContext, response: &mut Resp) -> Result<(), PipelineError> {
        self.after_calls.fetch_add(1, Ordering::SeqCst);
        response.push(format!("{}:after", self.id));
        Ok(())
    }
}

/// Pipeline: s1, [n1, stop, n3] envueltos, s2. "stop" fija finished.
fn build(mode: ExecutionMode, after: &Arc<AtomicUsize>, before: &Arc<AtomicUsize>) -> PipelineEngine<Resp> {
    let defs = vec![PipelineDefinition::new("p").step(RecordStep { id: "s1" })
                                                .step(RecordStep { id: "n1" })
                                                .step(FinishStep { id: "stop" })
                                                .step(RecordStep { id: "n3" })
                                                .step(RecordStep { id: "s2" })
                                                .interceptor(CountingInterceptor { id: "i1",
                                                                                   mode,
                                                                                   before_calls: Arc::clone(before),
                                                                                   after_calls: Arc::clone(after) })];
    PipelineEngine::build(defs).unwrap()
}

#[test]
fn finished_mid_nested_list_skips_rest_but_honors_execute_all() {
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let engine = build(ExecutionMode::ExecuteAll, &after, &before);

    let mut ctx = engine.new_context();
    let mut resp = Vec::new();
    engine.execute_by_name("p", None, &mut ctx, &mut resp).unwrap();

    // n3 (anidado) y s2 (top-level) quedan sin ejecutar; after_steps sí corre
    assert_eq!(resp, vec!["s1", "n1", "stop", "i1:after"]);
    assert_eq!(before.load(Ordering::SeqCst), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[test]
fn finished_mid_nested_list_with_steps_not_after_skips_the_after_hook() {
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let engine = build(ExecutionMode::ExecuteStepsNotAfter, &after, &before);

    let mut ctx = engine.new_context();
    let mut resp = Vec::new();
    engine.execute_by_name("p", None, &mut ctx, &mut resp).unwrap();

    assert_eq!(resp, vec!["s1", "n1", "stop"]);
    assert_eq!(after.load(Ordering::SeqCst), 0, "after_steps must not run in this mode");
}

#[test]
fn a_pending_wrapper_after_finished_never_runs_at_all() {
    // finished se fija ANTES del rango envuelto: ni before ni after corren
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let defs = vec![PipelineDefinition::new("p").step(FinishStep { id: "stop" })
                                                .step(RecordStep { id: "n1" })
                                                .step(RecordStep { id: "n3" })
                                                .interceptor(CountingInterceptor { id: "i1",
                                                                                   mode: ExecutionMode::ExecuteAll,
                                                                                   before_calls: Arc::clone(&before),
                                                                                   after_calls: Arc::clone(&after) })];
    let engine = PipelineEngine::build(defs).unwrap();

    let mut ctx = engine.new_context();
    let mut resp = Vec::new();
    engine.execute_by_name("p", None, &mut ctx, &mut resp).unwrap();

    assert_eq!(resp, vec!["stop"]);
    assert_eq!(before.load(Ordering::SeqCst), 0, "the hard stop skips the whole wrapper");
    assert_eq!(after.load(Ordering::SeqCst), 0);
}
