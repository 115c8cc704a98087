//! Escenarios de demostración del motor de pipelines sobre los adapters GIS.
//!
//! Cada función valida un aspecto observable end-to-end e imprime el
//! resultado; útil como smoke-test manual (`cargo run --bin main-demo`).

use geoflow_adapters::{default_definitions, demo_features, keys, GetFeaturesResponse, FEATURES_GET};
use geoflow_core::{PipelineElement, PipelineEngine};
use serde_json::json;

fn build_engine() -> PipelineEngine<GetFeaturesResponse> {
    PipelineEngine::build(default_definitions()).expect("stock definitions must finalize")
}

/// Composición: la variante "roads" hereda del default, recibe la extensión
/// tras el hook de carga y queda envuelta por el interceptor de seguridad.
fn run_composition_demo() {
    let engine = build_engine();
    let pipeline = engine.lookup(FEATURES_GET, Some("roads")).expect("roads variant registered");

    assert_eq!(pipeline.len(), 1, "el interceptor de seguridad envuelve toda la lista");
    let PipelineElement::Wrapped(security) = &pipeline.elements()[0] else {
        panic!("expected a composite top-level element");
    };
    assert_eq!(security.id(), "security");

    let ids: Vec<&str> = security.steps().iter().map(|e| e.id()).collect();
    println!("[composition] roads sequence: {ids:?}");
    assert_eq!(ids,
               vec!["load_features", "post_load", "tag_layer", "bbox_filter", "post_filter", "project_attributes"]);
}

/// Request autorizado: carga, etiquetado por la extensión, filtro por bbox.
fn run_authorized_demo() {
    let engine = build_engine();
    let mut ctx = engine.new_context();
    ctx.put(keys::LAYER_ID, json!("roads"));
    ctx.put(keys::LAYER_FEATURES, demo_features());
    ctx.put(keys::SECURITY_TOKEN, json!("demo-token"));
    ctx.put(keys::BBOX, json!([0.0, 0.0, 10.0, 10.0]));

    let mut response = GetFeaturesResponse::default();
    engine.execute_by_name(FEATURES_GET, Some("roads"), &mut ctx, &mut response)
          .expect("authorized request must succeed");

    println!("[authorized] {} feature(s) within bbox", response.features.len());
    assert_eq!(response.features.len(), 2);
    assert!(response.features.iter().all(|f| f.attributes.get("tag") == Some(&json!("roads"))));
}

/// Request sin token: el interceptor corta la ejecución, el response queda
/// vacío y aun así hay registro de auditoría.
fn run_denied_demo() {
    let engine = build_engine();
    let mut ctx = engine.new_context();
    ctx.put(keys::LAYER_ID, json!("roads"));
    ctx.put(keys::LAYER_FEATURES, demo_features());

    let mut response = GetFeaturesResponse::default();
    engine.execute_by_name(FEATURES_GET, Some("roads"), &mut ctx, &mut response)
          .expect("denial short-circuits, it is not an error");

    assert!(response.features.is_empty());
    assert!(ctx.is_finished());
    let audit = ctx.get(keys::SECURITY_AUDIT).expect("denied requests leave an audit trail");
    println!("[denied] audit: {audit}");
}

/// Scope sin variante propia: cae al default, sin la extensión de "roads".
fn run_fallback_demo() {
    let engine = build_engine();
    let mut ctx = engine.new_context();
    ctx.put(keys::LAYER_ID, json!("rivers"));
    ctx.put(keys::LAYER_FEATURES, demo_features());
    ctx.put(keys::SECURITY_TOKEN, json!("demo-token"));

    let mut response = GetFeaturesResponse::default();
    engine.execute_by_name(FEATURES_GET, Some("rivers"), &mut ctx, &mut response)
          .expect("fallback to the unscoped default");

    println!("[fallback] rivers served by the default pipeline, {} feature(s)",
             response.features.len());
    assert!(response.features.iter().all(|f| !f.attributes.contains_key("tag")));
}

fn main() {
    env_logger::init();
    run_composition_demo();
    run_authorized_demo();
    run_denied_demo();
    run_fallback_demo();
    println!("all demo scenarios passed");
}
