//! Definiciones de pipeline listas para registrar en el motor.
//!
//! El default sin scope cubre cualquier capa; la variante para "roads"
//! delega en él y se extiende tras el hook de carga.

use geoflow_core::PipelineDefinition;
use serde_json::json;

use crate::features::{Feature, GetFeaturesResponse};
use crate::security::SecurityInterceptor;
use crate::steps::{AttributeProjectionStep, BboxFilterStep, LoadFeaturesStep, TagStep};

/// Nombre de la operación de consulta de features.
pub const FEATURES_GET: &str = "features.get";

/// Hook tras la carga de features, antes de cualquier filtrado.
pub const HOOK_POST_LOAD: &str = "post_load";

/// Hook tras el filtrado espacial, antes de la proyección de atributos.
pub const HOOK_POST_FILTER: &str = "post_filter";

/// Definiciones de serie: default sin scope + especialización para "roads".
pub fn default_definitions() -> Vec<PipelineDefinition<GetFeaturesResponse>> {
    let base = PipelineDefinition::new(FEATURES_GET).step(LoadFeaturesStep::new())
                                                    .hook(HOOK_POST_LOAD)
                                                    .step(BboxFilterStep::new())
                                                    .hook(HOOK_POST_FILTER)
                                                    .step(AttributeProjectionStep::new())
                                                    .interceptor(SecurityInterceptor::new());

    let roads = PipelineDefinition::scoped(FEATURES_GET, "roads")
        .delegate(FEATURES_GET)
        .extension(HOOK_POST_LOAD, TagStep::new("roads".to_string()));

    vec![base, roads]
}

/// Juego de features de demo para sembrar el contexto.
pub fn demo_features() -> serde_json::Value {
    json!([Feature::point("r1", 1.0, 1.0).with_attribute("name", json!("Main St"))
                                         .with_attribute("lanes", json!(2)),
           Feature::point("r2", 5.0, 5.0).with_attribute("name", json!("Ring Rd"))
                                         .with_attribute("lanes", json!(4)),
           Feature::point("r3", 40.0, 40.0).with_attribute("name", json!("Far Ave"))
                                           .with_attribute("lanes", json!(1))])
}
