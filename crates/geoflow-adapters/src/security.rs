//! Interceptor transversal de seguridad para get-features.
//!
//! Envuelve el rango completo del pipeline: sin token en el contexto corta
//! la ejecución (response vacío) y aun así deja su registro de auditoría vía
//! `after_steps` con el modo `ExecuteAfterOnly`.

use geoflow_core::{ExecutionMode, PipelineContext, PipelineError, PipelineInterceptor};
use serde_json::json;

use crate::features::GetFeaturesResponse;
use crate::keys;

#[derive(Debug, Clone, Default)]
pub struct SecurityInterceptor;

impl SecurityInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineInterceptor<GetFeaturesResponse> for SecurityInterceptor {
    fn id(&self) -> &str {
        "security"
    }

    fn before_steps(&self,
                    context: &mut PipelineContext,
                    response: &mut GetFeaturesResponse)
                    -> Result<ExecutionMode, PipelineError> {
        if context.contains(keys::SECURITY_TOKEN) {
            return Ok(ExecutionMode::ExecuteAll);
        }
        log::warn!("get-features request without token, short-circuiting");
        response.features.clear();
        context.set_finished(true);
        Ok(ExecutionMode::ExecuteAfterOnly)
    }

    fn after_steps(&self,
                   context: &mut PipelineContext,
                   response: &mut GetFeaturesResponse)
                   -> Result<(), PipelineError> {
        context.put(keys::SECURITY_AUDIT,
                    json!({
                        "authorized": context.contains(keys::SECURITY_TOKEN),
                        "returned": response.features.len(),
                    }));
        Ok(())
    }
}
