//! Steps de transformación sobre el response ya cargado.

use geoflow_core::pipeline_step;
use serde_json::Value;

use crate::keys;

pipeline_step! {
    // Conserva sólo los atributos pedidos en el request; sin lista, no-op.
    step AttributeProjectionStep<crate::features::GetFeaturesResponse> {
        id: "project_attributes",
        run(_self, ctx, response) {
            let keep: Vec<String> = ctx.optional_as(keys::ATTRIBUTE_FILTER, Vec::new())?;
            if keep.is_empty() {
                return Ok(());
            }
            for feature in &mut response.features {
                feature.attributes.retain(|k, _| keep.iter().any(|w| w == k));
            }
            Ok(())
        }
    }
}

pipeline_step! {
    // Extensión típica de una definición por capa: etiqueta cada feature.
    step TagStep<crate::features::GetFeaturesResponse> {
        id: "tag_layer",
        fields { label: String },
        run(self_, _ctx, response) {
            for feature in &mut response.features {
                feature.attributes.insert("tag".to_string(), Value::String(self_.label.clone()));
            }
            Ok(())
        }
    }
}
