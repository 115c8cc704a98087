//! LoadFeaturesStep: primer step del pipeline de get-features.
//!
//! Lee las features crudas sembradas en el contexto por el caller (en la
//! aplicación real vendrían de la capa vectorial) y puebla el response.

use geoflow_core::pipeline_step;

use crate::features::{Feature, GetFeaturesResponse};
use crate::keys;

pipeline_step! {
    step LoadFeaturesStep<crate::features::GetFeaturesResponse> {
        id: "load_features",
        run(_self, ctx, response) {
            let features: Vec<Feature> = ctx.get_as(keys::LAYER_FEATURES)?;
            let layer_id: String = ctx.optional_as(keys::LAYER_ID, "unknown".to_string())?;
            log::debug!("loaded {} feature(s) from layer '{layer_id}'", features.len());
            *response = GetFeaturesResponse { layer_id, features };
            Ok(())
        }
    }
}
