//! BboxFilterStep: descarta las features puntuales fuera del bbox.
//!
//! Sin bbox en el contexto el step es un no-op. Las geometrías no puntuales
//! se conservan (el recorte fino es responsabilidad de capas superiores).

use geoflow_core::pipeline_step;

use crate::keys;

pipeline_step! {
    step BboxFilterStep<crate::features::GetFeaturesResponse> {
        id: "bbox_filter",
        run(_self, ctx, response) {
            let bbox: Option<[f64; 4]> = ctx.optional_as(keys::BBOX, None)?;
            let Some([minx, miny, maxx, maxy]) = bbox else {
                return Ok(());
            };
            let before = response.features.len();
            response.features.retain(|f| match f.point_coordinates() {
                Some((x, y)) => x >= minx && x <= maxx && y >= miny && y <= maxy,
                None => true,
            });
            log::debug!("bbox filter kept {}/{before} feature(s)", response.features.len());
            Ok(())
        }
    }
}
