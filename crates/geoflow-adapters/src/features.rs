//! Tipos de demo para el pipeline de get-features.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Feature vectorial mínima: id + geometría GeoJSON-like + atributos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub geometry: Value,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Feature {
    pub fn point(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(),
               geometry: serde_json::json!({ "type": "Point", "coordinates": [x, y] }),
               attributes: Map::new() }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Coordenadas si la geometría es un punto.
    pub fn point_coordinates(&self) -> Option<(f64, f64)> {
        if self.geometry.get("type")?.as_str()? != "Point" {
            return None;
        }
        let coords = self.geometry.get("coordinates")?.as_array()?;
        Some((coords.first()?.as_f64()?, coords.get(1)?.as_f64()?))
    }
}

/// Response del pipeline de get-features; lo rellena la secuencia de steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetFeaturesResponse {
    pub layer_id: String,
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_coordinates_only_for_points() {
        let p = Feature::point("f1", 1.0, 2.0);
        assert_eq!(p.point_coordinates(), Some((1.0, 2.0)));

        let line = Feature { id: "l1".to_string(),
                             geometry: serde_json::json!({ "type": "LineString", "coordinates": [] }),
                             attributes: Map::new() };
        assert_eq!(line.point_coordinates(), None);
    }
}
