//! geoflow-adapters: Steps GIS de ejemplo sobre el motor neutral.
//!
//! Este crate provee:
//! - Tipos de demo (`Feature`, `GetFeaturesResponse`) serializables.
//! - Steps concretos: carga de features desde el contexto, filtro por bbox y
//!   proyección de atributos.
//! - Un `SecurityInterceptor` que veta el cuerpo del pipeline cuando falta la
//!   credencial y deja igualmente un rastro de auditoría.
//! - Definiciones listas para registrar (`default_definitions`), con el
//!   default sin scope y una variante especializada por capa.
//!
//! Nota: el core sólo conoce `PipelineStep`/`PipelineInterceptor` y el
//! contexto clave/valor; toda la semántica GIS vive aquí.

pub mod features;
pub mod keys;
pub mod pipelines;
pub mod security;
pub mod steps;

pub use features::{Feature, GetFeaturesResponse};
pub use pipelines::{default_definitions, demo_features, FEATURES_GET, HOOK_POST_FILTER, HOOK_POST_LOAD};
pub use security::SecurityInterceptor;
