//! Claves de contexto compartidas entre steps e interceptores.

/// Features crudas de la capa, sembradas por el caller.
pub const LAYER_FEATURES: &str = "layer.features";
/// Identificador de la capa consultada.
pub const LAYER_ID: &str = "layer.id";
/// Bounding box `[minx, miny, maxx, maxy]` del request (opcional).
pub const BBOX: &str = "query.bbox";
/// Atributos a conservar en la proyección (opcional).
pub const ATTRIBUTE_FILTER: &str = "query.attributes";
/// Credencial del request; su ausencia veta el cuerpo del pipeline.
pub const SECURITY_TOKEN: &str = "security.token";
/// Rastro de auditoría dejado por el interceptor de seguridad.
pub const SECURITY_AUDIT: &str = "security.audit";
