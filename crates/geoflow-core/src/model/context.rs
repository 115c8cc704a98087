//! Contexto de ejecución entregado a los steps.
//!
//! Rol en el flujo:
//! - Almacén mutable clave/valor (`String -> serde_json::Value`) creado por
//!   request y descartado al retornar; nunca se reutiliza entre requests.
//! - El flag `finished` es la señal cooperativa de corto-circuito: cualquier
//!   step puede fijarlo y el executor lo consulta antes de invocar cada step
//!   (top-level y anidado). No interrumpe un step en curso.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::PipelineError;

#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    values: HashMap<String, Value>,
    finished: bool,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lee una clave obligatoria. Error si no existe.
    pub fn get(&self, key: &str) -> Result<&Value, PipelineError> {
        self.values
            .get(key)
            .ok_or_else(|| PipelineError::MissingContextKey(key.to_string()))
    }

    /// Lee una clave obligatoria decodificándola al tipo pedido.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, PipelineError> {
        let value = self.get(key)?.clone();
        serde_json::from_value(value).map_err(|e| PipelineError::InvalidContextValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Lee una clave opcional (None si no existe).
    pub fn get_optional(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Lee una clave opcional decodificada, con valor por defecto si la clave
    /// no existe. Una clave presente pero indecodificable sigue siendo error.
    pub fn optional_as<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, PipelineError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| PipelineError::InvalidContextValue {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Inserta un valor y devuelve el anterior si lo había.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_missing_key_is_an_error() {
        let ctx = PipelineContext::new();
        assert_eq!(ctx.get("absent"),
                   Err(PipelineError::MissingContextKey("absent".to_string())));
    }

    #[test]
    fn put_returns_previous_value() {
        let mut ctx = PipelineContext::new();
        assert_eq!(ctx.put("k", json!(1)), None);
        assert_eq!(ctx.put("k", json!(2)), Some(json!(1)));
        assert_eq!(ctx.get("k").unwrap(), &json!(2));
    }

    #[test]
    fn optional_as_falls_back_to_default() {
        let mut ctx = PipelineContext::new();
        assert_eq!(ctx.optional_as("limit", 10u32).unwrap(), 10);
        ctx.put("limit", json!(25));
        assert_eq!(ctx.optional_as("limit", 10u32).unwrap(), 25);
    }

    #[test]
    fn typed_read_reports_incompatible_value() {
        let mut ctx = PipelineContext::new();
        ctx.put("limit", json!("not-a-number"));
        let err = ctx.get_as::<u32>("limit").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidContextValue { .. }),
                "expected InvalidContextValue, got {err:?}");
    }

    #[test]
    fn finished_flag_round_trip() {
        let mut ctx = PipelineContext::new();
        assert!(!ctx.is_finished());
        ctx.set_finished(true);
        assert!(ctx.is_finished());
    }
}
