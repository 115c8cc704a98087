//! Macro utilitaria para reducir boilerplate al declarar steps.
//!
//! Exportada en la raíz del crate para poder usarla como:
//!   use geoflow_core::pipeline_step;

/// Declara un step de pipeline con su `id` y el cuerpo de `execute`.
///
/// Formas soportadas:
/// - `pipeline_step!(step Name<Resp> { id: "...", run(self_, ctx, resp) { ... } });`
///   struct unit, sin estado.
/// - Variante con `fields { ... }` para steps con estado y ctor posicional.
///
/// El bloque `run` debe evaluar a `Result<(), PipelineError>`.
#[macro_export]
macro_rules! pipeline_step {
    // ---------------- Step unit (sin fields) ----------------
    (
        step $name:ident<$resp:ty> {
            id: $id:expr,
            run($self_ident:ident, $ctx_ident:ident, $resp_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug, Default)]
        pub struct $name;
        impl $name {
            pub fn new() -> Self {
                Self
            }
        }
        impl $crate::step::PipelineStep<$resp> for $name {
            fn id(&self) -> &str {
                $id
            }
            fn execute(&self,
                       $ctx_ident: &mut $crate::model::PipelineContext,
                       $resp_ident: &mut $resp)
                       -> Result<(), $crate::errors::PipelineError> {
                let $self_ident = self;
                let _ = $self_ident;
                $body
            }
        }
    };

    // ---------------- Step con fields y ctor posicional ----------------
    (
        step $name:ident<$resp:ty> {
            id: $id:expr,
            fields { $($fname:ident : $fty:ty),+ $(,)? },
            run($self_ident:ident, $ctx_ident:ident, $resp_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name {
            $(pub $fname: $fty),+
        }
        impl $name {
            pub fn new($($fname: $fty),+) -> Self {
                Self { $($fname),+ }
            }
        }
        impl $crate::step::PipelineStep<$resp> for $name {
            fn id(&self) -> &str {
                $id
            }
            fn execute(&self,
                       $ctx_ident: &mut $crate::model::PipelineContext,
                       $resp_ident: &mut $resp)
                       -> Result<(), $crate::errors::PipelineError> {
                let $self_ident = self;
                let _ = $self_ident;
                $body
            }
        }
    };
}
