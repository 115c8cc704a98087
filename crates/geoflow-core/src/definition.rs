//! Definición cruda de pipeline, tal como la suministra la aplicación.
//!
//! Una definición declara o bien una lista explícita de elementos, o bien un
//! `delegate` (herencia) hacia otra definición, más opcionalmente
//! `extensions` (hook-id -> step a empalmar) e `interceptors`. El builder la
//! convierte en un `FinalizedPipeline` inmutable; después de eso la
//! definición cruda no participa más.

use std::sync::Arc;

use crate::step::{PipelineElement, PipelineHook, PipelineInterceptor, PipelineStep};

pub struct PipelineDefinition<R> {
    name: String,
    scope: Option<String>,
    elements: Vec<PipelineElement<R>>,
    delegate: Option<String>,
    extensions: Vec<(String, Arc<dyn PipelineStep<R>>)>,
    interceptors: Vec<Arc<dyn PipelineInterceptor<R>>>,
}

impl<R> PipelineDefinition<R> {
    /// Definición sin scope (default compartido para el nombre dado).
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               scope: None,
               elements: Vec::new(),
               delegate: None,
               extensions: Vec::new(),
               interceptors: Vec::new() }
    }

    /// Definición especializada para un scope concreto (p. ej. una capa).
    pub fn scoped(name: impl Into<String>, scope: impl Into<String>) -> Self {
        let mut def = Self::new(name);
        def.scope = Some(scope.into());
        def
    }

    /// Añade un step plano al final de la lista explícita.
    pub fn step(mut self, step: impl PipelineStep<R> + 'static) -> Self {
        self.elements.push(PipelineElement::Step(Arc::new(step)));
        self
    }

    /// Añade un hook no-op con el id dado como punto de empalme.
    pub fn hook(mut self, id: impl Into<String>) -> Self {
        self.elements
            .push(PipelineElement::Hook(Arc::new(PipelineHook::new(id))));
        self
    }

    /// Añade un hook con comportamiento propio (sigue ejecutándose como step).
    pub fn hook_step(mut self, step: impl PipelineStep<R> + 'static) -> Self {
        self.elements.push(PipelineElement::Hook(Arc::new(step)));
        self
    }

    /// Declara que esta definición hereda su secuencia de otra, por nombre.
    /// El nombre se resuelve contra la definición sin scope de ese nombre.
    pub fn delegate(mut self, name: impl Into<String>) -> Self {
        self.delegate = Some(name.into());
        self
    }

    /// Declara una extensión: step a insertar inmediatamente después del hook
    /// con el id dado en la secuencia aplanada (self + delegates).
    pub fn extension(mut self, hook_id: impl Into<String>, step: impl PipelineStep<R> + 'static) -> Self {
        self.extensions.push((hook_id.into(), Arc::new(step)));
        self
    }

    /// Declara un interceptor transversal sobre un sub-rango de steps.
    pub fn interceptor(mut self, interceptor: impl PipelineInterceptor<R> + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub(crate) fn elements(&self) -> &[PipelineElement<R>] {
        &self.elements
    }

    pub(crate) fn delegate_name(&self) -> Option<&str> {
        self.delegate.as_deref()
    }

    pub(crate) fn extensions(&self) -> &[(String, Arc<dyn PipelineStep<R>>)] {
        &self.extensions
    }

    pub(crate) fn interceptors(&self) -> &[Arc<dyn PipelineInterceptor<R>>] {
        &self.interceptors
    }

    pub(crate) fn has_explicit_steps(&self) -> bool {
        !self.elements.is_empty()
    }
}
