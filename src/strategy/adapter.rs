//! Grants the merge capability to a plain registered object.

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use xroute_types::Exchange;

use super::bean::{MethodHandle, MethodTable, OperandKind};
use super::MergeStrategy;
use crate::context::EnvironmentBindable;
use crate::error::{MergeError, MergeResult};
use crate::registry::Component;

/// Merge strategy that forwards to a named method of a registered object.
///
/// The method table is captured when the adapter is built, but the method is
/// only resolved on the first merge: a missing or incompatible method is an
/// [`MergeError::AdaptationError`] on the message path, never at compile time.
/// The overload picked for a given pair of operand kinds is memoized.
///
/// Exchange bodies are passed as the method operands; the return value
/// becomes the body of the merged exchange.
pub struct BeanMergeAdapter {
    type_name: &'static str,
    display_name: String,
    methods: Arc<MethodTable>,
    method_name: Option<String>,
    bindable: Option<Arc<dyn EnvironmentBindable>>,
    allow_null_old: bool,
    allow_null_new: bool,
    resolved: DashMap<(OperandKind, OperandKind), MethodHandle>,
}

impl BeanMergeAdapter {
    /// Wrap `target`. Without a method name, the object's single two-operand
    /// method is used.
    pub fn new(target: &Component, method_name: Option<&str>) -> Self {
        let method_name = method_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let display_name = match &method_name {
            Some(method) => format!("bean:{}#{}", target.type_name(), method),
            None => format!("bean:{}", target.type_name()),
        };
        Self {
            type_name: target.type_name(),
            display_name,
            methods: target.methods(),
            method_name,
            bindable: target.as_environment_bindable(),
            allow_null_old: false,
            allow_null_new: false,
            resolved: DashMap::new(),
        }
    }

    /// Set both null-allowance flags.
    pub fn with_allow_null(self, allow: bool) -> Self {
        self.with_allow_null_old(allow).with_allow_null_new(allow)
    }

    pub fn with_allow_null_old(mut self, allow: bool) -> Self {
        self.allow_null_old = allow;
        self
    }

    pub fn with_allow_null_new(mut self, allow: bool) -> Self {
        self.allow_null_new = allow;
        self
    }

    pub fn allow_null_old(&self) -> bool {
        self.allow_null_old
    }

    pub fn allow_null_new(&self) -> bool {
        self.allow_null_new
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    fn target_method_name(&self) -> MergeResult<&str> {
        if let Some(name) = &self.method_name {
            return Ok(name);
        }
        match self.methods.method_names().as_slice() {
            [single] => Ok(*single),
            [] => Err(MergeError::AdaptationError(format!(
                "{} exposes no methods to merge with",
                self.type_name
            ))),
            several => Err(MergeError::AdaptationError(format!(
                "{} exposes several methods ({}); a method name is required",
                self.type_name,
                several.join(", ")
            ))),
        }
    }

    fn resolve_method(&self, old: Option<&Value>, new: Option<&Value>) -> MergeResult<MethodHandle> {
        let key = (OperandKind::of(old), OperandKind::of(new));
        if let Some(handle) = self.resolved.get(&key) {
            return Ok(handle.clone());
        }

        let name = self.target_method_name()?;
        let mut overloads = self.methods.overloads(name).peekable();
        if overloads.peek().is_none() {
            return Err(MergeError::AdaptationError(format!(
                "method '{}' not found on {}",
                name, self.type_name
            )));
        }
        let handle = overloads
            .find(|handle| handle.accepts(old, new))
            .cloned()
            .ok_or_else(|| {
                MergeError::AdaptationError(format!(
                    "method '{}' on {} does not accept operands ({}, {})",
                    name, self.type_name, key.0, key.1
                ))
            })?;
        tracing::debug!(
            target_type = self.type_name,
            method = handle.name(),
            old = %key.0,
            new = %key.1,
            "resolved merge method"
        );
        self.resolved.insert(key, handle.clone());
        Ok(handle)
    }
}

impl MergeStrategy for BeanMergeAdapter {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn merge(&self, old: Option<Exchange>, new: Option<Exchange>) -> MergeResult<Option<Exchange>> {
        if old.is_none() && !self.allow_null_old {
            return Err(MergeError::PreconditionViolation(format!(
                "{} invoked with missing prior state while nulls are disallowed",
                self.display_name
            )));
        }
        if new.is_none() && !self.allow_null_new {
            return Err(MergeError::PreconditionViolation(format!(
                "{} invoked with missing new state while nulls are disallowed",
                self.display_name
            )));
        }

        let old_body = old.as_ref().map(|ex| ex.body.clone());
        let new_body = new.as_ref().map(|ex| ex.body.clone());
        let handle = self.resolve_method(old_body.as_ref(), new_body.as_ref())?;
        let body = handle
            .invoke(old_body, new_body)
            .map_err(|e| MergeError::StrategyFailed(format!("{}: {}", self.display_name, e)))?;

        let merged = match (old, new) {
            (Some(old), _) => old.with_body(body),
            (None, Some(new)) => new.with_body(body),
            (None, None) => Exchange::new(body),
        };
        Ok(Some(merged))
    }

    fn as_environment_bindable(&self) -> Option<&dyn EnvironmentBindable> {
        self.bindable.as_deref()
    }
}
