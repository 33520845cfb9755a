//! Registry providers
//!
//! A provider hands out fresh variable instances for one resolution context.
//! Instances are never shared between resolutions, so argument and error
//! state cannot leak from one command run to another.

use super::builtin::builtin_variables;
use super::context::ResolutionContext;
use super::VariableSet;

pub trait VariableProvider: Send + Sync {
    fn variables_for(&self, context: &ResolutionContext) -> VariableSet;
}

/// Provider of the built-in variables
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVariables;

impl VariableProvider for BuiltinVariables {
    fn variables_for(&self, context: &ResolutionContext) -> VariableSet {
        builtin_variables(context)
    }
}
