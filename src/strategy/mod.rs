//! Merge strategies: the capability that folds an enrichment reply into the
//! exchange being routed.

pub mod adapter;
pub mod bean;
pub mod replace;

pub use adapter::BeanMergeAdapter;
pub use bean::{MethodHandle, MethodTable, OperandKind, ParamType};
pub use replace::ReplaceStrategy;

use xroute_types::Exchange;

use crate::context::EnvironmentBindable;
use crate::error::MergeResult;

/// Combines a prior and a new message state into one.
///
/// Implementations may be shared across in-flight exchanges and are
/// responsible for the thread safety of their own state.
pub trait MergeStrategy: Send + Sync + 'static {
    /// Display name used in labels and diagnostics.
    fn name(&self) -> &str {
        "custom"
    }

    /// Merge `new` into `old`. `Ok(None)` leaves the routed exchange untouched.
    fn merge(&self, old: Option<Exchange>, new: Option<Exchange>) -> MergeResult<Option<Exchange>>;

    /// Environment binding view, for strategies that want the active environment.
    fn as_environment_bindable(&self) -> Option<&dyn EnvironmentBindable> {
        None
    }
}

/// Where a compiled step's merge strategy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySource {
    /// Supplied directly on the definition.
    Inline,
    /// Registered object that implements the capability natively.
    Registry,
    /// Registered plain object wrapped in a [`BeanMergeAdapter`].
    Adapter,
    /// No strategy configured; [`ReplaceStrategy`] is used.
    Default,
}
