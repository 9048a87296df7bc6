use std::fmt;

use crate::exchange::Exchange;

/// Load-balancing policy selecting one of several processing targets.
pub trait LoadBalancer: Send + Sync + 'static {
    /// Display name.
    fn name(&self) -> &str;

    /// Index of the target that should receive `exchange`, or `None` when no
    /// target can take it.
    fn choose(&self, exchange: &Exchange, candidates: usize) -> Option<usize>;
}

impl fmt::Debug for dyn LoadBalancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoadBalancer").field(&self.name()).finish()
    }
}
