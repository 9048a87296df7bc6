use xroute_types::Exchange;

use super::MergeStrategy;
use crate::error::MergeResult;

/// Default strategy: the reply replaces the body and headers of the routed
/// exchange. The routed exchange keeps its id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceStrategy;

impl MergeStrategy for ReplaceStrategy {
    fn name(&self) -> &str {
        "replace"
    }

    fn merge(&self, old: Option<Exchange>, new: Option<Exchange>) -> MergeResult<Option<Exchange>> {
        Ok(match (old, new) {
            (Some(mut old), Some(new)) => {
                old.body = new.body;
                old.headers = new.headers;
                Some(old)
            }
            (None, new) => new,
            (old, None) => old,
        })
    }
}
