use std::fmt;
use std::sync::Arc;

use xroute_types::{Exchange, Producer};

use crate::error::ProcessError;
use crate::strategy::{MergeStrategy, StrategySource};

/// Enriches each exchange with the reply of a secondary resource.
///
/// The unit owns its producer; the strategy may be shared with the registry.
pub struct Enricher {
    producer: Box<dyn Producer>,
    strategy: Arc<dyn MergeStrategy>,
    strategy_source: StrategySource,
    aggregate_on_failure: bool,
}

impl Enricher {
    pub fn new(
        producer: Box<dyn Producer>,
        strategy: Arc<dyn MergeStrategy>,
        strategy_source: StrategySource,
    ) -> Self {
        Self {
            producer,
            strategy,
            strategy_source,
            aggregate_on_failure: false,
        }
    }

    pub fn with_aggregate_on_failure(mut self, aggregate: bool) -> Self {
        self.aggregate_on_failure = aggregate;
        self
    }

    pub fn endpoint_uri(&self) -> &str {
        self.producer.endpoint_uri()
    }

    pub fn strategy(&self) -> &Arc<dyn MergeStrategy> {
        &self.strategy
    }

    pub fn strategy_source(&self) -> StrategySource {
        self.strategy_source
    }

    pub fn uses_default_strategy(&self) -> bool {
        self.strategy_source == StrategySource::Default
    }

    pub fn aggregate_on_failure(&self) -> bool {
        self.aggregate_on_failure
    }

    /// Send a copy of `exchange` to the resource and merge the reply back.
    ///
    /// When the resource fails, the failure is returned unless
    /// `aggregate_on_failure` is set, in which case the strategy is asked to
    /// merge with a missing reply. A strategy returning nothing leaves the
    /// exchange unchanged.
    pub async fn process(&self, exchange: Exchange) -> Result<Exchange, ProcessError> {
        let reply = match self.producer.process(exchange.clone()).await {
            Ok(reply) => Some(reply),
            Err(e) if self.aggregate_on_failure => {
                tracing::warn!(
                    endpoint = self.endpoint_uri(),
                    error = %e,
                    strategy = self.strategy.name(),
                    "enrichment failed, aggregating without reply"
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        let merged = self.strategy.merge(Some(exchange.clone()), reply)?;
        Ok(merged.unwrap_or(exchange))
    }
}

impl fmt::Debug for Enricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enricher")
            .field("endpoint", &self.endpoint_uri())
            .field("strategy", &self.strategy.name())
            .field("strategy_source", &self.strategy_source)
            .field("aggregate_on_failure", &self.aggregate_on_failure)
            .finish()
    }
}
