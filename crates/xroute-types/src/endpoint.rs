use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::exchange::Exchange;

/// Errors raised by an endpoint producer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProducerError {
    /// The producer could not be created for the endpoint.
    #[error("cannot create producer for {uri}: {message}")]
    Create { uri: String, message: String },
    /// The remote resource failed to answer.
    #[error("{uri} failed: {message}")]
    Failed { uri: String, message: String },
}

/// Outbound side of an endpoint.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Target URI of this producer.
    fn endpoint_uri(&self) -> &str;

    /// Send an exchange and return the reply.
    async fn process(&self, exchange: Exchange) -> Result<Exchange, ProducerError>;
}

/// Addressable resource a route step talks to.
pub trait Endpoint: Send + Sync + 'static {
    fn uri(&self) -> &str;

    fn create_producer(&self) -> Result<Box<dyn Producer>, ProducerError>;
}

impl fmt::Debug for dyn Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Producer").field(&self.endpoint_uri()).finish()
    }
}

impl fmt::Debug for dyn Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.uri()).finish()
    }
}
