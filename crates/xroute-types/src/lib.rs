pub mod endpoint;
pub mod exchange;
pub mod load_balancer;

pub use endpoint::{Endpoint, Producer, ProducerError};
pub use exchange::Exchange;
pub use load_balancer::LoadBalancer;
