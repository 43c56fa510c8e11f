//! Handler implementations: inbound logging and the oracle flow.

mod flow_handler;
mod logging_handler;

pub use flow_handler::OracleFlowHandler;
pub use logging_handler::LoggingHandler;
