//! Handler chain result type.

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// The update was consumed; stop the chain.
    Stop,
    /// Nothing to do for this update; try next handler.
    Ignore,
}
