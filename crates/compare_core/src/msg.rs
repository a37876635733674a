#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the product name input.
    InputChanged(String),
    /// User submitted the current input.
    SearchSubmitted,
    /// The search request has left for the backend.
    RequestDispatched { generation: crate::Generation },
    /// Backend answered with a raw payload.
    ResponseReceived {
        generation: crate::Generation,
        payload: serde_json::Value,
    },
    /// Transport error or timeout for the request.
    SearchFailed {
        generation: crate::Generation,
        failure: crate::SearchFailure,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
