use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend for prices; answer with `RequestDispatched`, then
    /// `ResponseReceived` or `SearchFailed` carrying the same generation.
    IssueSearch { generation: Generation, query: String },
}
