/// Classification for retry policy.
///
/// Used by [`RetryPolicy`](crate::RetryPolicy) to decide whether a failed
/// request is worth sending again.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the request is invalid or unauthorized |
/// | `WithBackoff` | Yes, after an exponentially growing delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad credentials, malformed response, or client error.
    Never,

    /// Retry with exponential backoff.
    ///
    /// Used for transient errors like rate limiting (429), server errors
    /// (5xx), timeouts and connection failures.
    WithBackoff,
}
