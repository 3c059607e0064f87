/// Result alias used across the crate; typed causes live in `TrustError`
/// and are recovered from the chain with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
