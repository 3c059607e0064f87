/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the use case is driven directly by
/// the CLI, and it reaches npm, the website, the policy file and the
/// terminal through these traits.
pub mod outbound;
