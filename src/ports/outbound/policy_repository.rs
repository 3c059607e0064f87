use crate::shared::Result;
use crate::trust_assessment::domain::Policy;

/// PolicyRepository port for the assessment policy
///
/// The policy is loaded once at the start of a run and never written back,
/// except for the first-run creation of the default policy.
pub trait PolicyRepository {
    /// Loads the policy, persisting the default policy first if none exists
    ///
    /// # Errors
    /// Returns an error if an existing policy cannot be read or parsed, or
    /// the default policy cannot be written
    fn load(&self) -> Result<Policy>;
}
