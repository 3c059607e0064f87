/// Filesystem adapters for the policy file
mod policy_file;

pub use policy_file::{JsonPolicyFile, POLICY_FILE_NAME};
