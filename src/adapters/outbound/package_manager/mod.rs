/// Package manager adapters for listing dependencies and querying the registry
mod npm_cli;

pub use npm_cli::NpmCli;

#[cfg(all(test, unix))]
pub(crate) use npm_cli::stalled_npm;
