use clap::{Parser, Subcommand};

/// Assess the npm dependencies of a project for supply-chain risk
#[derive(Parser, Debug)]
#[command(name = "npm-trust")]
#[command(version)]
#[command(about = "Assess the npm dependencies of a project for supply-chain risk", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the dependencies of the project in the current directory
    ///
    /// The policy is read from npm-trust.config.json in the current
    /// directory and created with default thresholds when missing.
    Check {
        /// List the warnings of every flagged dependency, not only the summary
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
