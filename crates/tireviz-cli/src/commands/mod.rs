//! Command implementations for the tireviz CLI

pub mod record;
pub mod run;

use clap::Args;

/// Options shared by every command that drives a session.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Reset all tires at the start of this tick (repeatable)
    #[arg(long = "reset-at", value_name = "TICK")]
    pub reset_at: Vec<u64>,

    /// Print a snapshot every N ticks instead of only after the last one
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub every: Option<u64>,

    /// Pace ticks at the source frame rate
    #[arg(long)]
    pub realtime: bool,
}
