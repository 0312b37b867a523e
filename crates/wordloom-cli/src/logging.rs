use stderrlog::{LogLevelNum, Timestamp};

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable timestamped logging.
    #[clap(long)]
    pub ts: bool,
}

impl LogArgs {
    /// Initialize stderr logging; the default level is info.
    pub fn setup_logging(&self) -> Result<(), Box<dyn std::error::Error>> {
        let level = match self.verbose {
            0 => LogLevelNum::Info,
            1 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(level)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}
