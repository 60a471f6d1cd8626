use clap::Subcommand;

/// Chat bot commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BotCommands {
    /// Poll the configured channel until interrupted.
    Run,
}
