use clap::Subcommand;

/// Database maintenance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations.
    Migrate,
    /// Show applied and pending migrations.
    Status,
}
