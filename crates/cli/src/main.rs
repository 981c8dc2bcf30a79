use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Book and editorial catalogue service
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Apply schema statements to the configured database and exit
    Migrate,
    /// Print the resolved settings as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            bookshelf_telemetry::init(&settings.telemetry);
            bookshelf_app::server::serve(settings).await
        }
        Command::Migrate => {
            bookshelf_telemetry::init(&settings.telemetry);
            bookshelf_app::server::migrate(&settings).await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["bookshelf"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["bookshelf", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }
}
