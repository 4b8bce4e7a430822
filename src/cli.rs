use clap::Parser;
use std::path::PathBuf;

/// Insert the fixture people into a local SQLite database.
#[derive(Debug, Parser)]
#[command(name = "people-seed", version, about)]
pub struct Cli {
    /// Path to a YAML config file (defaults to the OS config dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file to seed (created if absent)
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_is_accepted() {
        let cli = Cli::try_parse_from(["people-seed"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.database.is_none());
    }

    #[test]
    fn parses_short_and_long_flags() {
        let cli = Cli::try_parse_from(["people-seed", "-c", "seed.yaml", "--database", "dev.db"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("seed.yaml")));
        assert_eq!(cli.database, Some(PathBuf::from("dev.db")));
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["people-seed", "extra"]).is_err());
    }
}
