use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pub-advisor",
    about = "Warns about outdated bloc packages in a pubspec.yaml and offers migration guides",
    version,
    author
)]
pub struct Cli {
    /// Path to the Dart or Flutter project (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub path: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Package repository to query instead of pub.dev
    #[arg(long, env = "PUB_HOSTED_URL", value_name = "URL", global = true)]
    pub hosted_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check watched packages and prompt for each outdated one (default)
    Analyze {
        /// Apply "Update" to every outdated package without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Report outdated watched packages without prompting or editing pubspec.yaml
    Check,

    /// List watched packages with their declared constraint and latest version
    List,
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
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["pub-advisor"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.path, ".");
    }

    #[test]
    fn parses_analyze_with_yes() {
        let cli = Cli::try_parse_from(["pub-advisor", "analyze", "--yes", "-p", "app"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Analyze { yes: true })));
        assert_eq!(cli.path, "app");
    }

    #[test]
    fn accepts_hosted_url_flag() {
        let cli =
            Cli::try_parse_from(["pub-advisor", "--hosted-url", "http://localhost:8080", "check"])
                .unwrap();
        assert_eq!(cli.hosted_url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
