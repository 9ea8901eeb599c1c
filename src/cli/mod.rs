//! CLI module for the PMP App Platform
//!
//! - `serve`: run the HTTP API
//! - `token`: issue a bearer token for a user, for development

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// PMP App Platform - app lifecycle and team access control
#[derive(Parser)]
#[command(name = "pmp-app-platform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Print a signed bearer token for a user
    Token(token::TokenArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["pmp-app-platform", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_token() {
        let cli = Cli::try_parse_from([
            "pmp-app-platform",
            "token",
            "--email",
            "alice@example.com",
            "--hours",
            "2",
        ])
        .unwrap();

        match cli.command {
            Command::Token(args) => {
                assert_eq!(args.email, "alice@example.com");
                assert_eq!(args.hours, 2);
            }
            Command::Serve => panic!("expected token command"),
        }
    }

    #[test]
    fn test_token_requires_email() {
        assert!(Cli::try_parse_from(["pmp-app-platform", "token"]).is_err());
    }
}
