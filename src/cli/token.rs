//! Token command - issue a JWT signed with the configured secret

use clap::Args;

use crate::config::AppConfig;
use crate::domain::user::{User, UserEmail};
use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Email of the user the token identifies
    #[arg(long)]
    pub email: String,

    /// Hours until the token expires
    #[arg(long, default_value_t = 24)]
    pub hours: u64,
}

/// Print a token for `args.email`
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    println!("{}", issue_token(&config, &args)?);

    Ok(())
}

fn issue_token(config: &AppConfig, args: &TokenArgs) -> anyhow::Result<String> {
    let email = UserEmail::new(args.email.as_str())?;
    let service = JwtService::new(JwtConfig::new(config.auth.jwt_secret.clone(), args.hours));

    Ok(service.generate(&User::new(email))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_authenticates() {
        let config = AppConfig::default();
        let args = TokenArgs {
            email: "alice@example.com".to_string(),
            hours: 1,
        };

        let token = issue_token(&config, &args).unwrap();
        let service = JwtService::new(JwtConfig::new(config.auth.jwt_secret.clone(), 1));

        assert_eq!(
            service.authenticate(&token).unwrap().email().as_str(),
            "alice@example.com"
        );
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let args = TokenArgs {
            email: "not-an-email".to_string(),
            hours: 1,
        };

        assert!(issue_token(&AppConfig::default(), &args).is_err());
    }
}
