//! Command execution gateway
//!
//! Resolves an app the caller may act on to its backing unit and forwards a
//! command over the unit execution channel. Output is returned unmodified,
//! except for environment reads which go through the extractor.

use std::sync::Arc;

use tracing::info;

use crate::domain::app::{App, AppRepository};
use crate::domain::env::{extract_env, parse_variable_names};
use crate::domain::repository_directory::RepositoryLocator;
use crate::domain::team::TeamRepository;
use crate::domain::unit::UnitExecutor;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::app::AccessControl;

/// Checkout location of an app's code on its unit
const APP_DIRECTORY: &str = "/home/application/current";

#[derive(Debug)]
pub struct UnitGateway<A: AppRepository, T: TeamRepository> {
    access: AccessControl<A, T>,
    executor: Arc<dyn UnitExecutor>,
    locator: RepositoryLocator,
}

fn env_dump_command(app: &App) -> String {
    format!("cat $HOME/{}.env", app.name())
}

fn clone_or_pull_command(read_only_url: &str) -> String {
    format!(
        "if [ -d {dir}/.git ]; then cd {dir} && git pull; else git clone {url} {dir} --depth 1; fi",
        dir = APP_DIRECTORY,
        url = read_only_url
    )
}

impl<A: AppRepository, T: TeamRepository> UnitGateway<A, T> {
    pub fn new(
        access: AccessControl<A, T>,
        executor: Arc<dyn UnitExecutor>,
        locator: RepositoryLocator,
    ) -> Self {
        Self {
            access,
            executor,
            locator,
        }
    }

    /// Run `command` verbatim on the app's unit and return its raw output
    pub async fn run_command(
        &self,
        name: &str,
        requester: &User,
        command: &str,
    ) -> Result<Vec<u8>, DomainError> {
        if command.is_empty() {
            return Err(DomainError::bad_input("You must provide the command to run"));
        }

        let app = self.access.resolve(name, requester).await?;
        info!(app = %app.name(), user = %requester.email(), "Running command on unit");

        self.executor.command(&app.unit(), command).await
    }

    /// Read the requested variables from the app's environment file
    ///
    /// `names` is a whitespace-separated list. Only `NAME=VALUE` lines for
    /// those names are returned.
    pub async fn get_env(
        &self,
        name: &str,
        requester: &User,
        names: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        let variables = parse_variable_names(names);

        if variables.is_empty() {
            return Err(DomainError::bad_input(
                "You must provide the environment variables",
            ));
        }

        let app = self.access.resolve(name, requester).await?;
        let dump = self
            .executor
            .command(&app.unit(), &env_dump_command(&app))
            .await?;

        extract_env(variables.as_slice(), &dump)
    }

    /// Clone the app's repository onto its unit, or pull if already cloned
    pub async fn clone_repository(
        &self,
        name: &str,
        requester: &User,
    ) -> Result<Vec<u8>, DomainError> {
        let app = self.access.resolve(name, requester).await?;
        let command = clone_or_pull_command(&self.locator.read_only_url(app.name()));

        info!(app = %app.name(), "Updating repository on unit");

        self.executor.command(&app.unit(), &command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::app::{AppName, MockAppRepository};
    use crate::domain::team::{MockTeamRepository, Team, TeamName};
    use crate::domain::unit::MockUnitExecutor;
    use crate::domain::user::UserEmail;

    fn alice() -> User {
        User::new(UserEmail::new("alice@example.com").unwrap())
    }

    fn gateway(executor: MockUnitExecutor) -> UnitGateway<MockAppRepository, MockTeamRepository> {
        let mut apps = MockAppRepository::new();
        apps.expect_get().returning(|name| {
            Ok(Some(
                App::new(
                    name.clone(),
                    "python",
                    [TeamName::new("admin").unwrap()],
                    App::default_machine(name),
                )
                .unwrap(),
            ))
        });

        let mut teams = MockTeamRepository::new();
        teams.expect_find_by_member().returning(|email| {
            Ok(vec![Team::new(TeamName::new("admin").unwrap()).with_user(email.clone())])
        });

        UnitGateway::new(
            AccessControl::new(Arc::new(apps), Arc::new(teams)),
            Arc::new(executor),
            RepositoryLocator::new("git.example.com"),
        )
    }

    #[tokio::test]
    async fn test_run_command_forwards_verbatim() {
        let mut executor = MockUnitExecutor::new();
        executor
            .expect_command()
            .withf(|unit, command| unit.machine() == "blog/0" && command == "ls -la | wc -l")
            .times(1)
            .returning(|_, _| Ok(b"\x00raw\xffbytes".to_vec()));

        let output = gateway(executor)
            .run_command("blog", &alice(), "ls -la | wc -l")
            .await
            .unwrap();

        assert_eq!(output, b"\x00raw\xffbytes");
    }

    #[tokio::test]
    async fn test_run_empty_command_is_bad_input() {
        let mut executor = MockUnitExecutor::new();
        executor.expect_command().never();

        let result = gateway(executor).run_command("blog", &alice(), "").await;

        assert!(matches!(result, Err(DomainError::BadInput { .. })));
    }

    #[tokio::test]
    async fn test_run_whitespace_command_is_forwarded() {
        let mut executor = MockUnitExecutor::new();
        executor
            .expect_command()
            .withf(|_, command| command == "  \n")
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let output = gateway(executor).run_command("blog", &alice(), "  \n").await.unwrap();

        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_run_command_channel_failure_is_surfaced() {
        let mut executor = MockUnitExecutor::new();
        executor
            .expect_command()
            .times(1)
            .returning(|_, _| Err(DomainError::upstream_timeout("unit", "deadline exceeded")));

        let result = gateway(executor).run_command("blog", &alice(), "uptime").await;

        assert!(matches!(result, Err(DomainError::Upstream { timed_out: true, .. })));
    }

    #[tokio::test]
    async fn test_run_command_requires_access() {
        let mut executor = MockUnitExecutor::new();
        executor.expect_command().never();
        let mut apps = MockAppRepository::new();
        apps.expect_get().returning(|_| Ok(None));
        let gateway = UnitGateway::new(
            AccessControl::new(Arc::new(apps), Arc::new(MockTeamRepository::new())),
            Arc::new(executor),
            RepositoryLocator::new("git.example.com"),
        );

        let result = gateway.run_command("blog", &alice(), "uptime").await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_env_filters_dump() {
        let mut executor = MockUnitExecutor::new();
        executor
            .expect_command()
            .withf(|_, command| command == "cat $HOME/blog.env")
            .times(1)
            .returning(|_, _| {
                Ok(b"export DATABASE_HOST=db\nexport SECRET=x\nexport DATABASE_USER=root\n".to_vec())
            });

        let output = gateway(executor)
            .get_env("blog", &alice(), b"DATABASE_HOST DATABASE_USER")
            .await
            .unwrap();

        assert_eq!(output, b"DATABASE_HOST=db\nDATABASE_USER=root\n");
    }

    #[tokio::test]
    async fn test_get_env_without_names_is_bad_input() {
        let mut executor = MockUnitExecutor::new();
        executor.expect_command().never();

        let result = gateway(executor).get_env("blog", &alice(), b" \n\t").await;

        assert!(matches!(result, Err(DomainError::BadInput { .. })));
    }

    #[tokio::test]
    async fn test_clone_repository_uses_read_only_url() {
        let mut executor = MockUnitExecutor::new();
        executor
            .expect_command()
            .withf(|_, command| {
                command.contains("git clone git://git.example.com/blog.git")
                    && command.contains("git pull")
            })
            .times(1)
            .returning(|_, _| Ok(b"Cloning into 'current'...\n".to_vec()));

        let output = gateway(executor)
            .clone_repository("blog", &alice())
            .await
            .unwrap();

        assert_eq!(output, b"Cloning into 'current'...\n");
    }

    #[test]
    fn test_env_dump_command() {
        let name = AppName::new("blog").unwrap();
        let app = App::new(name, "", [TeamName::new("admin").unwrap()], "blog/0").unwrap();

        assert_eq!(env_dump_command(&app), "cat $HOME/blog.env");
    }
}
