//! Repository location rules

use crate::domain::app::AppName;

/// Computes where an app's repository lives on the git host
#[derive(Debug, Clone)]
pub struct RepositoryLocator {
    git_host: String,
}

impl RepositoryLocator {
    pub fn new(git_host: impl Into<String>) -> Self {
        Self {
            git_host: git_host.into(),
        }
    }

    /// Read-write URL handed to app owners for pushing
    pub fn url(&self, app: &AppName) -> String {
        format!("git@{}:{}.git", self.git_host, app)
    }

    /// Read-only URL used by units to fetch code
    pub fn read_only_url(&self, app: &AppName) -> String {
        format!("git://{}/{}.git", self.git_host, app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let locator = RepositoryLocator::new("git.example.com");
        let app = AppName::new("blog").unwrap();

        assert_eq!(locator.url(&app), "git@git.example.com:blog.git");
        assert_eq!(locator.read_only_url(&app), "git://git.example.com/blog.git");
    }
}
