//! App request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::App;

/// Body of `POST /apps`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppBody {
    pub name: String,
    #[serde(default)]
    pub framework: String,
}

/// Body returned after a successful create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppResponse {
    pub status: String,
    pub repository_url: String,
}

impl CreateAppResponse {
    pub fn success(repository_url: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            repository_url: repository_url.into(),
        }
    }
}

/// App as returned by list and info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse {
    pub name: String,
    pub framework: String,
    pub teams: Vec<String>,
    pub machine: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&App> for AppResponse {
    fn from(app: &App) -> Self {
        Self {
            name: app.name().to_string(),
            framework: app.framework().to_string(),
            teams: app.teams().map(|team| team.to_string()).collect(),
            machine: app.machine().to_string(),
            created_at: app.created_at(),
            updated_at: app.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppName, TeamName};

    #[test]
    fn test_create_body_framework_defaults_to_empty() {
        let body: CreateAppBody = serde_json::from_str(r#"{"name":"blog"}"#).unwrap();

        assert_eq!(body.name, "blog");
        assert_eq!(body.framework, "");
    }

    #[test]
    fn test_app_response_from_app() {
        let app = App::new(
            AppName::new("blog").unwrap(),
            "ruby",
            [TeamName::new("ops").unwrap(), TeamName::new("admin").unwrap()],
            "blog/0",
        )
        .unwrap();

        let response = AppResponse::from(&app);

        assert_eq!(response.teams, vec!["admin", "ops"]);
        assert_eq!(response.machine, "blog/0");
        assert_eq!(response.framework, "ruby");
    }
}
