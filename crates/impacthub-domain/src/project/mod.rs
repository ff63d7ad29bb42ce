mod api;
mod query;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::shared::{CommentId, DomainError, ProjectId, UserId};

pub use api::ProjectApi;
pub use query::{ProjectQuery, ProjectSort, ALL_AREAS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact_area: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub creator: Option<UserId>,
    #[serde(default)]
    pub supporters_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub is_supported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub user: User,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a project
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    title: String,
    impact_area: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl NewProject {
    pub fn new(
        title: impl Into<String>,
        impact_area: impl Into<String>,
        description: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        let impact_area = impact_area.into().trim().to_string();
        let description = description.into().trim().to_string();

        if title.is_empty() || impact_area.is_empty() || description.is_empty() {
            return Err(DomainError::Validation(
                "Title, impact area and description are required".to_string(),
            ));
        }

        // The backend rejects an empty URL, so a blank one is left out entirely
        let image_url = image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            title,
            impact_area,
            description,
            image_url,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    content: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// What happened when the user pressed "support"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportOutcome {
    Supported,
    AlreadySupported,
}

impl SupportOutcome {
    /// Interpret the backend's `status` string
    pub fn from_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("already supported") {
            SupportOutcome::AlreadySupported
        } else {
            SupportOutcome::Supported
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub total_supported: u64,
    #[serde(default)]
    pub impact_reach: u64,
}

/// Everything shown on the personal dashboard
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub my_projects: Vec<Project>,
    pub supported_projects: Vec<Project>,
    pub stats: UserStats,
}
