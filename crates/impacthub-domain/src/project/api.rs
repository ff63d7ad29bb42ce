use async_trait::async_trait;

use super::{Comment, NewComment, NewProject, Project, SupportOutcome, UserStats};
use crate::shared::{DomainError, ProjectId};

/// Backend project, comment and dashboard endpoints
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, DomainError>;

    async fn get_project(&self, id: ProjectId) -> Result<Project, DomainError>;

    async fn create_project(&self, project: &NewProject) -> Result<Project, DomainError>;

    async fn support_project(&self, id: ProjectId) -> Result<SupportOutcome, DomainError>;

    async fn list_comments(&self, id: ProjectId) -> Result<Vec<Comment>, DomainError>;

    async fn add_comment(&self, id: ProjectId, comment: &NewComment) -> Result<Comment, DomainError>;

    async fn user_projects(&self) -> Result<Vec<Project>, DomainError>;

    async fn supported_projects(&self) -> Result<Vec<Project>, DomainError>;

    async fn user_stats(&self) -> Result<UserStats, DomainError>;
}
