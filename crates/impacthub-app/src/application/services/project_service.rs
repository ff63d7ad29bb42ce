use std::sync::Arc;

use futures::try_join;
use impacthub_domain::project::{
    Comment, Dashboard, NewComment, NewProject, Project, ProjectApi, ProjectQuery, SupportOutcome,
};
use impacthub_domain::{DomainError, ProjectId};
use tracing::info;

pub struct ProjectService {
    api: Arc<dyn ProjectApi>,
}

impl ProjectService {
    pub fn new(api: Arc<dyn ProjectApi>) -> Self {
        Self { api }
    }

    /// All projects, narrowed and ordered by `query` on the client
    pub async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>, DomainError> {
        let projects = self.api.list_projects().await?;
        Ok(query.apply(projects))
    }

    pub async fn get(&self, id: ProjectId) -> Result<Project, DomainError> {
        self.api.get_project(id).await
    }

    /// Project with its comment thread, fetched together
    pub async fn detail(&self, id: ProjectId) -> Result<(Project, Vec<Comment>), DomainError> {
        try_join!(self.api.get_project(id), self.api.list_comments(id))
    }

    pub async fn create(
        &self,
        title: &str,
        impact_area: &str,
        description: &str,
        image_url: Option<String>,
    ) -> Result<Project, DomainError> {
        let project = NewProject::new(title, impact_area, description, image_url)?;
        let created = self.api.create_project(&project).await?;
        info!(project_id = %created.id, "Project created");
        Ok(created)
    }

    /// Support a project, then reload it so the supporter count is current
    pub async fn support(&self, id: ProjectId) -> Result<(SupportOutcome, Project), DomainError> {
        let outcome = self.api.support_project(id).await?;
        let project = self.api.get_project(id).await?;
        Ok((outcome, project))
    }

    pub async fn comments(&self, id: ProjectId) -> Result<Vec<Comment>, DomainError> {
        self.api.list_comments(id).await
    }

    pub async fn add_comment(&self, id: ProjectId, content: &str) -> Result<Comment, DomainError> {
        let comment = NewComment::new(content)?;
        self.api.add_comment(id, &comment).await
    }

    pub async fn dashboard(&self) -> Result<Dashboard, DomainError> {
        let (my_projects, supported_projects, stats) = try_join!(
            self.api.user_projects(),
            self.api.supported_projects(),
            self.api.user_stats()
        )?;

        Ok(Dashboard {
            my_projects,
            supported_projects,
            stats,
        })
    }
}
