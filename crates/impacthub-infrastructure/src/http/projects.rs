use async_trait::async_trait;
use impacthub_domain::project::{
    Comment, NewComment, NewProject, Project, ProjectApi, SupportOutcome, UserStats,
};
use impacthub_domain::{DomainError, ProjectId};
use serde::Deserialize;

use super::{ApiClient, ApiRequest};

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
}

#[async_trait]
impl ProjectApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self.send_json(ApiRequest::get("/projects/")).await?)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, DomainError> {
        Ok(self
            .send_json(ApiRequest::get(format!("/projects/{}/", id)))
            .await?)
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, DomainError> {
        let request = ApiRequest::post("/projects/").json(project)?;
        Ok(self.send_json(request).await?)
    }

    async fn support_project(&self, id: ProjectId) -> Result<SupportOutcome, DomainError> {
        let request = ApiRequest::post(format!("/projects/{}/support/", id));
        let body: StatusResponse = self.send_json(request).await?;
        Ok(SupportOutcome::from_status(&body.status))
    }

    async fn list_comments(&self, id: ProjectId) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .send_json(ApiRequest::get(format!("/projects/{}/comments/", id)))
            .await?)
    }

    async fn add_comment(&self, id: ProjectId, comment: &NewComment) -> Result<Comment, DomainError> {
        let request = ApiRequest::post(format!("/projects/{}/comments/", id)).json(comment)?;
        Ok(self.send_json(request).await?)
    }

    async fn user_projects(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self.send_json(ApiRequest::get("/projects/user/")).await?)
    }

    async fn supported_projects(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self
            .send_json(ApiRequest::get("/projects/supported/"))
            .await?)
    }

    async fn user_stats(&self) -> Result<UserStats, DomainError> {
        Ok(self.send_json(ApiRequest::get("/user/stats/")).await?)
    }
}
