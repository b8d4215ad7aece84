//! Project and label endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    http::{ApiRequest, Method, RequestBody},
    types::{DeleteConfirmation, Label, LabelId, Project, ProjectId},
};
use serde::Serialize;

/// Project API resource.
///
/// Lists and creates projects, and manages the labels that belong to them.
#[derive(Clone, Debug)]
pub struct Projects {
    client: Client,
}

impl Projects {
    /// Create a new Projects resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all projects (`GET /project/list`).
    pub async fn list(&self) -> Result<Vec<Project>> {
        tracing::debug!("listing projects");
        self.client()
            .execute(ApiRequest::new(Method::GET, "/project/list"))
            .await?
            .json()
    }

    /// Create a project (`POST /project/create`).
    ///
    /// `body` is usually a [`ProjectCreate`](crate::types::ProjectCreate), but any
    /// serializable value is forwarded as-is.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use panolabel::{Client, ProjectCreate};
    /// # async fn example(client: Client) -> panolabel::Result<()> {
    /// let project = client
    ///     .projects()
    ///     .create(&ProjectCreate::new("Warehouse").description("level 2 scans"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<B>(&self, body: &B) -> Result<Project>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("creating project");
        let request = ApiRequest::new(Method::POST, "/project/create").body(RequestBody::json(body)?);
        self.client().execute(request).await?.json()
    }

    /// List the labels of a project (`GET /project/{project_id}/labels`).
    pub async fn labels(&self, project_id: ProjectId) -> Result<Vec<Label>> {
        tracing::debug!(project_id, "listing labels");
        self.client()
            .execute(ApiRequest::new(Method::GET, labels_path(project_id)))
            .await?
            .json()
    }

    /// Create a label in a project (`POST /project/{project_id}/labels`).
    pub async fn create_label<B>(&self, project_id: ProjectId, body: &B) -> Result<Label>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(project_id, "creating label");
        let request =
            ApiRequest::new(Method::POST, labels_path(project_id)).body(RequestBody::json(body)?);
        self.client().execute(request).await?.json()
    }

    /// Delete a label (`DELETE /project/labels/{label_id}`).
    ///
    /// Whether deleting an unknown label is an error is up to the backend.
    pub async fn delete_label(&self, label_id: LabelId) -> Result<DeleteConfirmation> {
        tracing::debug!(label_id, "deleting label");
        self.client()
            .execute(ApiRequest::new(Method::DELETE, label_path(label_id)))
            .await?
            .json_or_default()
    }
}

impl Resource for Projects {
    fn client(&self) -> &Client {
        &self.client
    }
}

pub(crate) fn labels_path(project_id: ProjectId) -> String {
    format!("/project/{}/labels", project_id)
}

pub(crate) fn label_path(label_id: LabelId) -> String {
    format!("/project/labels/{}", label_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(labels_path(7), "/project/7/labels");
        assert_eq!(label_path(99), "/project/labels/99");
    }

    #[test]
    fn test_projects_resource_creation() {
        let client = Client::new("http://localhost:8000/api/v1").unwrap();
        let projects = client.projects();
        assert_eq!(projects.client().base_url(), client.base_url());
    }
}
