//! Project endpoints.

use crate::HttpApiClient;
use crate::dto::{CreateProjectDto, ProjectDto};
use async_trait::async_trait;
use reqwest::Method;
use taskdeck_core::Result;
use taskdeck_core::project::{Project, ProjectApi};

#[async_trait]
impl ProjectApi for HttpApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Option<Vec<ProjectDto>> = self.get_json("/api/projects").await?;
        Ok(projects
            .unwrap_or_default()
            .into_iter()
            .map(Project::from)
            .collect())
    }

    async fn create_project(&self, name: &str) -> Result<Project> {
        let request = self
            .request(Method::POST, "/api/projects")?
            .json(&CreateProjectDto { name });
        let response = self.send(request).await?;
        Ok(Self::read_json::<ProjectDto>(response).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::client_for;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
    use serde_json::json;
    use taskdeck_core::project::ProjectApi;

    #[tokio::test]
    async fn test_list_projects() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/api/projects")).respond_with(
                json_encoded(json!([
                    { "id": "p1", "name": "Website" },
                    { "ID": "p2", "Name": "Mobile" }
                ])),
            ),
        );

        let client = client_for(&server, Some("abc"));
        let projects = client.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].name, "Mobile");
    }

    #[tokio::test]
    async fn test_null_project_list_is_empty() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/api/projects"))
                .respond_with(status_code(200).body("null")),
        );

        let client = client_for(&server, Some("abc"));
        assert!(client.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_project() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/api/projects"),
                request::body(json_decoded(eq(json!({ "name": "Website" })))),
            ])
            .respond_with(
                status_code(201)
                    .insert_header("Content-Type", "application/json")
                    .body(r#"{"id":"p1","name":"Website"}"#),
            ),
        );

        let client = client_for(&server, Some("abc"));
        let project = client.create_project("Website").await.unwrap();
        assert_eq!(project.id, "p1");
    }
}
