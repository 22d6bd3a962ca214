use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;

use crate::error::{Result, TrackerError};
use crate::responses::ApiResponse;
use crate::types::{ProjectDetails, Story, StoryFields};

const API_BASE: &str = "https://www.pivotaltracker.com/services/v1";

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid pattern"));

/// IDs embedded in request paths must be digit strings.
fn ensure_id(kind: &'static str, value: &str) -> Result<()> {
    if ID_RE.is_match(value) {
        Ok(())
    } else {
        Err(TrackerError::InvalidId {
            kind,
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// One API call: method, path relative to the service base, optional XML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The network seam. Production uses [`HttpTransport`]; tests substitute a
/// recording mock.
pub trait Transport {
    async fn execute(&self, token: &str, request: &ApiRequest) -> Result<RawResponse>;
}

pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: API_BASE.to_string(),
        }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, token: &str, request: &ApiRequest) -> Result<RawResponse> {
        let url = format!("{}/{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };

        builder = builder.header("X-TrackerToken", token);
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/xml")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

pub struct TrackerClient<T: Transport = HttpTransport> {
    transport: T,
    token: String,
    verbose: bool,
}

impl TrackerClient {
    pub fn new(token: String) -> Self {
        Self::with_transport(HttpTransport::new(), token)
    }
}

impl<T: Transport> TrackerClient<T> {
    pub fn with_transport(transport: T, token: String) -> Self {
        Self {
            transport,
            token,
            verbose: false,
        }
    }

    /// Echo raw response bodies to stderr before parsing.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fetch project metadata via `GET projects/{id}`.
    pub async fn project_details(&self, project_id: &str) -> Result<ProjectDetails> {
        ensure_id("project", project_id)?;

        let response = self
            .call(ApiRequest {
                method: Method::Get,
                path: format!("projects/{project_id}"),
                body: None,
            })
            .await?;

        response.project.ok_or(TrackerError::EmptyResponse)
    }

    /// Create a story via `POST projects/{id}/stories`. Required fields are
    /// checked before the request body is built, so a bad call never reaches
    /// the transport.
    pub async fn add_story(&self, project_id: &str, fields: &StoryFields) -> Result<Story> {
        ensure_id("project", project_id)?;
        fields.validate()?;
        let body = fields.to_xml()?;

        let response = self
            .call(ApiRequest {
                method: Method::Post,
                path: format!("projects/{project_id}/stories"),
                body: Some(body),
            })
            .await?;

        response
            .stories
            .into_iter()
            .next()
            .ok_or(TrackerError::EmptyResponse)
    }

    /// Delete a story via `DELETE projects/{id}/stories/{sid}`. Both IDs are
    /// validated independently. Returns the service's confirmation message.
    pub async fn delete_story(&self, project_id: &str, story_id: &str) -> Result<String> {
        ensure_id("project", project_id)?;
        ensure_id("story", story_id)?;

        let response = self
            .call(ApiRequest {
                method: Method::Delete,
                path: format!("projects/{project_id}/stories/{story_id}"),
                body: None,
            })
            .await?;

        Ok(response
            .message
            .unwrap_or_else(|| format!("Story {story_id} deleted")))
    }

    /// One round-trip: execute, optionally echo the raw body, parse the
    /// envelope, normalize the success indicator. No retries.
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
        let raw = self.transport.execute(&self.token, &request).await?;

        if self.verbose {
            eprintln!("{}", raw.body);
        }

        let response: ApiResponse = match quick_xml::de::from_str(&raw.body) {
            Ok(response) => response,
            Err(_) if raw.status >= 400 => {
                return Err(TrackerError::ApiStatus {
                    status: raw.status,
                    message: raw.body.trim().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !response.is_success() {
            return Err(TrackerError::Api {
                errors: response.into_errors(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{StoryState, StoryType};

    struct MockTransport {
        calls: Mutex<Vec<ApiRequest>>,
        response: RawResponse,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response: RawResponse {
                    status,
                    body: body.to_string(),
                },
            }
        }

        fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for &MockTransport {
        async fn execute(&self, _token: &str, request: &ApiRequest) -> Result<RawResponse> {
            self.calls.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn client(mock: &MockTransport) -> TrackerClient<&MockTransport> {
        TrackerClient::with_transport(mock, "abc".to_string())
    }

    fn story_fields() -> StoryFields {
        let mut fields = StoryFields::default();
        fields.set("name", "Fix bug").unwrap();
        fields.set("requested_by", "Alice").unwrap();
        fields
    }

    const TWO_ERRORS: &str = r#"<response success="false"><errors><error>first</error><error>second</error></errors></response>"#;

    #[test]
    fn test_id_validator_accepts_digit_strings() {
        for id in ["0", "7", "42", "007", "123456789012345678901234567890"] {
            assert!(ensure_id("project", id).is_ok(), "{id:?} should be valid");
        }
    }

    #[test]
    fn test_id_validator_rejects_everything_else() {
        for id in ["", "-1", "4.2", "abc", " 42", "42 ", "4x2", "+42"] {
            assert!(ensure_id("project", id).is_err(), "{id:?} should be invalid");
        }
    }

    #[tokio::test]
    async fn test_project_details_success() {
        let mock = MockTransport::replying(
            200,
            r#"<response success="true"><project><name>Website</name><iteration_length>2</iteration_length><point_scale>0,1,2,3</point_scale><week_start_day>Monday</week_start_day></project></response>"#,
        );

        let project = client(&mock).project_details("42").await.unwrap();
        assert_eq!(project.name, "Website");
        assert_eq!(project.iteration_length, Some(2));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "projects/42");
        assert!(calls[0].body.is_none());
    }

    #[tokio::test]
    async fn test_project_details_rejects_non_numeric_id() {
        let mock = MockTransport::replying(200, "");

        let err = client(&mock).project_details("xx").await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidId { kind: "project", .. }
        ));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_project_details_collects_errors_in_order() {
        let mock = MockTransport::replying(200, TWO_ERRORS);

        let err = client(&mock).project_details("42").await.unwrap_err();
        match err {
            TrackerError::Api { errors } => assert_eq!(errors, ["first", "second"]),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_story_success_with_single_label() {
        let mock = MockTransport::replying(
            200,
            r#"<response success="true"><story><id>123</id><name>Fix bug</name><story_type>feature</story_type><current_state>unscheduled</current_state><requested_by>Alice</requested_by><labels><label>urgent</label></labels><url>https://www.pivotaltracker.com/story/show/123</url></story></response>"#,
        );

        let story = client(&mock).add_story("42", &story_fields()).await.unwrap();
        assert_eq!(story.id, 123);
        assert_eq!(story.name, "Fix bug");
        assert_eq!(story.story_type, Some(StoryType::Feature));
        assert_eq!(story.current_state, Some(StoryState::Unscheduled));
        assert_eq!(story.labels, ["urgent"]);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "projects/42/stories");
        let body = calls[0].body.as_deref().unwrap();
        assert!(body.contains("<name>Fix bug</name>"));
        assert!(body.contains("<requested_by>Alice</requested_by>"));
    }

    #[tokio::test]
    async fn test_add_story_missing_required_field_sends_nothing() {
        let mock = MockTransport::replying(200, "");

        let mut fields = StoryFields::default();
        fields.set("name", "Fix bug").unwrap();

        let err = client(&mock).add_story("42", &fields).await.unwrap_err();
        assert!(matches!(err, TrackerError::MissingField("requested_by")));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_story_unknown_field_sends_nothing() {
        let mock = MockTransport::replying(200, "");

        // An unknown key fails while the fields are being assembled, before
        // add_story is ever reachable.
        let mut fields = StoryFields::default();
        let err = fields.set("priority", "high").unwrap_err();
        assert!(matches!(err, TrackerError::UnknownStoryField(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_story_collects_errors_in_order() {
        let mock = MockTransport::replying(200, TWO_ERRORS);

        let err = client(&mock)
            .add_story("42", &story_fields())
            .await
            .unwrap_err();
        match err {
            TrackerError::Api { errors } => assert_eq!(errors, ["first", "second"]),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_story_end_to_end() {
        let mock = MockTransport::replying(
            200,
            "<response><success>true</success><message>Deleted</message></response>",
        );

        let message = client(&mock).delete_story("42", "7").await.unwrap();
        assert_eq!(message, "Deleted");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Delete);
        assert_eq!(calls[0].path, "projects/42/stories/7");
        assert!(calls[0].body.is_none());
    }

    #[tokio::test]
    async fn test_delete_story_validates_both_ids() {
        let mock = MockTransport::replying(200, "");

        let err = client(&mock).delete_story("xx", "7").await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidId { kind: "project", .. }
        ));

        let err = client(&mock).delete_story("42", "abc").await.unwrap_err();
        assert!(matches!(err, TrackerError::InvalidId { kind: "story", .. }));

        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_story_collects_errors_in_order() {
        let mock = MockTransport::replying(200, TWO_ERRORS);

        let err = client(&mock).delete_story("42", "7").await.unwrap_err();
        match err {
            TrackerError::Api { errors } => assert_eq!(errors, ["first", "second"]),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_status_surfaces_status() {
        let mock = MockTransport::replying(500, "Internal Server Error");

        let err = client(&mock).project_details("42").await.unwrap_err();
        assert!(matches!(err, TrackerError::ApiStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_success_without_payload_is_empty_response() {
        let mock = MockTransport::replying(200, r#"<response success="true"/>"#);

        let err = client(&mock).project_details("42").await.unwrap_err();
        assert!(matches!(err, TrackerError::EmptyResponse));
    }
}
