use super::draft::document_path;
use crate::api::{
    storage::THERAPIST_DOCUMENTS_BUCKET, ApiClient, ApiError, TherapistRecord, UploadedDocument,
};
use serde_json::{Map, Value};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub field_key: &'static str,
    pub kind: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct OnboardingRepository {
    client: Rc<ApiClient>,
}

impl OnboardingRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self, user_id: String) -> Result<Option<TherapistRecord>, ApiError> {
        self.client.get_therapist_by_user(&user_id).await
    }

    /// `step` is zero-based; the backend counts steps from one.
    pub async fn save_step(&self, step: usize, data: Map<String, Value>) -> Result<(), ApiError> {
        let number = u8::try_from(step + 1)
            .map_err(|_| ApiError::validation(format!("Invalid onboarding step {}", step)))?;
        self.client.save_therapist_draft(number, data).await
    }

    pub async fn upload_document(
        &self,
        user_id: &str,
        upload: DocumentUpload,
    ) -> Result<UploadedDocument, ApiError> {
        if upload.bytes.is_empty() {
            return Err(ApiError::validation("The selected file is empty"));
        }
        let id = uuid::Uuid::new_v4().to_string();
        let path = document_path(user_id, &upload.kind, &upload.file_name, &id);
        let content_type = if upload.content_type.is_empty() {
            "application/octet-stream"
        } else {
            upload.content_type.as_str()
        };
        self.client
            .upload_object(THERAPIST_DOCUMENTS_BUCKET, &path, upload.bytes, content_type)
            .await
    }

    pub async fn complete(&self, data: Map<String, Value>) -> Result<(), ApiError> {
        self.client.complete_therapist_onboarding(data).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::signed_in_client;
    use httpmock::prelude::*;
    use serde_json::json;

    fn repository(server: &MockServer) -> OnboardingRepository {
        OnboardingRepository::new_with_client(Rc::new(signed_in_client(&server.base_url(), "t1")))
    }

    #[tokio::test]
    async fn save_step_sends_one_based_step_number() {
        let server = MockServer::start_async().await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/rpc/save_therapist_draft")
                    .json_body(json!({ "step": 3, "data": { "license_number": "A-1" } }));
                then.status(204);
            })
            .await;

        let mut data = Map::new();
        data.insert("license_number".into(), json!("A-1"));
        repository(&server).save_step(2, data).await.unwrap();

        rpc.assert_async().await;
    }

    #[tokio::test]
    async fn upload_document_stores_under_user_folder() {
        let server = MockServer::start_async().await;
        let upload = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path_contains("/storage/v1/object/therapist-documents/t1/license_document-")
                    .header("content-type", "application/pdf")
                    .body("%PDF");
                then.status(200).json_body(json!({ "Key": "therapist-documents/t1/x.pdf" }));
            })
            .await;

        let document = repository(&server)
            .upload_document(
                "t1",
                DocumentUpload {
                    field_key: "license_document_url",
                    kind: "license_document".into(),
                    file_name: "license.pdf".into(),
                    content_type: "application/pdf".into(),
                    bytes: b"%PDF".to_vec(),
                },
            )
            .await
            .unwrap();

        upload.assert_async().await;
        assert!(document.path.starts_with("t1/license_document-"));
        assert!(document.path.ends_with(".pdf"));
        assert!(document
            .public_url
            .contains("/storage/v1/object/public/therapist-documents/t1/"));
    }

    #[tokio::test]
    async fn empty_file_is_rejected_without_request() {
        let server = MockServer::start_async().await;
        let err = repository(&server)
            .upload_document(
                "t1",
                DocumentUpload {
                    field_key: "resume_url",
                    kind: "resume".into(),
                    file_name: "cv.pdf".into(),
                    content_type: String::new(),
                    bytes: Vec::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn complete_posts_full_draft() {
        let server = MockServer::start_async().await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/rpc/complete_therapist_onboarding")
                    .json_body_partial(r#"{"data":{"first_name":"Grace"}}"#);
                then.status(204);
            })
            .await;
        let mut data = Map::new();
        data.insert("first_name".into(), json!("Grace"));
        repository(&server).complete(data).await.unwrap();
        rpc.assert_async().await;
    }
}
