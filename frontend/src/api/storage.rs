use reqwest::{header, Method};

use super::{
    client::ApiClient,
    types::{ApiError, UploadedDocument},
};

pub const THERAPIST_DOCUMENTS_BUCKET: &str = "therapist-documents";

impl ApiClient {
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadedDocument, ApiError> {
        let config = self.resolved_config().await;
        let url = config.storage_url(&format!("/object/{}/{}", bucket, path));
        let builder = self
            .request(&config, Method::POST, &url)
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes);
        self.send_empty(builder).await?;
        Ok(UploadedDocument {
            path: path.to_string(),
            public_url: config.storage_url(&format!("/object/public/{}/{}", bucket, path)),
        })
    }
}
