use reqwest::Method;
use serde_json::{Map, Value};

use super::{
    client::{filter_eq, ApiClient},
    types::{ApiError, CompleteOnboardingRequest, SaveDraftRequest, TherapistRecord},
};

impl ApiClient {
    pub async fn get_therapist_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<TherapistRecord>, ApiError> {
        let config = self.resolved_config().await;
        let url = format!(
            "{}?user_id={}&select=*",
            config.rest_url("/therapists"),
            filter_eq(user_id)
        );
        let rows: Vec<TherapistRecord> = self
            .send_json(self.request(&config, Method::GET, &url))
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn save_therapist_draft(
        &self,
        step: u8,
        data: Map<String, Value>,
    ) -> Result<(), ApiError> {
        self.rpc("save_therapist_draft", &SaveDraftRequest { step, data })
            .await
    }

    pub async fn complete_therapist_onboarding(
        &self,
        data: Map<String, Value>,
    ) -> Result<(), ApiError> {
        self.rpc(
            "complete_therapist_onboarding",
            &CompleteOnboardingRequest { data },
        )
        .await
    }

    async fn rpc<T: serde::Serialize>(&self, name: &str, args: &T) -> Result<(), ApiError> {
        let config = self.resolved_config().await;
        let builder = self
            .request(&config, Method::POST, &config.rest_url(&format!("/rpc/{}", name)))
            .json(args);
        self.send_empty(builder).await
    }
}
