use reqwest::Method;

use super::{
    client::{filter_eq, ApiClient},
    types::{ApiError, Profile},
};

impl ApiClient {
    /// `Ok(None)` when the row does not exist (or row-level security hides it).
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        let config = self.resolved_config().await;
        let url = format!(
            "{}?id={}&select=*",
            config.rest_url("/profiles"),
            filter_eq(user_id)
        );
        let rows: Vec<Profile> = self
            .send_json(self.request(&config, Method::GET, &url))
            .await?;
        Ok(rows.into_iter().next())
    }
}
