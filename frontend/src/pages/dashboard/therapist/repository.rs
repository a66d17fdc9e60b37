use crate::api::{ApiClient, ApiError, TherapistRecord};
use std::rc::Rc;

#[derive(Clone)]
pub struct TherapistDashboardRepository {
    client: Rc<ApiClient>,
}

impl TherapistDashboardRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load_record(&self, user_id: String) -> Result<Option<TherapistRecord>, ApiError> {
        self.client.get_therapist_by_user(&user_id).await
    }
}
