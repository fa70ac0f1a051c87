use reqwest::Method;

use moodtunes_types::api::{CreatedResponse, TextRequest};
use moodtunes_types::models::SavedItem;

use crate::comments::failed;
use crate::error::ServiceError;
use crate::http::CloudClient;

/// Cloud saved items of one user. The server only serves the token's owner.
#[derive(Clone)]
pub struct SavedItemsService {
    cloud: CloudClient,
}

impl SavedItemsService {
    pub fn new(cloud: CloudClient) -> Self {
        Self { cloud }
    }

    pub async fn load(&self, user_id: &str) -> Result<Vec<SavedItem>, ServiceError> {
        self.cloud
            .get_json(&items_path(user_id))
            .await
            .map_err(|e| failed("load saved items", e))
    }

    pub async fn add(&self, user_id: &str, text: &str) -> Result<String, ServiceError> {
        let created: CreatedResponse = self
            .cloud
            .post_json(&items_path(user_id), &TextRequest { text: text.to_string() })
            .await
            .map_err(|e| failed("add saved item", e))?;
        Ok(created.id)
    }

    pub async fn update(&self, user_id: &str, id: &str, text: &str) -> Result<(), ServiceError> {
        self.cloud
            .send(
                Method::PATCH,
                &item_path(user_id, id),
                Some(&TextRequest { text: text.to_string() }),
            )
            .await
            .map_err(|e| failed("update saved item", e))
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError> {
        self.cloud
            .delete(&item_path(user_id, id))
            .await
            .map_err(|e| failed("delete saved item", e))
    }

    pub async fn clear(&self, user_id: &str) -> Result<(), ServiceError> {
        self.cloud
            .delete(&items_path(user_id))
            .await
            .map_err(|e| failed("clear saved items", e))
    }
}

fn items_path(user_id: &str) -> String {
    format!("/users/{}/saved-items", user_id)
}

fn item_path(user_id: &str, id: &str) -> String {
    format!("/users/{}/saved-items/{}", user_id, id)
}
