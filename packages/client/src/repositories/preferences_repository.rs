use async_trait::async_trait;
use reqwest::Method;

use crate::models::requests::DarkModeResponse;
use crate::repositories::errors::api_errors::ApiError;
use crate::repositories::http::ApiClient;

#[cfg(test)]
use mockall::automock;

pub struct HttpPreferencesRepository {
    api: ApiClient,
}

impl HttpPreferencesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn get_dark_mode(&self) -> Result<bool, ApiError>;
    async fn set_dark_mode(&self, dark_mode: bool) -> Result<(), ApiError>;
}

#[async_trait]
impl PreferencesRepository for HttpPreferencesRepository {
    async fn get_dark_mode(&self) -> Result<bool, ApiError> {
        let response = self
            .api
            .send(self.api.request(Method::GET, "/auth/dark"))
            .await?;
        let body: DarkModeResponse = ApiClient::read_json(response).await?;
        Ok(body.is_dark_mode)
    }

    async fn set_dark_mode(&self, dark_mode: bool) -> Result<(), ApiError> {
        self.api
            .send(
                self.api
                    .request(Method::PUT, "/auth/dark")
                    .query(&[("darkMode", dark_mode)]),
            )
            .await?;
        Ok(())
    }
}
