//! Identity endpoints.

use crate::HttpApiClient;
use crate::dto::{AuthResponseDto, ChangePasswordDto, IdentityDto};
use async_trait::async_trait;
use reqwest::Method;
use taskdeck_core::Result;
use taskdeck_core::session::{AccessToken, AuthApi, AuthUser, Credentials};

impl HttpApiClient {
    async fn exchange_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AccessToken> {
        let request = self.request(Method::POST, path)?.json(credentials);
        let response = self.send(request).await?;
        Self::read_json::<AuthResponseDto>(response).await?.into_domain()
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.exchange_credentials("/auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.exchange_credentials("/auth/register", credentials).await
    }

    async fn me(&self) -> Result<AuthUser> {
        self.get_json::<IdentityDto>("/auth/me").await?.into_domain()
    }

    async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let body = ChangePasswordDto {
            current_password,
            new_password,
        };
        let request = self.request(Method::POST, "/auth/change-password")?.json(&body);
        self.send(request).await?;
        Ok(())
    }
}
