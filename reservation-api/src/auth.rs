//! Cognito-backed signup and signin

use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, MessageActionType};
use aws_sdk_cognitoidentityprovider::Client;
use bootcamp_core::{Error, Result, SigninRequest, SignupRequest};
use tracing::info;

fn attribute(name: &str, value: &str) -> Result<AttributeType> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| Error::Internal(e.to_string()))
}

/// User-pool client for the reservation API
pub struct CognitoAuth {
    client: Client,
    user_pool_id: String,
    client_id: String,
}

impl CognitoAuth {
    pub fn new(client: Client, user_pool_id: String, client_id: String) -> Self {
        Self {
            client,
            user_pool_id,
            client_id,
        }
    }

    /// Create the user with a permanent password and a verified email,
    /// without sending any invitation mail
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<()> {
        let full_name = format!("{} {}", request.first_name, request.last_name);

        self.client
            .admin_create_user()
            .user_pool_id(&self.user_pool_id)
            .username(&request.email)
            .user_attributes(attribute("email", &request.email)?)
            .user_attributes(attribute("name", &full_name)?)
            .user_attributes(attribute("email_verified", "true")?)
            .message_action(MessageActionType::Suppress)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_username_exists_exception() {
                    Error::UserExists(request.email.clone())
                } else {
                    Error::AuthFailed(service_error.to_string())
                }
            })?;

        self.client
            .admin_set_user_password()
            .user_pool_id(&self.user_pool_id)
            .username(&request.email)
            .password(&request.password)
            .permanent(true)
            .send()
            .await
            .map_err(|e| Error::AuthFailed(e.into_service_error().to_string()))?;

        info!(email = %request.email, "Created user");

        Ok(())
    }

    /// Authenticate with username/password and return the identity token
    pub async fn sign_in(&self, request: &SigninRequest) -> Result<String> {
        let output = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", &request.email)
            .auth_parameters("PASSWORD", &request.password)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_not_authorized_exception() {
                    Error::Unauthorized("invalid credentials".into())
                } else {
                    Error::AuthFailed(service_error.to_string())
                }
            })?;

        output
            .authentication_result()
            .and_then(|result| result.id_token())
            .map(str::to_string)
            .ok_or_else(|| Error::AuthFailed("no identity token in authentication result".into()))
    }
}
