use std::time::Duration;

use relay_core::config::{BrokerConfig, ServiceEndpointsConfig};
use relay_core::models::{AuthPayload, Capability, LogPayload, MailPayload, ServiceResponse};
use relay_core::{RelayError, Result};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, warn};

/// HTTP client for the downstream capability services.
///
/// Each invocation serializes one sub-payload, issues exactly one POST to
/// the fixed per-capability URL and classifies the response status. No
/// retries are performed; a transport failure fails the invocation.
pub struct CapabilityClient {
    endpoints: ServiceEndpointsConfig,
    http_client: reqwest::Client,
}

impl CapabilityClient {
    pub fn new(broker: &BrokerConfig, endpoints: ServiceEndpointsConfig) -> Result<Self> {
        // Explicit timeouts instead of the transport defaults
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(broker.connect_timeout_seconds))
            .timeout(Duration::from_secs(broker.request_timeout_seconds))
            .build()
            .map_err(|e| RelayError::Internal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            endpoints,
            http_client,
        })
    }

    pub async fn authenticate(&self, payload: &AuthPayload) -> Result<ServiceResponse> {
        self.call_service(Capability::Auth, payload).await
    }

    pub async fn send_log(&self, payload: &LogPayload) -> Result<ServiceResponse> {
        self.call_service(Capability::Logger, payload).await
    }

    pub async fn send_mail(&self, payload: &MailPayload) -> Result<ServiceResponse> {
        self.call_service(Capability::Mailer, payload).await
    }

    /// Invoke one capability service and classify its status code.
    ///
    /// 202 relays the decoded envelope, 401 is only meaningful for the auth
    /// capability, everything else is a downstream failure. The response
    /// body is discarded on every non-accepted status.
    async fn call_service<P: Serialize>(
        &self,
        capability: Capability,
        payload: &P,
    ) -> Result<ServiceResponse> {
        let url = self.endpoints.url_for(capability);

        let response = match self.http_client.post(url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to reach {} service at {}: {}", capability, url, e);
                return Err(RelayError::Network(format!(
                    "{capability} service unreachable: {e}"
                )));
            }
        };

        match response.status() {
            StatusCode::ACCEPTED => {
                let envelope: ServiceResponse = match response.json().await {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        error!("Invalid response body from {} service: {}", capability, e);
                        return Err(RelayError::DownstreamCallFailed { capability });
                    }
                };

                // The auth service reports bad credentials inside an
                // accepted envelope as well as via 401
                if envelope.error && capability == Capability::Auth {
                    warn!("Auth service accepted the call but flagged the credentials");
                    return Err(RelayError::InvalidCredentials);
                }

                debug!("{} service accepted the request", capability);
                Ok(envelope)
            }
            StatusCode::UNAUTHORIZED if capability == Capability::Auth => {
                warn!("Auth service rejected the credentials");
                Err(RelayError::InvalidCredentials)
            }
            status => {
                error!(
                    "{} service returned unexpected status {}",
                    capability, status
                );
                Err(RelayError::DownstreamCallFailed { capability })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::config::AppConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> CapabilityClient {
        let config = AppConfig::default();
        let endpoints = ServiceEndpointsConfig {
            auth_url: format!("{}/authenticate", server.uri()),
            logger_url: format!("{}/log", server.uri()),
            mailer_url: format!("{}/send", server.uri()),
        };
        CapabilityClient::new(&config.broker, endpoints).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_relays_accepted_envelope() {
        let server = MockServer::start().await;
        let downstream = ServiceResponse::ok_with_data(
            "已登录",
            json!({ "id": 1, "email": "admin@example.com" }),
        );

        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "email": "admin@example.com",
                "password": "verysecret"
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(&downstream))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let payload = AuthPayload {
            email: "admin@example.com".to_string(),
            password: "verysecret".to_string(),
        };

        let envelope = client.authenticate(&payload).await.unwrap();
        assert_eq!(envelope, downstream);
    }

    #[tokio::test]
    async fn test_authenticate_unauthorized_is_invalid_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.authenticate(&AuthPayload::default()).await;

        assert!(matches!(result, Err(RelayError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_error_flag_in_accepted_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_json(ServiceResponse::failure("无效的凭证")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.authenticate(&AuthPayload::default()).await;

        assert!(matches!(result, Err(RelayError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logger_unauthorized_is_generic_failure() {
        // 401 is only meaningful for the auth capability
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/log"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.send_log(&LogPayload::default()).await;

        assert!(matches!(
            result,
            Err(RelayError::DownstreamCallFailed {
                capability: Capability::Logger
            })
        ));
    }

    #[tokio::test]
    async fn test_send_log_posts_exact_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/log"))
            .and(body_json(json!({
                "name": "event",
                "data": "something happened"
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(ServiceResponse::ok("已记录")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let payload = LogPayload {
            name: "event".to_string(),
            data: "something happened".to_string(),
        };

        let envelope = client.send_log(&payload).await.unwrap();
        assert!(!envelope.error);
    }

    #[tokio::test]
    async fn test_ok_but_not_accepted_status_is_failure() {
        // 200 is not the designated accepted code
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ServiceResponse::ok("已发送")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.send_mail(&MailPayload::default()).await;

        assert!(matches!(
            result,
            Err(RelayError::DownstreamCallFailed {
                capability: Capability::Mailer
            })
        ));
    }

    #[tokio::test]
    async fn test_server_error_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.send_mail(&MailPayload::default()).await;

        assert!(matches!(
            result,
            Err(RelayError::DownstreamCallFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_accepted_body_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/log"))
            .respond_with(ResponseTemplate::new(202).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.send_log(&LogPayload::default()).await;

        assert!(matches!(
            result,
            Err(RelayError::DownstreamCallFailed {
                capability: Capability::Logger
            })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = AppConfig::default();
        let endpoints = ServiceEndpointsConfig {
            auth_url: "http://127.0.0.1:1/authenticate".to_string(),
            logger_url: "http://127.0.0.1:1/log".to_string(),
            mailer_url: "http://127.0.0.1:1/send".to_string(),
        };
        let client = CapabilityClient::new(&config.broker, endpoints).unwrap();

        let result = client.authenticate(&AuthPayload::default()).await;

        assert!(matches!(result, Err(RelayError::Network(_))));
    }
}
