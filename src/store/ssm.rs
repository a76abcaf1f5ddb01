//! AWS SSM Parameter Store backend.
//!
//! One [`SsmStore`] holds the shared AWS session config and a client bound
//! to the ambient region, both created once per render invocation. Lookups
//! carrying a `region` override get a fresh client built from the shared
//! session config for that call only.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ssm::config::Region;
use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use aws_sdk_ssm::Client;

use super::{ParameterStore, StoreError, StoreResult};

/// AWS SSM Parameter Store backend implementation.
pub struct SsmStore {
    /// Shared session config, also the base for region-scoped clients
    config: SdkConfig,

    /// Client bound to the ambient region
    client: Client,
}

impl SsmStore {
    /// Establish a session and build the default-region client.
    ///
    /// An empty or absent profile means ambient profile resolution (env
    /// vars, shared config files, instance metadata). Credentials are
    /// resolved eagerly so a broken credential chain fails here, before any
    /// template is rendered.
    pub async fn connect(profile: Option<&str>) -> StoreResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            tracing::debug!(profile, "using AWS profile");
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        let provider = config
            .credentials_provider()
            .ok_or_else(|| StoreError::Session("no credentials provider configured".to_string()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|err| StoreError::Session(err.to_string()))?;

        let client = Client::new(&config);
        Ok(Self { config, client })
    }

    /// Build a one-off client scoped to another region.
    fn regional_client(&self, region: &str) -> Client {
        let config = aws_sdk_ssm::config::Builder::from(&self.config)
            .region(Region::new(region.to_string()))
            .build();
        Client::from_conf(config)
    }
}

#[async_trait]
impl ParameterStore for SsmStore {
    async fn get_parameter(
        &self,
        path: &str,
        region: Option<&str>,
        decrypt: bool,
    ) -> StoreResult<Option<String>> {
        // Region-scoped clients are built fresh per lookup, never cached.
        let scoped;
        let client = match region {
            Some(region) => {
                tracing::debug!(path, region, "using region-scoped client");
                scoped = self.regional_client(region);
                &scoped
            }
            None => &self.client,
        };

        let result = client
            .get_parameter()
            .name(path)
            .with_decryption(decrypt)
            .send()
            .await;

        match result {
            Ok(output) => Ok(output.parameter.and_then(|p| p.value)),
            Err(err) => {
                if let SdkError::ServiceError(ref context) = err {
                    if context.err().is_parameter_not_found() {
                        tracing::debug!(path, "parameter not found");
                        return Ok(None);
                    }
                }
                Err(map_sdk_error(path, err))
            }
        }
    }

    fn name(&self) -> &'static str {
        "AWS SSM Parameter Store"
    }
}

impl std::fmt::Debug for SsmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmStore")
            .field("region", &self.config.region())
            .finish()
    }
}

/// Map an SDK error into a typed [`StoreError`].
///
/// `ParameterNotFound` is handled by the caller; everything here is a real
/// failure that must abort the render.
fn map_sdk_error<R: std::fmt::Debug>(
    path: &str,
    err: SdkError<GetParameterError, R>,
) -> StoreError {
    match err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let code = service_err.code().unwrap_or("Unknown");
            let message = service_err
                .message()
                .unwrap_or("no error message")
                .to_string();

            match code {
                "AccessDeniedException"
                | "UnauthorizedException"
                | "UnrecognizedClientException"
                | "InvalidSignatureException"
                | "ExpiredTokenException" => StoreError::AccessDenied {
                    path: path.to_string(),
                    message,
                },
                "ThrottlingException" | "TooManyRequestsException" => StoreError::Throttled {
                    path: path.to_string(),
                    message,
                },
                _ => StoreError::Backend {
                    path: path.to_string(),
                    message: format!("{code}: {message}"),
                },
            }
        }
        SdkError::TimeoutError(_) => StoreError::Timeout {
            path: path.to_string(),
        },
        SdkError::DispatchFailure(failure) => StoreError::Connection(
            failure
                .as_connector_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "request dispatch failed".to_string()),
        ),
        other => StoreError::Backend {
            path: path.to_string(),
            message: other.to_string(),
        },
    }
}
