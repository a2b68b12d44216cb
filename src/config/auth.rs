//! Identity configuration

use http::HeaderName;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Default header carrying the gateway-authenticated user id.
pub const DEFAULT_USER_ID_HEADER: &str = "x-user-id";

/// How callers are identified.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// Trust a user-id header set by an authenticating gateway.
    #[default]
    Header,
    /// Validate `Authorization: Bearer` JWTs.
    Bearer,
}

/// Identity configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Identity resolution mode
    #[serde(default)]
    pub mode: IdentityMode,

    /// Header carrying the user id in header mode
    #[serde(default = "default_user_id_header")]
    pub user_id_header: String,

    /// HS256 signing secret in bearer mode
    pub jwt_secret: Option<String>,

    /// Expected token issuer in bearer mode
    pub jwt_issuer: Option<String>,

    /// Expected token audience in bearer mode
    pub jwt_audience: Option<String>,
}

impl AuthConfig {
    /// Parsed user id header name
    pub fn user_id_header_name(&self) -> Result<HeaderName, ValidationError> {
        HeaderName::from_bytes(self.user_id_header.as_bytes())
            .map_err(|_| ValidationError::InvalidHeaderName(self.user_id_header.clone()))
    }

    /// True when callers pick their own identity in production.
    ///
    /// Header mode is only safe behind a gateway that strips and sets the
    /// user id header itself.
    pub fn trusts_client_header(&self, environment: &Environment) -> bool {
        self.mode == IdentityMode::Header && *environment == Environment::Production
    }

    /// Validate identity configuration
    ///
    /// Bearer mode needs a secret of at least 32 bytes plus issuer and
    /// audience; production additionally requires an HTTPS issuer.
    /// Header mode in production is allowed but logged at `warn`.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match self.mode {
            IdentityMode::Header => {
                self.user_id_header_name()?;
                if self.trusts_client_header(environment) {
                    tracing::warn!(
                        header = %self.user_id_header,
                        "Header identity mode in production; any client that reaches the \
                         server directly can claim another user's subscription"
                    );
                }
            }
            IdentityMode::Bearer => {
                let secret = self
                    .jwt_secret
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ValidationError::JwtSecretTooShort);
                }

                let issuer = self
                    .jwt_issuer
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or(ValidationError::MissingRequired("AUTH__JWT_ISSUER"))?;
                if self
                    .jwt_audience
                    .as_deref()
                    .map_or(true, |s| s.is_empty())
                {
                    return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
                }

                if *environment == Environment::Production && !issuer.starts_with("https://") {
                    return Err(ValidationError::IssuerMustBeHttps);
                }
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: IdentityMode::default(),
            user_id_header: default_user_id_header(),
            jwt_secret: None,
            jwt_issuer: None,
            jwt_audience: None,
        }
    }
}

fn default_user_id_header() -> String {
    DEFAULT_USER_ID_HEADER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bearer() -> AuthConfig {
        AuthConfig {
            mode: IdentityMode::Bearer,
            jwt_secret: Some("0123456789abcdef0123456789abcdef".to_string()),
            jwt_issuer: Some("https://id.prayerglow.test".to_string()),
            jwt_audience: Some("prayerglow-api".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.mode, IdentityMode::Header);
        assert_eq!(config.user_id_header, DEFAULT_USER_ID_HEADER);
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_header_mode_in_production_is_flagged_but_valid() {
        let config = AuthConfig::default();

        assert!(config.trusts_client_header(&Environment::Production));
        assert!(!config.trusts_client_header(&Environment::Staging));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_bearer_mode_never_trusts_client_header() {
        assert!(!bearer().trusts_client_header(&Environment::Production));
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let config = AuthConfig {
            user_id_header: "bad header".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn test_bearer_mode_valid() {
        assert!(bearer().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_bearer_mode_requires_secret() {
        let config = AuthConfig {
            jwt_secret: None,
            ..bearer()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_bearer_mode_rejects_short_secret() {
        let config = AuthConfig {
            jwt_secret: Some("short".to_string()),
            ..bearer()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::JwtSecretTooShort)
        );
    }

    #[test]
    fn test_bearer_mode_requires_audience() {
        let config = AuthConfig {
            jwt_audience: Some(String::new()),
            ..bearer()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"))
        );
    }

    #[test]
    fn test_production_requires_https_issuer() {
        let config = AuthConfig {
            jwt_issuer: Some("http://localhost:9000".to_string()),
            ..bearer()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::IssuerMustBeHttps)
        );
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let config: AuthConfig = serde_json::from_str(r#"{"mode": "bearer"}"#).unwrap();
        assert_eq!(config.mode, IdentityMode::Bearer);
        assert_eq!(config.user_id_header, "x-user-id");
    }
}
