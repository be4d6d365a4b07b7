//! Gateway configuration with validation.
//!
//! The shared encryption key and per-client signing secrets are read-only
//! process-wide configuration, loaded once at startup and never accepted
//! as request input. Key material is redacted from `Debug` output.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use shared_crypto::{SharedKey, SharedSecret};

/// Main gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Shared symmetric key for envelope bodies
    pub encryption_key: SharedKey,
    /// Per-client HMAC signing secrets
    pub clients: ClientRegistry,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl GatewayConfig {
    /// Create a configuration with the given key and client registry and
    /// default server settings.
    pub fn new(encryption_key: SharedKey, clients: ClientRegistry) -> Self {
        Self {
            http: HttpConfig::default(),
            encryption_key,
            clients,
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// - `CG_ENCRYPTION_KEY` (required): 32-byte symmetric key
    /// - `CG_CLIENT_SECRETS` (required): `client-id=secret` comma list
    /// - `CG_HTTP_HOST`, `CG_HTTP_PORT`: bind address overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key_str = std::env::var("CG_ENCRYPTION_KEY")
            .map_err(|_| ConfigError::Missing("CG_ENCRYPTION_KEY"))?;
        let encryption_key = SharedKey::from_str(&key_str)
            .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;

        let secrets_spec = std::env::var("CG_CLIENT_SECRETS")
            .map_err(|_| ConfigError::Missing("CG_CLIENT_SECRETS"))?;
        let clients = ClientRegistry::from_spec(&secrets_spec)?;

        let mut config = Self::new(encryption_key, clients);

        if let Ok(host) = std::env::var("CG_HTTP_HOST") {
            config.http.host = host
                .parse()
                .map_err(|_| ConfigError::Invalid("CG_HTTP_HOST is not an IP address".into()))?;
        }
        if let Ok(port) = std::env::var("CG_HTTP_PORT") {
            config.http.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid("CG_HTTP_PORT is not a port number".into()))?;
        }

        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clients.is_empty() {
            return Err(ConfigError::NoClients);
        }
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::Invalid(
                "max_request_size cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "x-auth-signature".to_string(),
                "x-client-id".to_string(),
            ],
            max_age: 86400, // 24 hours
        }
    }
}

/// Per-client signing secret lookup.
///
/// Distinct clients can hold distinct secrets; an unknown client
/// identifier is a verification failure, not a crash.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    secrets: HashMap<String, SharedSecret>,
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client's signing secret.
    pub fn insert(&mut self, client_id: impl Into<String>, secret: SharedSecret) {
        self.secrets.insert(client_id.into(), secret);
    }

    /// Resolve the signing secret for a client identifier.
    pub fn secret_for(&self, client_id: &str) -> Option<&SharedSecret> {
        self.secrets.get(client_id)
    }

    /// Whether any clients are registered.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Number of registered clients.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Parse a `client-id=secret` comma-separated list.
    pub fn from_spec(spec: &str) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for entry in spec.split(',').filter(|e| !e.trim().is_empty()) {
            let (id, secret) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidClientSpec(entry.trim().to_string()))?;
            let id = id.trim();
            if id.is_empty() || secret.is_empty() {
                return Err(ConfigError::InvalidClientSpec(entry.trim().to_string()));
            }
            registry.insert(id, SharedSecret::from(secret));
        }
        Ok(registry)
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
    /// Encryption key is malformed
    #[error("invalid encryption key: {0}")]
    InvalidKey(String),
    /// Client secret entry is malformed
    #[error("invalid client secret entry: {0:?} (expected client-id=secret)")]
    InvalidClientSpec(String),
    /// No client secrets registered
    #[error("no client secrets configured")]
    NoClients,
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SharedKey {
        "0123456789abcdef0123456789abcdef".parse().unwrap()
    }

    #[test]
    fn test_default_config_validates() {
        let mut clients = ClientRegistry::new();
        clients.insert("client-a", SharedSecret::from("secret"));
        let config = GatewayConfig::new(test_key(), clients);

        assert!(config.validate().is_ok());
        assert_eq!(config.http_addr().port(), 8080);
    }

    #[test]
    fn test_empty_registry_rejected() {
        let config = GatewayConfig::new(test_key(), ClientRegistry::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoClients)));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ClientRegistry::from_spec("client-a=s3cret, client-b=other").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.secret_for("client-a").unwrap().as_bytes(),
            b"s3cret"
        );
        assert!(registry.secret_for("client-c").is_none());
    }

    #[test]
    fn test_malformed_client_spec() {
        assert!(matches!(
            ClientRegistry::from_spec("no-delimiter"),
            Err(ConfigError::InvalidClientSpec(_))
        ));
        assert!(matches!(
            ClientRegistry::from_spec("=secret"),
            Err(ConfigError::InvalidClientSpec(_))
        ));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let mut clients = ClientRegistry::new();
        clients.insert("client-a", SharedSecret::from("hunter2-hmac"));
        let config = GatewayConfig::new(test_key(), clients);

        let debug = format!("{:?}", config);
        assert!(!debug.contains("0123456789abcdef"));
        assert!(!debug.contains("hunter2-hmac"));
    }
}
