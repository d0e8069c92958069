use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

/// Where and how the backend service is reached
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the report API, e.g. `http://10.0.2.2:5000/api`
    pub base_url: String,
    /// Timeout for ordinary JSON requests
    pub request_timeout: Duration,
    /// Timeout for the multipart report upload
    pub upload_timeout: Duration,
    /// Optional bearer token sent with every request
    pub api_token: Option<String>,
}

/// Identity of the signed-in user on this device
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub user_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            backend: BackendConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl BackendConfig {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000/api";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("NOISE_API_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "NOISE_API_BASE_URL must be an http(s) URL, got '{}'",
                base_url
            ));
        }

        let request_timeout_secs = env::var("NOISE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "NOISE_API_TIMEOUT_SECS must be a valid number".to_string())?;

        let upload_timeout_secs = env::var("NOISE_UPLOAD_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOAD_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "NOISE_UPLOAD_TIMEOUT_SECS must be a valid number".to_string())?;

        let api_token = env::var("NOISE_API_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            upload_timeout: Duration::from_secs(upload_timeout_secs),
            api_token,
        })
    }

    /// Config pointing at `base_url` with default timeouts and no token
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(Self::DEFAULT_UPLOAD_TIMEOUT_SECS),
            api_token: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let user_id = env::var("NOISE_USER_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self { user_id })
    }
}
