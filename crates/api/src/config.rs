use spinwin_core::contact::ContactMethod;
use spinwin_core::maintenance::DEFAULT_HISTORY_RETENTION_DAYS;

/// Default bearer token for the admin endpoints.
const DEFAULT_ADMIN_API_KEY: &str = "admin-secret-key";

/// Default bearer token for the cleanup endpoint.
const DEFAULT_CLEANUP_API_KEY: &str = "cleanup-secret-key";

/// Which verification channels users may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpChannels {
    pub enable_email: bool,
    pub enable_phone: bool,
}

impl Default for OtpChannels {
    fn default() -> Self {
        Self {
            enable_email: true,
            enable_phone: false,
        }
    }
}

impl OtpChannels {
    pub fn is_enabled(&self, method: ContactMethod) -> bool {
        match method {
            ContactMethod::Email => self.enable_email,
            ContactMethod::Phone => self.enable_phone,
        }
    }

    /// At least one channel must be on.
    pub fn is_valid(&self) -> bool {
        self.enable_email || self.enable_phone
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// `memory://` or a `redis://` URL.
    pub store_url: String,
    /// Bearer token for `/api/admin/*`.
    pub admin_api_key: String,
    /// Bearer token for `/api/cleanup`.
    pub cleanup_api_key: String,
    /// Reference offset for cooldown wall-clock arithmetic, minutes east of UTC.
    pub cooldown_offset_minutes: i32,
    /// Enabled verification channels.
    pub otp_channels: OtpChannels,
    /// Echo verification codes in the send response (development only).
    pub expose_otp_in_response: bool,
    /// Interval between background sweeps.
    pub sweep_interval_secs: u64,
    /// History entries older than this many days are swept.
    pub history_retention_days: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 5,
            store_url: "memory://".into(),
            admin_api_key: DEFAULT_ADMIN_API_KEY.into(),
            cleanup_api_key: DEFAULT_CLEANUP_API_KEY.into(),
            cooldown_offset_minutes: 0,
            otp_channels: OtpChannels::default(),
            expose_otp_in_response: false,
            sweep_interval_secs: 3600,
            history_retention_days: DEFAULT_HISTORY_RETENTION_DAYS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                  |
    /// |-------------------------------|--------------------------|
    /// | `HOST`                        | `0.0.0.0`                |
    /// | `PORT`                        | `3000`                   |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `5`                      |
    /// | `STORE_URL`                   | `memory://`              |
    /// | `ADMIN_API_KEY`               | `admin-secret-key`       |
    /// | `CLEANUP_API_KEY`             | `cleanup-secret-key`     |
    /// | `COOLDOWN_UTC_OFFSET_MINUTES` | `0`                      |
    /// | `ENABLE_EMAIL_OTP`            | `true`                   |
    /// | `ENABLE_PHONE_OTP`            | `false`                  |
    /// | `EXPOSE_OTP_IN_RESPONSE`      | `false`                  |
    /// | `SWEEP_INTERVAL_SECS`         | `3600`                   |
    /// | `HISTORY_RETENTION_DAYS`      | `7`                      |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port: u16 = parse_env("PORT", defaults.port);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let admin_api_key = std::env::var("ADMIN_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_API_KEY not set, using the development default");
            defaults.admin_api_key
        });
        let cleanup_api_key = std::env::var("CLEANUP_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("CLEANUP_API_KEY not set, using the development default");
            defaults.cleanup_api_key
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            shutdown_timeout_secs: parse_env(
                "SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout_secs,
            ),
            store_url: std::env::var("STORE_URL").unwrap_or(defaults.store_url),
            admin_api_key,
            cleanup_api_key,
            cooldown_offset_minutes: parse_env(
                "COOLDOWN_UTC_OFFSET_MINUTES",
                defaults.cooldown_offset_minutes,
            ),
            otp_channels: OtpChannels {
                enable_email: parse_flag("ENABLE_EMAIL_OTP", defaults.otp_channels.enable_email),
                enable_phone: parse_flag("ENABLE_PHONE_OTP", defaults.otp_channels.enable_phone),
            },
            expose_otp_in_response: parse_flag(
                "EXPOSE_OTP_IN_RESPONSE",
                defaults.expose_otp_in_response,
            ),
            sweep_interval_secs: parse_env("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
            history_retention_days: parse_env(
                "HISTORY_RETENTION_DAYS",
                defaults.history_retention_days,
            ),
        }
    }
}

/// Parse `name` as `T`, falling back to `default` when unset.
///
/// Panics on a present but unparseable value so misconfiguration fails fast.
fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid value, got '{raw}': {e}")),
        Err(_) => default,
    }
}

/// `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, case-insensitive.
fn parse_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            other => panic!("{name} must be a boolean, got '{other}'"),
        },
        Err(_) => default,
    }
}
