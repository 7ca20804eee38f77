use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public site the browser is sent back to after a payment outcome.
    pub frontend_url: String,
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Seed credentials for the first SuperAdmin, applied only when the users
    /// table is empty.
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayFastSettings {
    pub merchant_id: String,
    pub merchant_key: String,
    /// Empty means no passphrase is configured on the merchant account.
    #[serde(default)]
    pub passphrase: String,
    pub process_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
    #[serde(default = "default_item_name")]
    pub item_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub payfast: PayFastSettings,
}

impl Settings {
    /// Optional `config/default.toml` overridden by `APP__`-prefixed
    /// environment variables, e.g. `APP__PAYFAST__MERCHANT_ID`.
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_item_name() -> String {
    "Donation to Lungisa NPO".to_string()
}
