use ::envconfig::Envconfig;

/// Client configuration. The base endpoint is runtime configuration rather
/// than a compile-time constant.
#[derive(::envconfig::Envconfig, Clone, Debug)]
pub struct ClientConfig {
    #[envconfig(from = "IDEABOARD_API_URL", default = "http://localhost:8000")]
    pub api_url: String,

    #[envconfig(from = "IDEABOARD_HTTP_TIMEOUT_SECS", default = "30")]
    pub http_timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<ClientConfig, ::envconfig::Error> {
        ClientConfig::init_from_env()
    }

    /// Configuration pointing at a known endpoint, used by tests and tools.
    pub fn new(api_url: impl Into<String>) -> ClientConfig {
        ClientConfig {
            api_url: api_url.into(),
            http_timeout_secs: 30,
        }
    }
}
