use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cors_origin: String,
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    /// Upper bound on comments fetched per analysis request.
    pub max_comments: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub keyword_model_url: String,
    pub sentiment_model_url: String,
    pub toxicity_model_url: String,
    /// Label whose probability is reported as the toxicity score.
    pub toxic_label: String,
    pub hf_api_token: Option<String>,
    pub classifier_max_in_flight: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cors_origin", &self.cors_origin)
            .field("youtube_api_key", &"[redacted]")
            .field("youtube_base_url", &self.youtube_base_url)
            .field("max_comments", &self.max_comments)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("keyword_model_url", &self.keyword_model_url)
            .field("sentiment_model_url", &self.sentiment_model_url)
            .field("toxicity_model_url", &self.toxicity_model_url)
            .field("toxic_label", &self.toxic_label)
            .field(
                "hf_api_token",
                &self.hf_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("classifier_max_in_flight", &self.classifier_max_in_flight)
            .finish()
    }
}
