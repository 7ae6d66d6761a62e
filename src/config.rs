/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub ollama_url: String,
    pub sentry_dsn: Option<String>,
    pub environment: String,
}

pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = var("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let model = var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let ollama_url = var("OLLAMA_HOST")
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        let sentry_dsn = var("SENTRY_DSN");

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "local".to_string());

        Config {
            host,
            port,
            model,
            ollama_url,
            sentry_dsn,
            environment,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
