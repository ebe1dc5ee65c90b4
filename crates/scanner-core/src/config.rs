use dotenv::var;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";
pub const DEFAULT_QUERY_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Runtime settings, read from the environment (and `.env`, if present).
///
/// | variable           | default                              |
/// |--------------------|--------------------------------------|
/// | `USER_AGENT`       | a desktop browser user agent         |
/// | `YAHOO_QUERY_URL`  | `https://query2.finance.yahoo.com`   |
/// | `YAHOO_COOKIE_URL` | `https://fc.yahoo.com`               |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user_agent: String,
    pub query_url: String,
    pub cookie_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            query_url: DEFAULT_QUERY_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_agent: var("USER_AGENT").unwrap_or(defaults.user_agent),
            query_url: var("YAHOO_QUERY_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.query_url),
            cookie_url: var("YAHOO_COOKIE_URL").unwrap_or(defaults.cookie_url),
        }
    }

    /// Point both Yahoo endpoints at one base URL (a mock server, in tests).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.query_url = base.to_string();
        self.cookie_url = base.to_string();
        self
    }
}
