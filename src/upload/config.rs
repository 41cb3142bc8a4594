/// Connection settings for a Grafana instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrafanaConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Service account token; takes precedence over basic auth when set
    pub token: String,
    pub org_id: Option<i64>,
}

impl Default for GrafanaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            token: String::new(),
            org_id: None,
        }
    }
}

impl GrafanaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let url = lookup("GRAFANA_URL").unwrap_or(defaults.url);
        let username = lookup("GRAFANA_ADMIN_USER").unwrap_or(defaults.username);
        let password = lookup("GRAFANA_ADMIN_PASSWORD").unwrap_or(defaults.password);
        let token = lookup("GRAFANA_API_TOKEN").unwrap_or(defaults.token);
        let org_id = lookup("GRAFANA_ORG_ID").and_then(|v| v.trim().parse().ok());

        Self {
            url,
            username,
            password,
            token,
            org_id,
        }
    }

    pub fn uses_token(&self) -> bool {
        !self.token.is_empty()
    }
}
