use std::env;

/// Default backend location for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_base_url: String,
    /// Root of the administrative site, used for question creation.
    pub admin_url: String,
}

impl BackendConfig {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        let admin_url = derive_admin_url(&api_base_url);
        Self {
            api_base_url,
            admin_url,
        }
    }

    #[must_use]
    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = admin_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads `TRYOUT_API_BASE_URL` and `TRYOUT_ADMIN_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let base = env::var("TRYOUT_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let config = Self::new(base);
        match env::var("TRYOUT_ADMIN_URL") {
            Ok(admin) if !admin.trim().is_empty() => config.with_admin_url(admin),
            _ => config,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Admin site root for an API base: a trailing `/api` becomes `/admin`.
#[must_use]
pub fn derive_admin_url(api_base_url: &str) -> String {
    let trimmed = api_base_url.trim_end_matches('/');
    match trimmed.strip_suffix("/api") {
        Some(root) => format!("{root}/admin"),
        None => format!("{trimmed}/admin"),
    }
}
