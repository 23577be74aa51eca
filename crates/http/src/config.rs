//! Fetch-stage settings.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://hapi.humdata.org/api/v1/";
pub const DEFAULT_PAGE_LIMIT: usize = 1000;
pub const DEFAULT_ADMIN_LEVEL: u8 = 1;
pub const DEFAULT_GEOJSON_TEMPLATE: &str =
    "https://apps.itos.uga.edu/codv2api/api/v1/themes/cod-ab/locations/{code}/versions/current/geoJSON/{level}";

/// Where and how to page HAPI and download boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HapiConfig {
    /// API root, always ending with `/`
    pub base_url: String,
    pub app_identifier: String,
    /// Page size for paginated queries
    pub limit: usize,
    /// GeoJSON URL with `{code}` and `{level}` placeholders
    pub geojson_template: String,
    pub admin_level: u8,
    pub timeout: Duration,
}

impl Default for HapiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_identifier: String::new(),
            limit: DEFAULT_PAGE_LIMIT,
            geojson_template: DEFAULT_GEOJSON_TEMPLATE.to_string(),
            admin_level: DEFAULT_ADMIN_LEVEL,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HapiConfig {
    #[must_use]
    pub fn new(app_identifier: impl Into<String>) -> Self {
        Self {
            app_identifier: app_identifier.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_geojson_template(mut self, template: impl Into<String>) -> Self {
        self.geojson_template = template.into();
        self
    }

    #[must_use]
    pub fn with_admin_level(mut self, level: u8) -> Self {
        self.admin_level = level;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Query URL listing every location.
    pub fn location_query_url(&self) -> String {
        format!(
            "{}metadata/location?output_format=json&app_identifier={}",
            self.base_url, self.app_identifier
        )
    }

    /// Boundary URL for one country.
    pub fn geojson_url(&self, code: &str) -> String {
        self.geojson_template
            .replace("{code}", code)
            .replace("{level}", &self.admin_level.to_string())
    }
}
