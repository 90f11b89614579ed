use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `MARKETING__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub segments: SegmentsConfig,
    #[serde(default)]
    pub campaigns: CampaignsConfig,
}

/// Theming for rendered call-to-action elements.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_cta_background")]
    pub cta_background: String,
    #[serde(default = "default_cta_text_color")]
    pub cta_text_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsConfig {
    /// How often the server evaluator refreshes dynamic segment membership.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignsConfig {
    /// Furthest into the future a campaign may be scheduled.
    #[serde(default = "default_schedule_horizon_days")]
    pub schedule_horizon_days: u32,
}

fn default_cta_background() -> String {
    "#1a1a1a".to_string()
}
fn default_cta_text_color() -> String {
    "#ffffff".to_string()
}
fn default_refresh_interval_secs() -> u64 {
    300
}
fn default_schedule_horizon_days() -> u32 {
    90
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            cta_background: default_cta_background(),
            cta_text_color: default_cta_text_color(),
        }
    }
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl Default for CampaignsConfig {
    fn default() -> Self {
        Self {
            schedule_horizon_days: default_schedule_horizon_days(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            segments: SegmentsConfig::default(),
            campaigns: CampaignsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("MARKETING")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.segments.refresh_interval_secs, 300);
        assert_eq!(config.campaigns.schedule_horizon_days, 90);
        assert_eq!(config.content.cta_background, "#1a1a1a");
    }
}
