use shared::ApiConfig;

const API_CONFIG: &str = include_str!("../config/api.yaml");

/// Embedded API settings, with the base URL optionally replaced at build time.
pub fn load_api_config() -> ApiConfig {
    let config = ApiConfig::from_yaml(API_CONFIG).and_then(|config| {
        match option_env!("INSIGHTFORGE_API_BASE_URL") {
            Some(base_url) => config.with_base_url(base_url),
            None => Ok(config),
        }
    });

    match config {
        Ok(config) => {
            log::info!("Analysis service at {}", config.base_url);
            config
        }
        Err(e) => {
            log::error!("{}; falling back to defaults", e);
            ApiConfig::default()
        }
    }
}
