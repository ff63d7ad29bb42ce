use std::path::PathBuf;

use impacthub_domain::DomainError;
use impacthub_infrastructure::config::ClientConfig;

/// Environment configuration with command-line overrides applied on top
pub fn load_config(
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<ClientConfig, DomainError> {
    apply_overrides(ClientConfig::from_env()?, api_url, data_dir)
}

fn apply_overrides(
    mut config: ClientConfig,
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<ClientConfig, DomainError> {
    if let Some(url) = api_url {
        config = config.with_api_base_url(url)?;
    }
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }
    Ok(config)
}
