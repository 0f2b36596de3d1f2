use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load a service's settings.
///
/// Sources, lowest precedence first: `<service_dir>/config/base.yaml`
/// (optional) and `APP_`-prefixed environment variables using `__` as the
/// nesting separator (`APP_SERVER__PORT=9000`). A `.env` file is read first
/// if one exists.
pub fn load_configuration<T: DeserializeOwned>(service_dir: &str) -> Result<T, ConfigError> {
    dotenvy::dotenv().ok();

    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = configuration_directory(&base_path, service_dir);

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<T>()
}

/// Works both from the workspace root and from inside the service directory.
fn configuration_directory(base_path: &Path, service_dir: &str) -> PathBuf {
    if base_path.ends_with(service_dir) {
        base_path.join("config")
    } else {
        base_path.join(service_dir).join("config")
    }
}
