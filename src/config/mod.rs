mod duration;
mod loader;
mod settings;

pub use duration::parse_duration;
pub use loader::{load_config, LoadedConfig, ProfileConfig, ToolkitConfig, CONFIG_FILE_NAME};
pub use settings::{normalize_es_url, EsSettings, SettingsBuilder};
