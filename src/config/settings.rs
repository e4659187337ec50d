use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use url::Url;

use crate::{
    bulk::default_concurrency,
    executor::{Credentials, DEFAULT_KIBANA_VERSION, DEFAULT_TIMEOUT},
};

use super::{LoadedConfig, ProfileConfig, ToolkitConfig};

/// Resolved connection settings for the Elasticsearch endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsSettings {
    pub es_url: Url,
    pub credentials: Option<Credentials>,
    pub kibana_version: String,
    pub timeout: Duration,
    pub concurrency: usize,
    pub profile_name: Option<String>,
}

/// Layers command line values over the selected profile, then over the
/// top-level config values, then over built-in defaults.
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    config: Option<LoadedConfig>,
    requested_profile: Option<String>,
    overrides: ProfileConfig,
}

impl SettingsBuilder {
    pub fn new(
        config: Option<LoadedConfig>,
        requested_profile: Option<String>,
        overrides: ProfileConfig,
    ) -> Self {
        Self {
            config,
            requested_profile,
            overrides,
        }
    }

    pub fn build(&self) -> Result<EsSettings> {
        let mut merged = self.overrides.clone();
        let mut profile_name = None;

        match &self.config {
            Some(cfg) => {
                let requested = self.requested_profile.as_deref();
                if let Some(profile) = resolve_profile(&cfg.config, requested)? {
                    profile_name = Some(profile.name);
                    merged = merged.or(profile.config);
                }
                merged = merged.or(&cfg.config.defaults);
            }
            None => {
                if let Some(name) = &self.requested_profile {
                    bail!("Unknown profile: {} (no configuration loaded)", name);
                }
            }
        }

        let raw_url = merged.es_url.ok_or_else(|| {
            anyhow!("an es url is required (--es-url, TOOLKIT_ES_URL or config)")
        })?;

        Ok(EsSettings {
            es_url: normalize_es_url(&raw_url)?,
            credentials: Credentials::from_parts(merged.username, merged.password),
            kibana_version: merged
                .kibana_version
                .unwrap_or_else(|| DEFAULT_KIBANA_VERSION.to_string()),
            timeout: merged.timeout.unwrap_or(DEFAULT_TIMEOUT),
            concurrency: merged.concurrency.unwrap_or_else(default_concurrency),
            profile_name,
        })
    }
}

impl ProfileConfig {
    /// Fill every unset field from `lower`.
    fn or(self, lower: &ProfileConfig) -> ProfileConfig {
        ProfileConfig {
            es_url: self.es_url.or_else(|| lower.es_url.clone()),
            username: self.username.or_else(|| lower.username.clone()),
            password: self.password.or_else(|| lower.password.clone()),
            kibana_version: self.kibana_version.or_else(|| lower.kibana_version.clone()),
            timeout: self.timeout.or(lower.timeout),
            concurrency: self.concurrency.or(lower.concurrency),
        }
    }
}

/// Prepend `http://` when no scheme is given and require a host.
pub fn normalize_es_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let url = Url::parse(&with_scheme).with_context(|| format!("invalid es url {raw:?}"))?;
    if url.host_str().map_or(true, str::is_empty) {
        bail!("invalid es url {:?}", raw);
    }
    Ok(url)
}

struct ResolvedProfile<'a> {
    name: String,
    config: &'a ProfileConfig,
}

fn resolve_profile<'a>(
    config: &'a ToolkitConfig,
    requested: Option<&str>,
) -> Result<Option<ResolvedProfile<'a>>> {
    if let Some(name) = requested {
        if config.profiles.is_empty() {
            bail!("No profiles defined in configuration");
        }
        let profile = config
            .profiles
            .get(name)
            .ok_or_else(|| anyhow!("Unknown profile: {}", name))?;
        return Ok(Some(ResolvedProfile {
            name: name.to_string(),
            config: profile,
        }));
    }

    if let Some(default) = &config.default_profile {
        let profile = config
            .profiles
            .get(default)
            .ok_or_else(|| anyhow!("Default profile {} is not defined", default))?;
        return Ok(Some(ResolvedProfile {
            name: default.to_string(),
            config: profile,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn loaded(json: &str) -> Result<LoadedConfig> {
        let temp = tempdir()?;
        let path = temp.path().join("toolkit.json");
        std::fs::write(&path, json)?;
        Ok(load_config(&path)?.expect("config should load"))
    }

    fn with_url(url: &str) -> ProfileConfig {
        ProfileConfig {
            es_url: Some(url.to_string()),
            ..ProfileConfig::default()
        }
    }

    #[test]
    fn defaults_apply_without_config() -> Result<()> {
        let settings = SettingsBuilder::new(None, None, with_url("localhost:9200")).build()?;
        assert_eq!(settings.es_url.as_str(), "http://localhost:9200/");
        assert_eq!(settings.kibana_version, "7.14.2");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.concurrency >= 1);
        assert!(settings.credentials.is_none());
        assert!(settings.profile_name.is_none());
        Ok(())
    }

    #[test]
    fn es_url_is_required() {
        let err = SettingsBuilder::new(None, None, ProfileConfig::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("es url is required"));
    }

    #[test]
    fn overrides_beat_profile_and_profile_beats_top_level() -> Result<()> {
        let config = loaded(
            r#"{
  "defaultProfile": "prod",
  "esUrl": "http://top-level:9200",
  "username": "top",
  "password": "top-secret",
  "timeout": 30,
  "profiles": {
    "prod": {"esUrl": "https://es.prod:9200", "username": "ops", "concurrency": 3}
  }
}"#,
        )?;

        let overrides = ProfileConfig {
            password: Some("from-flag".to_string()),
            ..ProfileConfig::default()
        };
        let settings = SettingsBuilder::new(Some(config), None, overrides).build()?;

        assert_eq!(settings.es_url.as_str(), "https://es.prod:9200/");
        assert_eq!(
            settings.credentials,
            Some(Credentials {
                username: "ops".to_string(),
                password: "from-flag".to_string(),
            })
        );
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.concurrency, 3);
        assert_eq!(settings.profile_name.as_deref(), Some("prod"));
        Ok(())
    }

    #[test]
    fn requested_profile_must_exist() -> Result<()> {
        let config = loaded(r#"{"profiles": {"dev": {"esUrl": "localhost:9200"}}}"#)?;
        let builder =
            SettingsBuilder::new(Some(config), Some("prod".into()), ProfileConfig::default());
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("Unknown profile: prod"));
        Ok(())
    }

    #[test]
    fn profile_without_config_is_rejected() {
        let err = SettingsBuilder::new(None, Some("prod".into()), with_url("localhost"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no configuration loaded"));
    }

    #[test]
    fn normalize_keeps_existing_scheme_and_query() -> Result<()> {
        let url = normalize_es_url("https://es.example.com:9243/?pretty")?;
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.query(), Some("pretty"));
        Ok(())
    }

    #[test]
    fn normalize_rejects_missing_host() {
        assert!(normalize_es_url("http://").is_err());
        assert!(normalize_es_url("").is_err());
    }
}
