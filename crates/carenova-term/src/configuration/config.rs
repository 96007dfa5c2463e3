#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    ServerUrl,
    RequestTimeout,
    ReloadDelay,
    LogLevel,
}

impl ConfigKey {
    /// Name of the environment variable that may set this key.
    pub fn env_var(&self) -> String {
        format!("CARENOVA_{}", self.to_string().replace('-', "_").to_uppercase())
    }
}

fn default_config_path() -> path::PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_default()
        .join("carenova/config.toml")
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        "".to_string()
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::ServerUrl => "http://localhost:8000",
            ConfigKey::RequestTimeout => "30000",
            ConfigKey::ReloadDelay => "2000",
            ConfigKey::LogLevel => "info",

            // Special
            ConfigKey::ConfigFile => {
                return default_config_path().to_string_lossy().to_string();
            }
        };

        res.to_string()
    }

    /// A millisecond setting as a duration, falling back to the default when
    /// the stored value is not a number.
    pub fn get_duration(key: ConfigKey) -> Duration {
        let millis = Config::get(key)
            .parse::<u64>()
            .or_else(|_| Config::default(key).parse::<u64>())
            .unwrap_or_default();

        Duration::from_millis(millis)
    }

    fn validate(key: ConfigKey, val: &str) -> Result<()> {
        match key {
            ConfigKey::RequestTimeout | ConfigKey::ReloadDelay => {
                if val.parse::<u64>().is_err() {
                    bail!("config has an invalid value for key '{key}': {val}\nExpected a number of milliseconds");
                }
            }
            ConfigKey::ServerUrl => {
                if !val.starts_with("http://") && !val.starts_with("https://") {
                    bail!("config has an invalid value for key '{key}': {val}\nExpected an http:// or https:// URL");
                }
            }
            ConfigKey::ConfigFile | ConfigKey::LogLevel => {}
        }

        Ok(())
    }

    /// Layers defaults, the config file and command line/environment values,
    /// in that order.
    pub async fn load(cmd: &Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        let val_str = val_int.to_string();
                        Config::validate(key, &val_str)?;
                        Config::set(key, &val_str);
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("{config_file} has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::validate(key, val_str)?;
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::validate(key, val)?;
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            config_file = Config::get(ConfigKey::ConfigFile),
            server_url = Config::get(ConfigKey::ServerUrl),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            reload_delay = Config::get(ConfigKey::ReloadDelay),
            log_level = Config::get(ConfigKey::LogLevel),
            "config"
        );

        Ok(())
    }

    pub fn serialize_default(cmd: &Command) -> String {
        ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {possible_values}]");
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<u64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                Some(format!("# {description}\n{val}"))
            })
            .collect::<Vec<String>>()
            .join("\n\n")
    }
}
