use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::device::Device;
use crate::errors::ConfigError;

#[derive(Deserialize, Debug)]
pub struct CloudParameters {
    #[serde(default = "default_app_server_url")]
    pub app_server_url: String,
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_app_server_url() -> String {
    "https://wap.tplinkcloud.com".into()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Debug)]
pub struct DeviceParameters {
    pub alias: String,
    pub device_id: String,
    pub model: String,
    /// Outlet id, only for power strip outlets
    pub child_id: Option<String>,
}

impl DeviceParameters {
    pub fn to_device(&self) -> Device {
        Device::new(&self.device_id, &self.alias, &self.model, self.child_id.as_deref())
    }
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub general: General,
    pub cloud: CloudParameters,
    pub devices: Vec<DeviceParameters>,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and checks a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration in toml format
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.cloud.token.trim().is_empty() {
        return Err(ConfigError::from("cloud token is empty"));
    }
    if config.devices.is_empty() {
        return Err(ConfigError::from("no devices configured"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;

    const CONFIG: &str = r#"
        [general]
        log_path = "/var/log/tplink-emeter.log"
        log_level = "debug"
        log_to_stdout = false

        [cloud]
        token = "a1b2c3"

        [[devices]]
        alias = "Dryer"
        device_id = "80061F9B"
        model = "HS110(EU)"

        [[devices]]
        alias = "Desk outlet 1"
        device_id = "8006AF35"
        model = "HS300(US)"
        child_id = "8006AF3500"
    "#;

    #[test]
    fn defaults_are_applied() {
        let config = parse_config(CONFIG).unwrap();

        assert_eq!(config.cloud.app_server_url, "https://wap.tplinkcloud.com");
        assert_eq!(config.cloud.timeout_secs, 30);
        assert_eq!(config.general.log_level, LevelFilter::Debug);
    }

    #[test]
    fn devices_are_resolved() {
        let config = parse_config(CONFIG).unwrap();
        let devices = config.devices.iter().map(|d| d.to_device()).collect::<Vec<Device>>();

        assert_eq!(devices[0].kind, DeviceKind::EmeterPlug);
        assert_eq!(devices[0].child_id, None);
        assert_eq!(devices[1].kind, DeviceKind::EmeterPowerStrip);
        assert_eq!(devices[1].child_id.as_deref(), Some("8006AF3500"));
    }

    #[test]
    fn empty_token_is_rejected() {
        let toml = CONFIG.replace("\"a1b2c3\"", "\" \"");

        assert!(matches!(parse_config(&toml), Err(ConfigError::Content(_))));
    }

    #[test]
    fn missing_section_is_a_document_error() {
        let toml = "[general]\nlog_path = \"x\"\nlog_level = \"info\"\nlog_to_stdout = true\n";

        assert!(matches!(parse_config(toml), Err(ConfigError::Document(_))));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        assert!(matches!(load_config("/nonexistent/tplink-emeter.toml"), Err(ConfigError::File(_))));
    }
}
