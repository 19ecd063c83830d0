use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Service metadata exposed by the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Display name of the service
    #[serde(default = "default_title")]
    pub title: String,
    /// Message returned by the root endpoint
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            greeting: default_greeting(),
        }
    }
}

fn default_title() -> String {
    "Ticket API".to_string()
}

fn default_greeting() -> String {
    "Welcome to the Ticket API".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.service.title, "Ticket API");
        assert_eq!(config.service.greeting, "Welcome to the Ticket API");
    }

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.service.title, "Ticket API");
    }

    #[test]
    fn test_deserialize_service_section() {
        let toml = r#"
[service]
title = "Helpdesk"
greeting = "Hello"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.service.title, "Helpdesk");
        assert_eq!(config.service.greeting, "Hello");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_deserialize_invalid_host_fails() {
        let toml = r#"
[server]
host = "not-an-ip"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
