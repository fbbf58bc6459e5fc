#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;

use crate::domain::models::ChannelName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConnectTimeoutMillis,
    Model,
    SseURL,
    Transport,
    Username,
    WebsocketURL,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        let default_transport = ChannelName::Websocket.to_string();

        let res = match key {
            ConfigKey::ConnectTimeoutMillis => "1000",
            ConfigKey::Model => "gpt-4",
            ConfigKey::SseURL => "http://localhost:8000",
            ConfigKey::Transport => &default_transport,
            ConfigKey::WebsocketURL => "ws://localhost:8000/ws",

            // Covered above.
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub fn load(clap_arg_matches: Vec<&ArgMatches>) {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            transport = Config::get(ConfigKey::Transport),
            model = Config::get(ConfigKey::Model),
            websocket_url = Config::get(ConfigKey::WebsocketURL),
            sse_url = Config::get(ConfigKey::SseURL),
            "config"
        );
    }
}
