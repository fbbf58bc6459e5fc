use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// The two roles a store entry can carry. Human entries are authored locally,
/// generated entries are assembled from stream fragments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    Human,
    Generated,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::Human => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return String::from("You");
                }
                return username;
            }
            Author::Generated => {
                let model = Config::get(ConfigKey::Model);
                if model.is_empty() {
                    return String::from("Assistant");
                }
                return model;
            }
        }
    }
}
