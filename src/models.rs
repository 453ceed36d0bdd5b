use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_CATEGORIES: [&str; 8] = [
    "犬",
    "猫",
    "うさぎ",
    "ハムスター",
    "鳥",
    "魚",
    "カメ",
    "フェレット",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Pet types offered by the selector, in display order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            categories: default_categories(),
            log_filter: default_log_filter(),
        }
    }
}
