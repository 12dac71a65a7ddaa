use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("cfdb.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub stores: Option<Stores>,
    pub policy: Option<Policy>,
}

impl Config {
    pub fn load_default() -> Result<Self, toml::de::Error> {
        toml::from_str(DEFAULT_CONFIG_FILE)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u32,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Stores {
    pub courses: Option<Store>,
    pub feedback: Option<Store>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Store {
    pub region: u8,
    pub max_key_size: usize,
    pub max_value_size: usize,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Policy {
    pub rating: Option<Rating>,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
    pub payload_validation: Option<PayloadValidation>,
    pub track_caller: Option<bool>,
    pub track_updates: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Bounded,
    Unbounded,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadValidation {
    Strict,
    Permissive,
}
