use anyhow::{anyhow, Result};
use cfdb_core::{
    entities::RatingValue,
    policy::{CallerTracking, PayloadValidation, Policy, RatingPolicy, UpdateTracking},
    store::StoreConfig,
};
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "cfdb.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

const IN_MEMORY_DB: &str = ":memory:";

/// Length of a generated record id (hyphenated UUID).
const MIN_KEY_SIZE: usize = 36;

#[derive(Debug)]
pub struct Config {
    pub db: Db,
    pub stores: Stores,
    pub policy: Policy,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::load_default()?
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }

    /// Overrides the SQLite connection string.
    pub fn set_db_url(&mut self, url: String) {
        self.db.conn_sqlite = url;
    }

    /// The effective pool size for the configured database.
    pub fn db_pool_size(&self) -> u32 {
        // Each connection to an in-memory database opens a different database
        if self.db.conn_sqlite == IN_MEMORY_DB && self.db.conn_pool_size > 1 {
            log::warn!(
                "Limiting the connection pool size for {IN_MEMORY_DB} from {} to 1",
                self.db.conn_pool_size
            );
            return 1;
        }
        self.db.conn_pool_size
    }
}

#[derive(Debug)]
pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
}

#[derive(Debug)]
pub struct Stores {
    pub courses: StoreConfig,
    pub feedback: StoreConfig,
}

fn store_config(from: Option<raw::Store>, default: StoreConfig, name: &str) -> Result<StoreConfig> {
    let Some(raw::Store {
        region,
        max_key_size,
        max_value_size,
    }) = from
    else {
        return Ok(default);
    };
    if max_value_size == 0 {
        return Err(anyhow!("The value size limit of the {name} store must be positive"));
    }
    if max_key_size < MIN_KEY_SIZE {
        return Err(anyhow!(
            "The key size limit of the {name} store is {max_key_size} bytes, \
             but generated ids need {MIN_KEY_SIZE} bytes"
        ));
    }
    Ok(StoreConfig {
        region: region.into(),
        max_key_size,
        max_value_size,
    })
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, stores, policy } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = match db {
            Some(db) => db,
            None => raw::Config::load_default()?
                .db
                .ok_or_else(|| anyhow!("Missing default database configuration"))?,
        };
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool size must be positive"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Stores { courses, feedback } = stores.unwrap_or_default();
        let courses = store_config(courses, StoreConfig::COURSES, "courses")?;
        let feedback = store_config(feedback, StoreConfig::FEEDBACK, "feedback")?;
        if courses.region == feedback.region {
            return Err(anyhow!(
                "The courses and feedback stores must not share region {}",
                courses.region
            ));
        }
        let stores = Stores { courses, feedback };

        let raw::Policy {
            rating,
            rating_min,
            rating_max,
            payload_validation,
            track_caller,
            track_updates,
        } = policy.unwrap_or_default();

        let rating = match rating.unwrap_or(raw::Rating::Bounded) {
            raw::Rating::Bounded => {
                let min = rating_min.map(RatingValue::new).unwrap_or_else(RatingValue::min);
                let max = rating_max.map(RatingValue::new).unwrap_or_else(RatingValue::max);
                if min > max {
                    return Err(anyhow!("Invalid rating range [{min}, {max}]"));
                }
                RatingPolicy::Bounded { min, max }
            }
            raw::Rating::Unbounded => RatingPolicy::Unbounded,
        };
        let payload = match payload_validation.unwrap_or(raw::PayloadValidation::Strict) {
            raw::PayloadValidation::Strict => PayloadValidation::Strict,
            raw::PayloadValidation::Permissive => PayloadValidation::Permissive,
        };
        let caller = if track_caller.unwrap_or(true) {
            CallerTracking::Record
        } else {
            CallerTracking::Omit
        };
        let updates = if track_updates.unwrap_or(true) {
            UpdateTracking::Record
        } else {
            UpdateTracking::Omit
        };
        let policy = Policy {
            rating,
            payload,
            caller,
            updates,
        };

        Ok(Self { db, stores, policy })
    }
}
