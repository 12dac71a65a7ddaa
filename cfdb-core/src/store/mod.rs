// Persistent key-value storage.
// A `Backend` is an opaque, byte-oriented ordered map that is
// partitioned into numbered regions. Each entity type owns exactly
// one region and accesses it through a typed `StableMap`.

use std::{fmt, marker::PhantomData, sync::Arc};

use thiserror::Error;

use crate::entities::{Course, Feedback};

mod codec;
mod memory;

pub use self::{codec::Record, memory::MemoryBackend};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The key has {len} bytes and exceeds the limit of {max} bytes")]
    KeyTooLarge { len: usize, max: usize },
    #[error("The serialized record has {len} bytes and exceeds the limit of {max} bytes")]
    ValueTooLarge { len: usize, max: usize },
    #[error("Region {0} is already in use")]
    RegionInUse(RegionId),
    #[error(transparent)]
    Codec(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the part of the persistent address space
/// that is occupied by a single store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u8);

impl RegionId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for RegionId {
    fn from(from: u8) -> Self {
        Self(from)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub region: RegionId,
    /// Upper bound for the size of a key in bytes
    pub max_key_size: usize,
    /// Upper bound for the size of a serialized record in bytes
    pub max_value_size: usize,
}

impl StoreConfig {
    pub const COURSES: Self = Self {
        region: RegionId::new(0),
        max_key_size: 44,
        max_value_size: 1024,
    };

    pub const FEEDBACK: Self = Self {
        region: RegionId::new(1),
        max_key_size: 45,
        max_value_size: 1024,
    };
}

/// Low-level storage engine.
///
/// Implementations must apply every `write` and `update` atomically:
/// either the whole value is stored or the region is left untouched.
pub trait Backend {
    /// Reserves a region for exclusive use by a single store.
    fn claim(&self, region: RegionId) -> Result<()>;

    fn read(&self, region: RegionId, key: &str) -> Result<Option<Vec<u8>>>;

    /// Inserts or replaces a value and returns the replaced value.
    fn write(&self, region: RegionId, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>>;

    /// Reads the current value and replaces it with the result of `f`
    /// in a single step. No other `write` or `update` of the same key
    /// may happen in between, not even from another process.
    ///
    /// If `f` returns `None` or fails nothing is written.
    fn update<F>(&self, region: RegionId, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Option<Vec<u8>>>;

    /// All entries of a region in ascending key order.
    fn scan(&self, region: RegionId) -> Result<Vec<(String, Vec<u8>)>>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn claim(&self, region: RegionId) -> Result<()> {
        (**self).claim(region)
    }
    fn read(&self, region: RegionId, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(region, key)
    }
    fn write(&self, region: RegionId, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        (**self).write(region, key, value)
    }
    fn update<F>(&self, region: RegionId, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Option<Vec<u8>>>,
    {
        (**self).update(region, key, f)
    }
    fn scan(&self, region: RegionId) -> Result<Vec<(String, Vec<u8>)>> {
        (**self).scan(region)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn claim(&self, region: RegionId) -> Result<()> {
        (**self).claim(region)
    }
    fn read(&self, region: RegionId, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(region, key)
    }
    fn write(&self, region: RegionId, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        (**self).write(region, key, value)
    }
    fn update<F>(&self, region: RegionId, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Option<Vec<u8>>>,
    {
        (**self).update(region, key, f)
    }
    fn scan(&self, region: RegionId) -> Result<Vec<(String, Vec<u8>)>> {
        (**self).scan(region)
    }
}

/// Typed access to the records of a single entity type.
pub trait RecordStore<T> {
    fn get(&self, key: &str) -> Result<Option<T>>;

    /// Inserts or overwrites a record and returns the previous one.
    fn insert(&self, key: &str, record: &T) -> Result<Option<T>>;

    /// Atomically replaces an existing record with the result of `f`
    /// and returns the new record, or `None` if there is no record
    /// for `key`.
    fn modify<F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(T) -> Result<T>;

    /// A snapshot of all records in ascending key order.
    fn values(&self) -> Result<Vec<T>>;

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T, S: RecordStore<T> + ?Sized> RecordStore<T> for &S {
    fn get(&self, key: &str) -> Result<Option<T>> {
        (**self).get(key)
    }
    fn insert(&self, key: &str, record: &T) -> Result<Option<T>> {
        (**self).insert(key, record)
    }
    fn modify<F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(T) -> Result<T>,
    {
        (**self).modify(key, f)
    }
    fn values(&self) -> Result<Vec<T>> {
        (**self).values()
    }
    fn contains_key(&self, key: &str) -> Result<bool> {
        (**self).contains_key(key)
    }
}

impl<T, S: RecordStore<T> + ?Sized> RecordStore<T> for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<T>> {
        (**self).get(key)
    }
    fn insert(&self, key: &str, record: &T) -> Result<Option<T>> {
        (**self).insert(key, record)
    }
    fn modify<F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(T) -> Result<T>,
    {
        (**self).modify(key, f)
    }
    fn values(&self) -> Result<Vec<T>> {
        (**self).values()
    }
    fn contains_key(&self, key: &str) -> Result<bool> {
        (**self).contains_key(key)
    }
}

/// A durable ordered map from string keys to records of type `T`
/// that occupies a single region of a [`Backend`].
pub struct StableMap<T, B> {
    backend: B,
    config: StoreConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T, B> fmt::Debug for StableMap<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StableMap")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Record, B: Backend> StableMap<T, B> {
    pub fn open(backend: B, config: StoreConfig) -> Result<Self> {
        backend.claim(config.region)?;
        log::debug!(
            "Opened {} store in region {} (max. key size = {}, max. value size = {})",
            T::KIND,
            config.region,
            config.max_key_size,
            config.max_value_size
        );
        Ok(Self {
            backend,
            config,
            _record: PhantomData,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.backend.scan(self.config.region)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn encode_checked(&self, key: &str, record: &T) -> Result<Vec<u8>> {
        let bytes = record.encode()?;
        let max = self.config.max_value_size;
        if bytes.len() > max {
            log::warn!(
                "Rejected {} record {key} with {} bytes (max. {max} bytes)",
                T::KIND,
                bytes.len()
            );
            return Err(Error::ValueTooLarge {
                len: bytes.len(),
                max,
            });
        }
        Ok(bytes)
    }

    fn check_key(&self, key: &str) -> Result<()> {
        let max = self.config.max_key_size;
        if key.len() > max {
            return Err(Error::KeyTooLarge {
                len: key.len(),
                max,
            });
        }
        Ok(())
    }
}

impl<T: Record, B: Backend> RecordStore<T> for StableMap<T, B> {
    fn get(&self, key: &str) -> Result<Option<T>> {
        self.backend
            .read(self.config.region, key)?
            .map(|bytes| T::decode(&bytes))
            .transpose()
            .map_err(Into::into)
    }

    fn insert(&self, key: &str, record: &T) -> Result<Option<T>> {
        self.check_key(key)?;
        let bytes = self.encode_checked(key, record)?;
        self.backend
            .write(self.config.region, key, bytes)?
            .map(|bytes| T::decode(&bytes))
            .transpose()
            .map_err(Into::into)
    }

    fn modify<F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(T) -> Result<T>,
    {
        self.check_key(key)?;
        let mut modified = None;
        self.backend.update(self.config.region, key, |current| {
            let Some(bytes) = current else {
                return Ok(None);
            };
            let record = f(T::decode(&bytes)?)?;
            let bytes = self.encode_checked(key, &record)?;
            modified = Some(record);
            Ok(Some(bytes))
        })?;
        Ok(modified)
    }

    fn values(&self) -> Result<Vec<T>> {
        self.backend
            .scan(self.config.region)?
            .into_iter()
            .map(|(_, bytes)| T::decode(&bytes).map_err(Into::into))
            .collect()
    }
}

/// The record stores of the service, one per entity type.
#[derive(Debug)]
pub struct Stores<B> {
    pub courses: StableMap<Course, B>,
    pub feedback: StableMap<Feedback, B>,
}

impl<B: Backend + Clone> Stores<B> {
    pub fn open(backend: B, courses: StoreConfig, feedback: StoreConfig) -> Result<Self> {
        let courses = StableMap::open(backend.clone(), courses)?;
        let feedback = StableMap::open(backend, feedback)?;
        Ok(Self { courses, feedback })
    }

    pub fn open_default(backend: B) -> Result<Self> {
        Self::open(backend, StoreConfig::COURSES, StoreConfig::FEEDBACK)
    }
}
