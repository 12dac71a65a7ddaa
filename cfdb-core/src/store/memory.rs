use std::collections::{BTreeMap, BTreeSet};

use parking_lot::{Mutex, RwLock};

use super::{Backend, Error, RegionId, Result};

type Region = BTreeMap<String, Vec<u8>>;

/// A volatile backend that keeps all regions in memory.
///
/// Used for testing and for running the service without
/// a database file.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    claimed: Mutex<BTreeSet<RegionId>>,
    regions: RwLock<BTreeMap<RegionId, Region>>,
}

impl Backend for MemoryBackend {
    fn claim(&self, region: RegionId) -> Result<()> {
        if !self.claimed.lock().insert(region) {
            return Err(Error::RegionInUse(region));
        }
        Ok(())
    }

    fn read(&self, region: RegionId, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .regions
            .read()
            .get(&region)
            .and_then(|r| r.get(key))
            .cloned())
    }

    fn write(&self, region: RegionId, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        Ok(self
            .regions
            .write()
            .entry(region)
            .or_default()
            .insert(key.to_owned(), value))
    }

    fn update<F>(&self, region: RegionId, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Option<Vec<u8>>>,
    {
        let mut regions = self.regions.write();
        let region = regions.entry(region).or_default();
        if let Some(value) = f(region.get(key).cloned())? {
            region.insert(key.to_owned(), value);
        }
        Ok(())
    }

    fn scan(&self, region: RegionId) -> Result<Vec<(String, Vec<u8>)>> {
        Ok(self
            .regions
            .read()
            .get(&region)
            .map(|r| r.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}
