use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use spdlog::debug;

use crate::catalog::Catalog;

pub enum Expire {
    Never,
    After(Duration),
}

struct CachedCatalog {
    expire_date: DateTime<Utc>,
    value: Arc<Catalog>,
}

/// Keeps one built catalog for a revalidation interval. On expiry the
/// catalog is rebuilt as a whole, there are no partial updates.
pub struct CatalogCache {
    expire_after: Option<Expire>,
    cached: RwLock<Option<CachedCatalog>>,
}

impl CatalogCache {
    pub fn new(expire_after: Expire) -> Self {
        CatalogCache {
            expire_after: Some(expire_after),
            cached: RwLock::new(None),
        }
    }

    /// Rebuilds on every call.
    pub fn non_caching() -> Self {
        CatalogCache {
            expire_after: None,
            cached: RwLock::new(None),
        }
    }

    /// The cached catalog while it is fresh, otherwise the result of `build`.
    /// A failed build leaves the cache empty and returns the error.
    pub fn get_or_build<E, F>(&self, build: F) -> Result<Arc<Catalog>, E>
    where
        F: FnOnce() -> Result<Catalog, E>,
    {
        let Some(ref expire_after) = self.expire_after else {
            return build().map(Arc::new);
        };

        if let Some(catalog) = self.get() {
            return Ok(catalog);
        }

        let mut cached = self.cached.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        // another caller may have rebuilt while we waited for the lock
        if let Some(ref current) = *cached {
            if Utc::now() <= current.expire_date {
                return Ok(current.value.clone());
            }
        }

        *cached = None;
        debug!("Rebuilding catalog");
        let value = Arc::new(build()?);
        let expire_date = match expire_after {
            Expire::Never => DateTime::<Utc>::MAX_UTC,
            Expire::After(duration) => Utc::now()
                .checked_add_signed(*duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        *cached = Some(CachedCatalog {
            expire_date,
            value: value.clone(),
        });
        Ok(value)
    }

    pub fn get(&self) -> Option<Arc<Catalog>> {
        let cached = self.cached.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        match *cached {
            Some(ref current) if Utc::now() <= current.expire_date => Some(current.value.clone()),
            _ => None,
        }
    }

    pub fn invalidate(&self) {
        let mut cached = self.cached.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *cached = None;
    }
}
