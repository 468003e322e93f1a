// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The process-wide filter type registry.
//!
//! Static filter types are registered once and live as long as the
//! registry. Custom field filter types form one dynamic snapshot per
//! [`CustomFieldSource::source_id`], keyed by the metadata [`CacheStamp`]:
//! every read compares the source's current stamp with the snapshot's and
//! rebuilds before answering when they differ. Snapshots are swapped in
//! whole behind a [`RwLock`], so readers see either the old set or the new
//! one.
//!
//! [`FilterRegistry::invalidate`] bumps a generation counter. A snapshot
//! built under an older generation is never served again, and a rebuild
//! that overlaps an invalidation is not installed.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use crate::custom_field::{filter_names, CacheStamp};
use crate::error::{Error, Result};
use crate::filter::{static_filters, FilterType};
use crate::source::CustomFieldSource;

/// Custom field filter types built from one metadata stamp.
#[derive(Debug, Default)]
struct DynamicSet {
    stamp: CacheStamp,
    generation: u64,
    filters: Vec<Arc<FilterType>>,
}

impl DynamicSet {
    fn is_current(&self, stamp: CacheStamp, generation: u64) -> bool {
        self.stamp == stamp && self.generation == generation
    }
}

/// Collection of filter types keyed by field name.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    statics: RwLock<Vec<Arc<FilterType>>>,
    dynamic: RwLock<HashMap<String, Arc<DynamicSet>>>,
    generation: AtomicU64,
}

impl FilterRegistry {
    /// Creates a registry holding every static filter type.
    pub fn new() -> Self {
        let registry = FilterRegistry::empty();
        {
            let mut statics = registry.statics.write().unwrap_or_else(|e| e.into_inner());
            statics.extend(static_filters().into_iter().map(Arc::new));
        }
        registry
    }

    /// Creates a registry with no filter types.
    pub fn empty() -> Self {
        FilterRegistry::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static FilterRegistry {
        static GLOBAL: OnceLock<FilterRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FilterRegistry::new)
    }

    /// Register a static filter type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFilter`] if the name is taken.
    pub fn register(&self, filter: FilterType) -> Result<()> {
        let mut statics = self.statics.write().unwrap_or_else(|e| e.into_inner());
        if statics.iter().any(|f| f.name == filter.name) {
            return Err(Error::DuplicateFilter(filter.name));
        }
        debug!(name = %filter.name, "registered filter type");
        statics.push(Arc::new(filter));
        Ok(())
    }

    /// Drop every dynamic snapshot; the next read of each source rebuilds.
    pub fn invalidate(&self) {
        let mut dynamic = self.dynamic.write().unwrap_or_else(|e| e.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        dynamic.clear();
        debug!(generation, "invalidated custom field filters");
    }

    /// Every filter type: static ones first, then custom field ones.
    pub fn all<S: CustomFieldSource + ?Sized>(&self, source: &S) -> Result<Vec<Arc<FilterType>>> {
        let dynamic = self.refresh(source)?;
        let statics = self.statics.read().unwrap_or_else(|e| e.into_inner());
        Ok(statics.iter().chain(dynamic.filters.iter()).cloned().collect())
    }

    /// Only the custom field filter types.
    pub fn custom_field_filters<S: CustomFieldSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Vec<Arc<FilterType>>> {
        Ok(self.refresh(source)?.filters.clone())
    }

    /// Look up a filter type by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFilter`] if neither a static type nor a
    /// current custom field type has that name.
    pub fn resolve<S: CustomFieldSource + ?Sized>(
        &self,
        name: &str,
        source: &S,
    ) -> Result<Arc<FilterType>> {
        {
            let statics = self.statics.read().unwrap_or_else(|e| e.into_inner());
            if let Some(filter) = statics.iter().find(|f| f.name == name) {
                return Ok(Arc::clone(filter));
            }
        }
        self.refresh(source)?
            .filters
            .iter()
            .find(|f| f.name == name)
            .cloned()
            .ok_or_else(|| Error::UnknownFilter(name.to_string()))
    }

    /// The current dynamic snapshot, rebuilt first if the metadata changed.
    fn refresh<S: CustomFieldSource + ?Sized>(&self, source: &S) -> Result<Arc<DynamicSet>> {
        let generation = self.generation.load(Ordering::Acquire);
        let stamp = source.custom_field_stamp()?;
        let source_id = source.source_id();
        {
            let dynamic = self.dynamic.read().unwrap_or_else(|e| e.into_inner());
            if let Some(set) = dynamic
                .get(source_id)
                .filter(|set| set.is_current(stamp, generation))
            {
                return Ok(Arc::clone(set));
            }
        }

        let set = Arc::new(self.build(source, stamp, generation)?);
        let mut dynamic = self.dynamic.write().unwrap_or_else(|e| e.into_inner());
        // invalidate() bumps the generation under this lock
        if self.generation.load(Ordering::Acquire) == generation {
            dynamic.insert(source_id.to_string(), Arc::clone(&set));
            debug!(source_id, %stamp, count = set.filters.len(), "rebuilt custom field filters");
        } else {
            debug!(source_id, %stamp, "invalidated during rebuild, not cached");
        }
        Ok(set)
    }

    fn build<S: CustomFieldSource + ?Sized>(
        &self,
        source: &S,
        stamp: CacheStamp,
        generation: u64,
    ) -> Result<DynamicSet> {
        let mut fields: Vec<_> = source
            .custom_fields()?
            .into_iter()
            .filter(|f| f.is_filterable())
            .collect();
        fields.sort_by_key(|f| f.id);

        let reserved: HashSet<String> = {
            let statics = self.statics.read().unwrap_or_else(|e| e.into_inner());
            statics.iter().map(|f| f.name.clone()).collect()
        };
        let names = filter_names(&fields, &reserved);
        let filters = names
            .into_iter()
            .zip(&fields)
            .map(|(name, field)| Arc::new(FilterType::custom(name, field)))
            .collect();
        Ok(DynamicSet {
            stamp,
            generation,
            filters,
        })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
