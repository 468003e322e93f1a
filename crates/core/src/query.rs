// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queries over the merged entries dataset.
//!
//! A [`Query`] collects validated filter applications and combines them with
//! logical AND. [`Query::result`] rescans the source on every call, so a
//! query can be reused after the underlying data changes.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::filter::ActiveFilter;
use crate::operator::Operator;
use crate::registry::FilterRegistry;
use crate::source::{CustomFieldSource, EntrySource};

/// An ordered list of active filters over an entry source.
pub struct Query<'a, S: ?Sized, C = SystemClock> {
    source: &'a S,
    registry: &'a FilterRegistry,
    clock: C,
    filters: Vec<ActiveFilter>,
}

impl<'a, S> Query<'a, S>
where
    S: EntrySource + CustomFieldSource + ?Sized,
{
    /// Creates an unfiltered query using the global registry and system clock.
    pub fn new(source: &'a S) -> Self {
        Query {
            source,
            registry: FilterRegistry::global(),
            clock: SystemClock,
            filters: Vec::new(),
        }
    }
}

impl<'a, S, C> Query<'a, S, C>
where
    S: EntrySource + CustomFieldSource + ?Sized,
    C: Clock,
{
    /// Resolve filters through `registry` instead of the global one.
    pub fn with_registry(mut self, registry: &'a FilterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Evaluate date-relative operators against `clock`.
    pub fn with_clock<K: Clock>(self, clock: K) -> Query<'a, S, K> {
        Query {
            source: self.source,
            registry: self.registry,
            clock,
            filters: self.filters,
        }
    }

    /// Append a filter given by operator symbol.
    ///
    /// An unrecognized symbol is reported as unsupported by the field.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownFilter`] if `field` does not resolve.
    /// - [`Error::UnsupportedOperator`] if the field does not accept `operator`.
    /// - [`Error::InvalidOperand`] if `values` do not fit the operator.
    pub fn filter<V: AsRef<str>>(
        &mut self,
        field: &str,
        operator: &str,
        values: &[V],
    ) -> Result<&mut Self> {
        let filter = self.registry.resolve(field, self.source)?;
        let operator: Operator = operator.parse().map_err(|_| Error::UnsupportedOperator {
            field: filter.name.clone(),
            operator: operator.to_string(),
            available: filter.operators.to_string(),
        })?;
        let active = filter.apply(operator, values)?;
        debug!(field, %operator, operands = ?active.operands(), "applied filter");
        self.filters.push(active);
        Ok(self)
    }

    /// Append a filter given by operator.
    pub fn filter_op<V: AsRef<str>>(
        &mut self,
        field: &str,
        operator: Operator,
        values: &[V],
    ) -> Result<&mut Self> {
        self.filter(field, operator.symbol(), values)
    }

    /// The active filters, in application order.
    pub fn filters(&self) -> &[ActiveFilter] {
        &self.filters
    }

    /// Scan the source and keep entries passing every filter.
    pub fn result(&self) -> Result<QueryResult> {
        let started = Instant::now();
        let today = self.clock.today();
        let raw = self.source.scan()?;
        let scanned = raw.len();

        let mut entries = Vec::new();
        for record in raw {
            let kind = record.kind();
            let entry = record.normalize().inspect_err(|e| warn!(%kind, "{e}"))?;
            if self.filters.iter().all(|f| f.matches(&entry, today)) {
                entries.push(entry);
            }
        }

        debug!(
            scanned,
            matched = entries.len(),
            filters = self.filters.len(),
            elapsed_us = started.elapsed().as_micros(),
            "query result"
        );
        Ok(QueryResult { entries })
    }
}

/// Entries matching a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryResult {
    entries: Vec<Entry>,
}

impl QueryResult {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Sum of real costs; entries without costs count as zero.
    pub fn total_costs(&self) -> f64 {
        self.entries.iter().filter_map(Entry::real_costs).sum()
    }
}

impl IntoIterator for QueryResult {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'r> IntoIterator for &'r QueryResult {
    type Item = &'r Entry;
    type IntoIter = std::slice::Iter<'r, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
