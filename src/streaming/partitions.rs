// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::streaming::events::Event;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const OFFSETS_CAPACITY: usize = 16;

/// Result of a single poll against a partition.
///
/// `exhausted` is set whenever the end of the log was reached before the
/// requested count was delivered. An empty batch with `exhausted` set is the
/// non-fatal "nothing left to read" condition - the caller decides whether to
/// retry later once more events have been appended.
#[derive(Debug, Default)]
pub struct PolledEvents {
    pub events: Vec<Arc<Event>>,
    pub exhausted: bool,
}

#[derive(Debug, Default)]
struct PartitionLog {
    events: Vec<Arc<Event>>,
    // Next-read index per consumer group. Offsets live here, not on the
    // consumer, so reassigning the partition never resets group progress.
    offsets: AHashMap<String, usize>,
}

/// Ordered, append-only event log with per-consumer-group read offsets.
///
/// One mutex guards the log together with the offset map: appends are
/// linearizable per partition, and the read-offset/deliver/advance step of
/// [`Partition::poll`] is a single critical section per (partition, group)
/// pair. Two different partitions never contend with each other.
#[derive(Debug)]
pub struct Partition {
    id: String,
    created_at: DateTime<Utc>,
    log: Mutex<PartitionLog>,
}

impl Partition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            log: Mutex::new(PartitionLog {
                events: Vec::new(),
                offsets: AHashMap::with_capacity(OFFSETS_CAPACITY),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends an event at the tail of the log. Never fails; value kind
    /// validation happens one level up, before allocation.
    pub fn append(&self, event: Arc<Event>) {
        let mut log = self.lock();
        log.events.push(event);
    }

    /// Delivers up to `count` events for the given consumer group, starting at
    /// its stored offset (0 when unknown), and advances the offset by the
    /// number of events actually delivered.
    pub fn poll(&self, group_id: &str, count: usize) -> PolledEvents {
        let mut log = self.lock();
        let offset = log.offsets.get(group_id).copied().unwrap_or(0);
        let end = log.events.len().min(offset.saturating_add(count));
        let start = end.min(offset);
        let events: Vec<_> = log.events[start..end].to_vec();
        let exhausted = end == log.events.len() && events.len() < count;
        log.offsets.insert(group_id.to_owned(), end);
        PolledEvents { events, exhausted }
    }

    /// Overwrites the stored offset for the given consumer group, clamping to
    /// the current log length so the offset invariant `0 <= offset <= len`
    /// always holds.
    pub fn seek(&self, group_id: &str, offset: usize) {
        let mut log = self.lock();
        let clamped = offset.min(log.events.len());
        log.offsets.insert(group_id.to_owned(), clamped);
    }

    /// Stored offset for the given consumer group, 0 when unknown.
    pub fn current_offset(&self, group_id: &str) -> usize {
        self.lock().offsets.get(group_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Snapshot of the whole log in append order.
    pub fn events(&self) -> Vec<Arc<Event>> {
        self.lock().events.clone()
    }

    /// Snapshot of the per-group offsets, ordered by group id.
    pub fn offsets(&self) -> BTreeMap<String, usize> {
        self.lock()
            .offsets
            .iter()
            .map(|(group_id, offset)| (group_id.clone(), *offset))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PartitionLog> {
        self.log.lock().expect("partition lock poisoned")
    }
}
