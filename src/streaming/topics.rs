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

use crate::error::MillstreamError;
use crate::streaming::events::ValueKind;
use crate::streaming::partitions::Partition;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

const PARTITIONS_CAPACITY: usize = 16;

/// Named, typed collection of partitions. The value kind is fixed at
/// creation; partitions are kept in creation order and their ids are unique
/// within the topic. Partitions are only ever added, never removed.
#[derive(Debug)]
pub struct Topic {
    id: String,
    kind: ValueKind,
    created_at: DateTime<Utc>,
    partitions: RwLock<Vec<Arc<Partition>>>,
}

impl Topic {
    pub fn new(id: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            id: id.into(),
            kind,
            created_at: Utc::now(),
            partitions: RwLock::new(Vec::with_capacity(PARTITIONS_CAPACITY)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends a new, empty partition. The id must be unique within the topic.
    pub fn create_partition(
        &self,
        partition_id: &str,
    ) -> Result<Arc<Partition>, MillstreamError> {
        let mut partitions = self.write();
        if partitions
            .iter()
            .any(|partition| partition.id() == partition_id)
        {
            return Err(MillstreamError::PartitionIdAlreadyExists(
                partition_id.to_owned(),
                self.id.clone(),
            ));
        }

        let partition = Arc::new(Partition::new(partition_id));
        partitions.push(partition.clone());
        Ok(partition)
    }

    pub fn partition(&self, partition_id: &str) -> Option<Arc<Partition>> {
        self.read()
            .iter()
            .find(|partition| partition.id() == partition_id)
            .cloned()
    }

    /// Snapshot of the partitions in creation order.
    pub fn partitions(&self) -> Vec<Arc<Partition>> {
        self.read().clone()
    }

    /// Snapshot of the partition ids in creation order. Rebalancing relies on
    /// this ordering being stable.
    pub fn partition_ids(&self) -> Vec<String> {
        self.read()
            .iter()
            .map(|partition| partition.id().to_owned())
            .collect()
    }

    pub fn partitions_count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<Partition>>> {
        self.partitions.read().expect("topic partitions lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<Partition>>> {
        self.partitions.write().expect("topic partitions lock poisoned")
    }
}
