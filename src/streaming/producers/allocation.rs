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
use crate::streaming::events::Event;
use crate::streaming::partitions::Partition;
use crate::streaming::topics::Topic;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decides which partition of a topic receives a newly produced event.
///
/// Selection is stateless. Value kind compatibility is not checked here -
/// the producer validates it before a strategy is ever invoked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AllocationStrategy {
    /// Uniformly random pick among the topic's partitions; the event key is
    /// ignored.
    Random,
    /// The event key names the target partition id.
    Manual,
}

impl AllocationStrategy {
    /// Selects exactly one partition and appends the event there, or fails
    /// without touching any partition.
    pub fn allocate(
        &self,
        topic: &Topic,
        event: &Arc<Event>,
    ) -> Result<Arc<Partition>, MillstreamError> {
        let partition = self.select(topic, event)?;
        partition.append(event.clone());
        Ok(partition)
    }

    fn select(&self, topic: &Topic, event: &Event) -> Result<Arc<Partition>, MillstreamError> {
        match self {
            AllocationStrategy::Random => {
                let partitions = topic.partitions();
                if partitions.is_empty() {
                    return Err(MillstreamError::CannotAllocateEventNoPartitions(
                        topic.id().to_owned(),
                    ));
                }
                let index = rand::thread_rng().gen_range(0..partitions.len());
                Ok(partitions[index].clone())
            }
            AllocationStrategy::Manual => topic.partition(event.key()).ok_or_else(|| {
                MillstreamError::CannotAllocateEventUnknownPartition(
                    event.key().to_owned(),
                    topic.id().to_owned(),
                )
            }),
        }
    }
}
