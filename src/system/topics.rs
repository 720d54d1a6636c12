/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use super::{COMPONENT, System};
use crate::error::MillstreamError;
use crate::models::{PartitionDetails, TopicDetails};
use crate::streaming::events::ValueKind;
use crate::streaming::topics::Topic;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::info;

impl System {
    /// Creates an empty topic with a fixed value kind.
    pub fn create_topic(
        &self,
        topic_id: &str,
        kind: ValueKind,
    ) -> Result<Arc<Topic>, MillstreamError> {
        match self.topics.entry(topic_id.to_owned()) {
            Entry::Occupied(_) => Err(MillstreamError::TopicIdAlreadyExists(topic_id.to_owned())),
            Entry::Vacant(entry) => {
                let topic = Arc::new(Topic::new(topic_id, kind));
                entry.insert(topic.clone());
                info!("{COMPONENT} - created topic with ID: {topic_id}, kind: {kind}");
                Ok(topic)
            }
        }
    }

    /// Creates a partition inside an existing topic.
    pub fn create_partition(
        &self,
        topic_id: &str,
        partition_id: &str,
    ) -> Result<(), MillstreamError> {
        let topic = self.find_topic(topic_id)?;
        topic.create_partition(partition_id)?;
        info!("{COMPONENT} - created partition with ID: {partition_id} in topic with ID: {topic_id}");
        Ok(())
    }

    /// Structured snapshot of a topic: its partitions in creation order, each
    /// with its full log and per-group offsets.
    pub fn topic_details(&self, topic_id: &str) -> Result<TopicDetails, MillstreamError> {
        let topic = self.find_topic(topic_id)?;
        Ok(TopicDetails {
            id: topic.id().to_owned(),
            kind: topic.kind(),
            created_at: topic.created_at(),
            partitions: topic
                .partitions()
                .iter()
                .map(|partition| PartitionDetails {
                    id: partition.id().to_owned(),
                    created_at: partition.created_at(),
                    events: partition
                        .events()
                        .iter()
                        .map(|event| (**event).clone())
                        .collect(),
                    offsets: partition.offsets(),
                })
                .collect(),
        })
    }
}
