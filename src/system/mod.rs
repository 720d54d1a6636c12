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

//! Process-wide context: id-keyed registries plus the full operation surface,
//! one file per operation family.

mod consumer_groups;
mod messages;
mod producers;
mod topics;

use crate::error::MillstreamError;
use crate::streaming::consumer_groups::ConsumerGroup;
use crate::streaming::producers::Producer;
use crate::streaming::topics::Topic;
use dashmap::DashMap;
use std::sync::Arc;

pub(crate) const COMPONENT: &str = "SYSTEM";

/// The process-wide context. Starts empty; topics, producers and consumer
/// groups are registered under their string ids with O(1) lookup. There is no
/// teardown - entities live for as long as the system does.
///
/// The registries only need coarse protection on creation; lookups are
/// unrestricted and all entity-level synchronization lives inside the
/// entities themselves.
#[derive(Debug, Default)]
pub struct System {
    topics: DashMap<String, Arc<Topic>>,
    producers: DashMap<String, Arc<Producer>>,
    consumer_groups: DashMap<String, Arc<ConsumerGroup>>,
    // Consumer id -> owning group id, so consumers are addressable directly.
    consumers: DashMap<String, String>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn find_topic(&self, topic_id: &str) -> Result<Arc<Topic>, MillstreamError> {
        self.topics
            .get(topic_id)
            .map(|topic| topic.clone())
            .ok_or_else(|| MillstreamError::TopicIdNotFound(topic_id.to_owned()))
    }

    pub(crate) fn find_producer(
        &self,
        producer_id: &str,
    ) -> Result<Arc<Producer>, MillstreamError> {
        self.producers
            .get(producer_id)
            .map(|producer| producer.clone())
            .ok_or_else(|| MillstreamError::ProducerIdNotFound(producer_id.to_owned()))
    }

    pub(crate) fn find_consumer_group(
        &self,
        group_id: &str,
    ) -> Result<Arc<ConsumerGroup>, MillstreamError> {
        self.consumer_groups
            .get(group_id)
            .map(|group| group.clone())
            .ok_or_else(|| MillstreamError::ConsumerGroupIdNotFound(group_id.to_owned()))
    }

    /// Resolves the group a consumer belongs to via the consumer index.
    pub(crate) fn find_group_of_consumer(
        &self,
        consumer_id: &str,
    ) -> Result<Arc<ConsumerGroup>, MillstreamError> {
        let group_id = self
            .consumers
            .get(consumer_id)
            .map(|group_id| group_id.clone())
            .ok_or_else(|| MillstreamError::ConsumerIdNotFound(consumer_id.to_owned()))?;
        self.find_consumer_group(&group_id)
    }
}
