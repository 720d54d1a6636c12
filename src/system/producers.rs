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
use crate::streaming::events::{Event, ValueKind};
use crate::streaming::producers::{AllocationStrategy, Producer};
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, info};

impl System {
    /// Registers a producer bound to a value kind and an allocation strategy.
    pub fn create_producer(
        &self,
        producer_id: &str,
        kind: ValueKind,
        allocation: AllocationStrategy,
    ) -> Result<Arc<Producer>, MillstreamError> {
        match self.producers.entry(producer_id.to_owned()) {
            Entry::Occupied(_) => Err(MillstreamError::ProducerIdAlreadyExists(
                producer_id.to_owned(),
            )),
            Entry::Vacant(entry) => {
                let producer = Arc::new(Producer::new(producer_id, kind, allocation));
                entry.insert(producer.clone());
                info!(
                    "{COMPONENT} - created producer with ID: {producer_id}, kind: {kind}, allocation: {allocation}"
                );
                Ok(producer)
            }
        }
    }

    /// Routes an externally decoded event into a topic through the given
    /// producer. Returns the id of the partition that received the event.
    /// On any failure no partition is touched.
    pub fn produce_event(
        &self,
        producer_id: &str,
        topic_id: &str,
        event: Event,
    ) -> Result<String, MillstreamError> {
        let producer = self.find_producer(producer_id)?;
        let topic = self.find_topic(topic_id)?;

        let event_id = event.id().to_owned();
        let partition = producer.produce(&topic, Arc::new(event)).inspect_err(
            |error| {
                debug!(
                    "{COMPONENT} (error: {error}) - failed to produce event with ID: {event_id} to topic with ID: {topic_id}"
                );
            },
        )?;

        debug!(
            "{COMPONENT} - event with ID: {event_id} appended to partition with ID: {} in topic with ID: {topic_id}",
            partition.id()
        );
        Ok(partition.id().to_owned())
    }
}
