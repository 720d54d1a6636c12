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
use crate::models::ConsumerGroupDetails;
use crate::streaming::consumer_groups::{ConsumerGroup, RebalancingStrategy};
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::info;

impl System {
    /// Creates a consumer group permanently bound to an existing topic.
    pub fn create_consumer_group(
        &self,
        group_id: &str,
        topic_id: &str,
        strategy: RebalancingStrategy,
    ) -> Result<Arc<ConsumerGroup>, MillstreamError> {
        let topic = self.find_topic(topic_id)?;
        match self.consumer_groups.entry(group_id.to_owned()) {
            Entry::Occupied(_) => Err(MillstreamError::ConsumerGroupIdAlreadyExists(
                group_id.to_owned(),
            )),
            Entry::Vacant(entry) => {
                let group = Arc::new(ConsumerGroup::new(group_id, topic, strategy));
                entry.insert(group.clone());
                info!(
                    "{COMPONENT} - created consumer group with ID: {group_id} on topic with ID: {topic_id}, strategy: {strategy}"
                );
                Ok(group)
            }
        }
    }

    /// Adds a consumer to a group and rebalances it. Consumer ids are unique
    /// across the whole system so consumers can be addressed directly.
    pub fn create_consumer(
        &self,
        group_id: &str,
        consumer_id: &str,
    ) -> Result<(), MillstreamError> {
        let group = self.find_consumer_group(group_id)?;
        match self.consumers.entry(consumer_id.to_owned()) {
            Entry::Occupied(_) => Err(MillstreamError::ConsumerIdAlreadyExists(
                consumer_id.to_owned(),
            )),
            Entry::Vacant(entry) => {
                group.add_consumer(consumer_id)?;
                entry.insert(group_id.to_owned());
                info!(
                    "{COMPONENT} - created consumer with ID: {consumer_id} in consumer group with ID: {group_id}"
                );
                Ok(())
            }
        }
    }

    /// Removes a consumer from its group and rebalances the remaining
    /// membership.
    pub fn delete_consumer(&self, consumer_id: &str) -> Result<(), MillstreamError> {
        let group = self.find_group_of_consumer(consumer_id)?;
        group.remove_consumer(consumer_id)?;
        self.consumers.remove(consumer_id);
        info!(
            "{COMPONENT} - deleted consumer with ID: {consumer_id} from consumer group with ID: {}",
            group.id()
        );
        Ok(())
    }

    /// Replaces a group's rebalancing strategy and rebalances it.
    pub fn set_rebalancing_strategy(
        &self,
        group_id: &str,
        strategy: RebalancingStrategy,
    ) -> Result<(), MillstreamError> {
        let group = self.find_consumer_group(group_id)?;
        group.set_strategy(strategy);
        Ok(())
    }

    /// Structured snapshot of a group: strategy, membership order, per-member
    /// assignment and history.
    pub fn consumer_group_details(
        &self,
        group_id: &str,
    ) -> Result<ConsumerGroupDetails, MillstreamError> {
        let group = self.find_consumer_group(group_id)?;
        Ok(group.details())
    }
}
