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
use crate::streaming::events::Event;
use crate::streaming::partitions::PolledEvents;
use std::sync::Arc;
use tracing::debug;

impl System {
    /// Delivers up to `count` events from a partition owned by the given
    /// consumer, advancing the group offset and recording the delivery in the
    /// consumer's history.
    pub fn consume_events(
        &self,
        consumer_id: &str,
        partition_id: &str,
        count: usize,
    ) -> Result<PolledEvents, MillstreamError> {
        let group = self.find_group_of_consumer(consumer_id)?;
        let polled = group.consume(consumer_id, partition_id, count)?;
        debug!(
            "{COMPONENT} - consumer with ID: {consumer_id} consumed {} events from partition with ID: {partition_id}",
            polled.events.len()
        );
        Ok(polled)
    }

    /// Rewinds the group offset on an owned partition and re-delivers the
    /// previously consumed range to the consumer. The group's net position is
    /// unchanged once the replay completes.
    pub fn replay(
        &self,
        consumer_id: &str,
        partition_id: &str,
        from: usize,
    ) -> Result<Vec<Arc<Event>>, MillstreamError> {
        let group = self.find_group_of_consumer(consumer_id)?;
        let redelivered = group.replay(consumer_id, partition_id, from)?;
        debug!(
            "{COMPONENT} - consumer with ID: {consumer_id} replayed {} events from partition with ID: {partition_id} starting at offset: {from}",
            redelivered.len()
        );
        Ok(redelivered)
    }
}
