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
use crate::models::{ConsumerDetails, ConsumerGroupDetails};
use crate::streaming::consumer_groups::{Consumer, RebalancingStrategy};
use crate::streaming::events::Event;
use crate::streaming::partitions::{Partition, PolledEvents};
use crate::streaming::topics::Topic;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

const MEMBERS_CAPACITY: usize = 8;

#[derive(Debug)]
struct GroupState {
    strategy: RebalancingStrategy,
    // Join order, oldest first. Rebalancing depends on this ordering.
    members: Vec<Consumer>,
}

/// Set of consumers sharing ownership of one topic's partitions under an
/// exchangeable rebalancing strategy. The group is bound to its topic at
/// creation and never re-bound.
///
/// One mutex guards membership, the active strategy and every member's
/// assignment and history. Rebalancing (clear, recompute, install) runs as a
/// single critical section under that mutex, and assignment reads take the
/// same mutex, so no caller ever observes the transiently cleared state.
/// Lock order where nested: group mutex, then topic partition list, then a
/// partition mutex; partitions never lock back into a group.
#[derive(Debug)]
pub struct ConsumerGroup {
    id: String,
    topic: Arc<Topic>,
    created_at: DateTime<Utc>,
    state: Mutex<GroupState>,
}

impl ConsumerGroup {
    pub fn new(id: impl Into<String>, topic: Arc<Topic>, strategy: RebalancingStrategy) -> Self {
        Self {
            id: id.into(),
            topic,
            created_at: Utc::now(),
            state: Mutex::new(GroupState {
                strategy,
                members: Vec::with_capacity(MEMBERS_CAPACITY),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &Arc<Topic> {
        &self.topic
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn strategy(&self) -> RebalancingStrategy {
        self.lock().strategy
    }

    pub fn members_count(&self) -> usize {
        self.lock().members.len()
    }

    /// Adds a member and rebalances the whole group.
    pub fn add_consumer(&self, consumer_id: &str) -> Result<(), MillstreamError> {
        let mut state = self.lock();
        if state.members.iter().any(|member| member.id() == consumer_id) {
            return Err(MillstreamError::ConsumerIdAlreadyExists(
                consumer_id.to_owned(),
            ));
        }

        state.members.push(Consumer::new(consumer_id, &self.id));
        self.rebalance(&mut state);
        Ok(())
    }

    /// Removes a member and rebalances the remaining membership. Removing the
    /// last member leaves the group empty; the failed recompute is reported
    /// and nothing is assigned until a new member joins.
    pub fn remove_consumer(&self, consumer_id: &str) -> Result<(), MillstreamError> {
        let mut state = self.lock();
        let position = state
            .members
            .iter()
            .position(|member| member.id() == consumer_id)
            .ok_or_else(|| MillstreamError::ConsumerIdNotFound(consumer_id.to_owned()))?;

        state.members.remove(position);
        self.rebalance(&mut state);
        Ok(())
    }

    /// Replaces the active strategy and rebalances. Setting an unchanged
    /// strategy recomputes the identical assignment.
    pub fn set_strategy(&self, strategy: RebalancingStrategy) {
        let mut state = self.lock();
        state.strategy = strategy;
        info!(
            "Consumer group with ID: {} rebalancing strategy changed to: {strategy}",
            self.id
        );
        self.rebalance(&mut state);
    }

    /// Delivers up to `count` events from an owned partition, advancing the
    /// group offset and appending every delivered event to the member's
    /// history. An empty delivery at the end of the log is reported as
    /// [`MillstreamError::LogExhausted`]; a partial delivery is returned
    /// successfully with the `exhausted` flag set.
    pub fn consume(
        &self,
        consumer_id: &str,
        partition_id: &str,
        count: usize,
    ) -> Result<PolledEvents, MillstreamError> {
        let mut state = self.lock();
        let partition = self.owned_partition(&state, consumer_id, partition_id)?;

        let polled = partition.poll(&self.id, count);
        if polled.events.is_empty() && polled.exhausted {
            return Err(MillstreamError::LogExhausted(
                partition_id.to_owned(),
                self.id.clone(),
            ));
        }

        let member = Self::member_mut(&mut state, consumer_id)?;
        member.record(polled.events.iter().cloned());
        Ok(polled)
    }

    /// Rewinds the group offset on an owned partition to `from` and re-delivers
    /// everything up to the previous position, one event at a time, appending
    /// each to the member's history. The net offset after a completed replay
    /// equals the offset before it. `from` must be strictly below the current
    /// offset; replaying "forward" is rejected, not a no-op.
    pub fn replay(
        &self,
        consumer_id: &str,
        partition_id: &str,
        from: usize,
    ) -> Result<Vec<Arc<Event>>, MillstreamError> {
        let mut state = self.lock();
        let partition = self.owned_partition(&state, consumer_id, partition_id)?;

        let current = partition.current_offset(&self.id);
        if from >= current {
            return Err(MillstreamError::InvalidReplayOffset {
                requested: from,
                current,
            });
        }

        partition.seek(&self.id, from);
        let mut redelivered = Vec::with_capacity(current - from);
        while partition.current_offset(&self.id) < current {
            let polled = partition.poll(&self.id, 1);
            if polled.events.is_empty() {
                break;
            }
            redelivered.extend(polled.events);
        }

        let member = Self::member_mut(&mut state, consumer_id)?;
        member.record(redelivered.iter().cloned());
        Ok(redelivered)
    }

    /// Structured snapshot of the group: strategy, membership order, each
    /// member's current assignment and full history.
    pub fn details(&self) -> ConsumerGroupDetails {
        let state = self.lock();
        ConsumerGroupDetails {
            id: self.id.clone(),
            topic_id: self.topic.id().to_owned(),
            strategy: state.strategy,
            consumers: state
                .members
                .iter()
                .map(|member| ConsumerDetails {
                    id: member.id().to_owned(),
                    assignment: member.assignment().to_vec(),
                    history: member
                        .history()
                        .iter()
                        .map(|event| (**event).clone())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Assignment snapshot for a single member, in assignment order.
    pub fn assignment(&self, consumer_id: &str) -> Result<Vec<String>, MillstreamError> {
        let state = self.lock();
        let member = state
            .members
            .iter()
            .find(|member| member.id() == consumer_id)
            .ok_or_else(|| MillstreamError::ConsumerIdNotFound(consumer_id.to_owned()))?;
        Ok(member.assignment().to_vec())
    }

    // Full recompute: clear every member's assignment, then install the fresh
    // assignment from the active strategy over the full ordered membership and
    // the topic's full ordered partition list. Caller holds the group mutex.
    fn rebalance(&self, state: &mut MutexGuard<'_, GroupState>) {
        for member in &mut state.members {
            member.clear_assignment();
        }

        let partition_ids = self.topic.partition_ids();
        match state.strategy.assign(state.members.len(), &partition_ids) {
            Ok(assignments) => {
                for (member, assignment) in state.members.iter_mut().zip(assignments) {
                    member.install_assignment(assignment);
                }
            }
            Err(error) => {
                warn!(
                    "Skipped rebalance of consumer group with ID: {}, reason: {error}",
                    self.id
                );
            }
        }
    }

    fn owned_partition(
        &self,
        state: &MutexGuard<'_, GroupState>,
        consumer_id: &str,
        partition_id: &str,
    ) -> Result<Arc<Partition>, MillstreamError> {
        let member = state
            .members
            .iter()
            .find(|member| member.id() == consumer_id)
            .ok_or_else(|| MillstreamError::ConsumerIdNotFound(consumer_id.to_owned()))?;
        if !member.is_assigned(partition_id) {
            return Err(MillstreamError::PartitionNotAssigned(
                partition_id.to_owned(),
                consumer_id.to_owned(),
            ));
        }

        self.topic.partition(partition_id).ok_or_else(|| {
            MillstreamError::PartitionIdNotFound(
                partition_id.to_owned(),
                self.topic.id().to_owned(),
            )
        })
    }

    fn member_mut<'a>(
        state: &'a mut MutexGuard<'_, GroupState>,
        consumer_id: &str,
    ) -> Result<&'a mut Consumer, MillstreamError> {
        state
            .members
            .iter_mut()
            .find(|member| member.id() == consumer_id)
            .ok_or_else(|| MillstreamError::ConsumerIdNotFound(consumer_id.to_owned()))
    }

    fn lock(&self) -> MutexGuard<'_, GroupState> {
        self.state.lock().expect("consumer group lock poisoned")
    }
}
