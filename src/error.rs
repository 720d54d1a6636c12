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

use crate::streaming::events::ValueKind;
use thiserror::Error;

/// Every failure the core can report. None of these are process-fatal and
/// none leave partial mutation behind: an operation either completes its full
/// effect or has no effect.
#[derive(Debug, Error)]
pub enum MillstreamError {
    #[error("topic with ID: {0} was not found")]
    TopicIdNotFound(String),
    #[error("topic with ID: {0} already exists")]
    TopicIdAlreadyExists(String),
    #[error("partition with ID: {0} was not found in topic with ID: {1}")]
    PartitionIdNotFound(String, String),
    #[error("partition with ID: {0} already exists in topic with ID: {1}")]
    PartitionIdAlreadyExists(String, String),
    #[error("producer with ID: {0} was not found")]
    ProducerIdNotFound(String),
    #[error("producer with ID: {0} already exists")]
    ProducerIdAlreadyExists(String),
    #[error("consumer group with ID: {0} was not found")]
    ConsumerGroupIdNotFound(String),
    #[error("consumer group with ID: {0} already exists")]
    ConsumerGroupIdAlreadyExists(String),
    #[error("consumer with ID: {0} was not found")]
    ConsumerIdNotFound(String),
    #[error("consumer with ID: {0} already exists")]
    ConsumerIdAlreadyExists(String),
    #[error("partition with ID: {0} is not assigned to consumer with ID: {1}")]
    PartitionNotAssigned(String, String),
    #[error("event value kind: {0} does not match the expected kind: {1}")]
    EventTypeMismatch(ValueKind, ValueKind),
    #[error("cannot allocate event, topic with ID: {0} has no partitions")]
    CannotAllocateEventNoPartitions(String),
    #[error("cannot allocate event, partition with ID: {0} was not found in topic with ID: {1}")]
    CannotAllocateEventUnknownPartition(String, String),
    #[error("no events left in partition with ID: {0} for consumer group with ID: {1}")]
    LogExhausted(String, String),
    #[error("replay offset: {requested} must be lower than the current offset: {current}")]
    InvalidReplayOffset { requested: usize, current: usize },
    #[error("cannot rebalance a consumer group with no members")]
    EmptyConsumerGroup,
}
