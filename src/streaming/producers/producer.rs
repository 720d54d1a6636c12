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
use crate::streaming::events::{Event, ValueKind};
use crate::streaming::partitions::Partition;
use crate::streaming::producers::AllocationStrategy;
use crate::streaming::topics::Topic;
use std::sync::Arc;

/// Stateless event source bound to a value kind and an allocation strategy.
#[derive(Debug)]
pub struct Producer {
    id: String,
    kind: ValueKind,
    allocation: AllocationStrategy,
}

impl Producer {
    pub fn new(id: impl Into<String>, kind: ValueKind, allocation: AllocationStrategy) -> Self {
        Self {
            id: id.into(),
            kind,
            allocation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn allocation(&self) -> AllocationStrategy {
        self.allocation
    }

    /// Routes an event into the topic via the bound allocation strategy.
    ///
    /// The event's value kind must match both the producer's and the topic's
    /// kind; on any failure no partition is touched. On success exactly one
    /// partition gains exactly one event.
    pub fn produce(
        &self,
        topic: &Topic,
        event: Arc<Event>,
    ) -> Result<Arc<Partition>, MillstreamError> {
        if event.kind() != self.kind {
            return Err(MillstreamError::EventTypeMismatch(event.kind(), self.kind));
        }
        if event.kind() != topic.kind() {
            return Err(MillstreamError::EventTypeMismatch(event.kind(), topic.kind()));
        }

        self.allocation.allocate(topic, &event)
    }
}
