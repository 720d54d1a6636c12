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

//! Structured inspection snapshots. Rendering is the boundary layer's job;
//! the core only hands out plain, serializable data.

use crate::streaming::consumer_groups::RebalancingStrategy;
use crate::streaming::events::{Event, ValueKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time view of a partition: its full log in append order and the
/// stored next-read offset per consumer group.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionDetails {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub events: Vec<Event>,
    pub offsets: BTreeMap<String, usize>,
}

/// Point-in-time view of a topic and all of its partitions, in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct TopicDetails {
    pub id: String,
    pub kind: ValueKind,
    pub created_at: DateTime<Utc>,
    pub partitions: Vec<PartitionDetails>,
}

/// Point-in-time view of a single group member.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumerDetails {
    pub id: String,
    pub assignment: Vec<String>,
    pub history: Vec<Event>,
}

/// Point-in-time view of a consumer group: active strategy and its members in
/// join order.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumerGroupDetails {
    pub id: String,
    pub topic_id: String,
    pub strategy: RebalancingStrategy,
    pub consumers: Vec<ConsumerDetails>,
}

impl ConsumerGroupDetails {
    /// Assignment of a single member, if present.
    pub fn assignment_of(&self, consumer_id: &str) -> Option<&[String]> {
        self.consumers
            .iter()
            .find(|consumer| consumer.id == consumer_id)
            .map(|consumer| consumer.assignment.as_slice())
    }
}
