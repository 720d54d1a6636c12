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

//! Millstream is an in-process partitioned publish/subscribe log.
//!
//! Topics are split into ordered, append-only partitions. Producers route
//! events into partitions via pluggable allocation strategies, consumer groups
//! divide partition ownership across their members via pluggable rebalancing
//! strategies, and read offsets are tracked per (partition, consumer group)
//! pair so that rebalancing never loses consumption progress. Consumers can
//! rewind a group offset and replay previously consumed ranges.
//!
//! The [`system::System`] context owns the id-keyed registries and exposes the
//! full operation surface; the types under [`streaming`] implement the actual
//! mechanics. All operations are synchronous and internally synchronized -
//! producers and consumers may call into the same [`system::System`] from
//! multiple threads.

pub mod error;
pub mod models;
pub mod streaming;
pub mod system;

pub mod prelude {
    //! Commonly used types, re-exported for convenience.

    pub use crate::error::MillstreamError;
    pub use crate::models::{
        ConsumerDetails, ConsumerGroupDetails, PartitionDetails, TopicDetails,
    };
    pub use crate::streaming::consumer_groups::ConsumerGroup;
    pub use crate::streaming::consumer_groups::RebalancingStrategy;
    pub use crate::streaming::events::{Event, EventValue, ValueKind};
    pub use crate::streaming::partitions::{Partition, PolledEvents};
    pub use crate::streaming::producers::{AllocationStrategy, Producer};
    pub use crate::streaming::topics::Topic;
    pub use crate::system::System;
}
