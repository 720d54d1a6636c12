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
use serde::{Deserialize, Serialize};

/// Deterministic function from (ordered members, ordered partitions) to a
/// partition-ownership assignment. Stateless; identical inputs always yield
/// the identical assignment, and every partition is assigned to exactly one
/// member.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RebalancingStrategy {
    /// Contiguous blocks in partition creation order. With M partitions and
    /// N members, the first member receives `M / N + M % N` partitions and
    /// every other member receives `M / N`.
    Range,
    /// Partition at index `i` (creation order) goes to member `i mod N`.
    RoundRobin,
}

impl RebalancingStrategy {
    /// Computes one partition-id list per member, indexed by membership order
    /// (oldest member first). Fails when there are no members; no partial
    /// assignment is produced in that case.
    pub fn assign(
        &self,
        members_count: usize,
        partition_ids: &[String],
    ) -> Result<Vec<Vec<String>>, MillstreamError> {
        if members_count == 0 {
            return Err(MillstreamError::EmptyConsumerGroup);
        }

        let mut assignments = vec![Vec::new(); members_count];
        match self {
            RebalancingStrategy::Range => {
                let base = partition_ids.len() / members_count;
                let remainder = partition_ids.len() % members_count;
                let mut next = 0;
                for (index, assignment) in assignments.iter_mut().enumerate() {
                    let count = if index == 0 { base + remainder } else { base };
                    assignment.extend(partition_ids[next..next + count].iter().cloned());
                    next += count;
                }
            }
            RebalancingStrategy::RoundRobin => {
                for (index, partition_id) in partition_ids.iter().enumerate() {
                    assignments[index % members_count].push(partition_id.clone());
                }
            }
        }

        Ok(assignments)
    }
}
