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

use crate::streaming::events::Event;
use std::sync::Arc;

/// Consumer group member. Owned by its group and only ever touched under the
/// group mutex, which is what makes the rebalance clear+recompute+install
/// sequence invisible to assignment readers.
#[derive(Debug)]
pub struct Consumer {
    id: String,
    group_id: String,
    // Partition ids currently owned, replaced wholesale on every rebalance.
    assignment: Vec<String>,
    // Append-only; replay intentionally records duplicates.
    history: Vec<Arc<Event>>,
}

impl Consumer {
    pub(crate) fn new(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            assignment: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Currently owned partition ids, in assignment order.
    pub fn assignment(&self) -> &[String] {
        &self.assignment
    }

    /// Everything this consumer has ever been delivered, in delivery order.
    pub fn history(&self) -> &[Arc<Event>] {
        &self.history
    }

    pub(crate) fn is_assigned(&self, partition_id: &str) -> bool {
        self.assignment.iter().any(|id| id == partition_id)
    }

    pub(crate) fn clear_assignment(&mut self) {
        self.assignment.clear();
    }

    pub(crate) fn install_assignment(&mut self, partition_ids: Vec<String>) {
        self.assignment = partition_ids;
    }

    pub(crate) fn record(&mut self, events: impl IntoIterator<Item = Arc<Event>>) {
        self.history.extend(events);
    }
}
