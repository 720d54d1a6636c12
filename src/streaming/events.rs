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
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of value kinds an event, a topic or a producer can declare.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
}

/// Typed event payload. The untagged serde representation matches the
/// external record, where the raw value must match the declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Str(String),
    Int(i64),
}

impl EventValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            EventValue::Str(_) => ValueKind::String,
            EventValue::Int(_) => ValueKind::Integer,
        }
    }
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventValue::Str(value) => write!(f, "{value}"),
            EventValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// Immutable event record: identifier, declared value kind, partition-routing
/// key, typed value and creation timestamp. Events are shared as
/// `Arc<Event>` throughout the crate, so a replayed delivery appends the very
/// same record to a consumer's history again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    id: String,
    kind: ValueKind,
    key: String,
    value: EventValue,
    created_at: DateTime<Utc>,
}

impl Event {
    /// Builds an event from an externally decoded record. Decoding the
    /// external representation itself is the boundary layer's job; this only
    /// checks that the declared kind matches the carried value.
    pub fn new(
        id: impl Into<String>,
        kind: ValueKind,
        key: impl Into<String>,
        value: EventValue,
    ) -> Result<Self, MillstreamError> {
        if value.kind() != kind {
            return Err(MillstreamError::EventTypeMismatch(value.kind(), kind));
        }

        Ok(Self {
            id: id.into(),
            kind,
            key: key.into(),
            value,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Partition-routing key. Only the manual allocation strategy reads it.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &EventValue {
        &self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
