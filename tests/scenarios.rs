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

use millstream::prelude::*;

const TOPIC_ID: &str = "t1";
const GROUP_ID: &str = "g1";
const PRODUCER_ID: &str = "prod1";

fn string_event(id: &str, key: &str) -> Event {
    Event::new(id, ValueKind::String, key, EventValue::Str(format!("value-{id}"))).unwrap()
}

fn setup(partitions: usize) -> System {
    let system = System::new();
    system.create_topic(TOPIC_ID, ValueKind::String).unwrap();
    for i in 1..=partitions {
        system.create_partition(TOPIC_ID, &format!("p{i}")).unwrap();
    }
    system
        .create_producer(PRODUCER_ID, ValueKind::String, AllocationStrategy::Manual)
        .unwrap();
    system
        .create_consumer_group(GROUP_ID, TOPIC_ID, RebalancingStrategy::Range)
        .unwrap();
    system
}

fn assignment(system: &System, consumer_id: &str) -> Vec<String> {
    system
        .consumer_group_details(GROUP_ID)
        .unwrap()
        .assignment_of(consumer_id)
        .unwrap()
        .to_vec()
}

fn history(system: &System, consumer_id: &str) -> Vec<String> {
    system
        .consumer_group_details(GROUP_ID)
        .unwrap()
        .consumers
        .iter()
        .find(|consumer| consumer.id == consumer_id)
        .unwrap()
        .history
        .iter()
        .map(|event| event.id().to_owned())
        .collect()
}

fn offset(system: &System, partition_id: &str) -> usize {
    system
        .topic_details(TOPIC_ID)
        .unwrap()
        .partitions
        .iter()
        .find(|partition| partition.id == partition_id)
        .unwrap()
        .offsets
        .get(GROUP_ID)
        .copied()
        .unwrap_or(0)
}

#[test]
fn membership_and_strategy_changes_should_rebalance_the_group() {
    let system = setup(4);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    assert_eq!(assignment(&system, "c1"), ["p1", "p2", "p3", "p4"]);

    system.create_consumer(GROUP_ID, "c2").unwrap();
    assert_eq!(assignment(&system, "c1"), ["p1", "p2"]);
    assert_eq!(assignment(&system, "c2"), ["p3", "p4"]);

    system
        .set_rebalancing_strategy(GROUP_ID, RebalancingStrategy::RoundRobin)
        .unwrap();
    assert_eq!(assignment(&system, "c1"), ["p1", "p3"]);
    assert_eq!(assignment(&system, "c2"), ["p2", "p4"]);

    system.delete_consumer("c2").unwrap();
    assert_eq!(assignment(&system, "c1"), ["p1", "p2", "p3", "p4"]);
}

#[test]
fn replay_should_redeliver_the_consumed_range_and_keep_the_net_offset() {
    let system = setup(4);
    system.create_consumer(GROUP_ID, "c1").unwrap();

    system
        .produce_event(PRODUCER_ID, TOPIC_ID, string_event("event1", "p1"))
        .unwrap();
    system
        .produce_event(PRODUCER_ID, TOPIC_ID, string_event("event2", "p1"))
        .unwrap();

    let polled = system.consume_events("c1", "p1", 2).unwrap();
    assert_eq!(polled.events.len(), 2);
    assert_eq!(history(&system, "c1"), ["event1", "event2"]);
    assert_eq!(offset(&system, "p1"), 2);

    let redelivered = system.replay("c1", "p1", 0).unwrap();
    let ids: Vec<_> = redelivered.iter().map(|event| event.id()).collect();
    assert_eq!(ids, ["event1", "event2"]);
    assert_eq!(
        history(&system, "c1"),
        ["event1", "event2", "event1", "event2"]
    );
    assert_eq!(offset(&system, "p1"), 2);
}

#[test]
fn replay_from_the_current_offset_should_be_rejected() {
    let system = setup(1);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    system
        .produce_event(PRODUCER_ID, TOPIC_ID, string_event("event1", "p1"))
        .unwrap();
    system.consume_events("c1", "p1", 1).unwrap();

    let result = system.replay("c1", "p1", 1);
    assert!(matches!(
        result,
        Err(MillstreamError::InvalidReplayOffset {
            requested: 1,
            current: 1
        })
    ));
    assert_eq!(history(&system, "c1"), ["event1"]);
}

#[test]
fn manual_allocation_to_a_missing_partition_should_mutate_nothing() {
    let system = setup(4);

    let result = system.produce_event(PRODUCER_ID, TOPIC_ID, string_event("event1", "p5"));

    assert!(matches!(
        result,
        Err(MillstreamError::CannotAllocateEventUnknownPartition(key, topic))
            if key == "p5" && topic == TOPIC_ID
    ));
    let details = system.topic_details(TOPIC_ID).unwrap();
    assert!(details.partitions.iter().all(|p| p.events.is_empty()));
}

#[test]
fn random_allocation_on_a_topic_without_partitions_should_fail() {
    let system = System::new();
    system.create_topic(TOPIC_ID, ValueKind::String).unwrap();
    system
        .create_producer(PRODUCER_ID, ValueKind::String, AllocationStrategy::Random)
        .unwrap();

    let result = system.produce_event(PRODUCER_ID, TOPIC_ID, string_event("event1", "ignored"));

    assert!(matches!(
        result,
        Err(MillstreamError::CannotAllocateEventNoPartitions(topic)) if topic == TOPIC_ID
    ));
}

#[test]
fn sequential_reads_should_account_for_every_event_exactly_once() {
    let system = setup(1);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    for i in 1..=5 {
        system
            .produce_event(PRODUCER_ID, TOPIC_ID, string_event(&format!("event{i}"), "p1"))
            .unwrap();
    }

    let first = system.consume_events("c1", "p1", 2).unwrap();
    let second = system.consume_events("c1", "p1", 2).unwrap();
    let third = system.consume_events("c1", "p1", 2).unwrap();

    assert_eq!(first.events.len(), 2);
    assert_eq!(second.events.len(), 2);
    assert_eq!(third.events.len(), 1);
    assert!(third.exhausted);
    assert_eq!(offset(&system, "p1"), 5);
    assert_eq!(
        history(&system, "c1"),
        ["event1", "event2", "event3", "event4", "event5"]
    );

    let result = system.consume_events("c1", "p1", 2);
    assert!(matches!(
        result,
        Err(MillstreamError::LogExhausted(partition, group))
            if partition == "p1" && group == GROUP_ID
    ));
    assert_eq!(offset(&system, "p1"), 5);
}

#[test]
fn setting_an_unchanged_strategy_should_produce_an_identical_assignment() {
    let system = setup(5);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    system.create_consumer(GROUP_ID, "c2").unwrap();

    system
        .set_rebalancing_strategy(GROUP_ID, RebalancingStrategy::Range)
        .unwrap();
    let first = system.consumer_group_details(GROUP_ID).unwrap();

    system
        .set_rebalancing_strategy(GROUP_ID, RebalancingStrategy::Range)
        .unwrap();
    let second = system.consumer_group_details(GROUP_ID).unwrap();

    assert_eq!(
        first.assignment_of("c1").unwrap(),
        second.assignment_of("c1").unwrap()
    );
    assert_eq!(
        first.assignment_of("c2").unwrap(),
        second.assignment_of("c2").unwrap()
    );
    // First member takes the remainder: 5 partitions over 2 consumers.
    assert_eq!(first.assignment_of("c1").unwrap(), ["p1", "p2", "p3"]);
    assert_eq!(first.assignment_of("c2").unwrap(), ["p4", "p5"]);
}

#[test]
fn type_mismatched_events_should_never_be_appended() {
    let system = setup(1);
    let event = Event::new("event1", ValueKind::Integer, "p1", EventValue::Int(42)).unwrap();

    let result = system.produce_event(PRODUCER_ID, TOPIC_ID, event);

    assert!(matches!(
        result,
        Err(MillstreamError::EventTypeMismatch(
            ValueKind::Integer,
            ValueKind::String
        ))
    ));
    let details = system.topic_details(TOPIC_ID).unwrap();
    assert!(details.partitions[0].events.is_empty());
}

#[test]
fn duplicate_ids_should_be_rejected_without_clobbering_existing_entities() {
    let system = setup(1);
    system.create_consumer(GROUP_ID, "c1").unwrap();

    assert!(matches!(
        system.create_topic(TOPIC_ID, ValueKind::Integer),
        Err(MillstreamError::TopicIdAlreadyExists(id)) if id == TOPIC_ID
    ));
    assert!(matches!(
        system.create_partition(TOPIC_ID, "p1"),
        Err(MillstreamError::PartitionIdAlreadyExists(partition, topic))
            if partition == "p1" && topic == TOPIC_ID
    ));
    assert!(matches!(
        system.create_producer(PRODUCER_ID, ValueKind::String, AllocationStrategy::Random),
        Err(MillstreamError::ProducerIdAlreadyExists(id)) if id == PRODUCER_ID
    ));
    assert!(matches!(
        system.create_consumer_group(GROUP_ID, TOPIC_ID, RebalancingStrategy::RoundRobin),
        Err(MillstreamError::ConsumerGroupIdAlreadyExists(id)) if id == GROUP_ID
    ));
    assert!(matches!(
        system.create_consumer(GROUP_ID, "c1"),
        Err(MillstreamError::ConsumerIdAlreadyExists(id)) if id == "c1"
    ));

    // The original topic kind survived the rejected re-create.
    assert_eq!(system.topic_details(TOPIC_ID).unwrap().kind, ValueKind::String);
}

#[test]
fn operations_against_unknown_ids_should_fail_with_not_found() {
    let system = setup(1);
    system.create_consumer(GROUP_ID, "c1").unwrap();

    assert!(matches!(
        system.create_partition("nope", "p9"),
        Err(MillstreamError::TopicIdNotFound(id)) if id == "nope"
    ));
    assert!(matches!(
        system.produce_event("nope", TOPIC_ID, string_event("event1", "p1")),
        Err(MillstreamError::ProducerIdNotFound(id)) if id == "nope"
    ));
    assert!(matches!(
        system.create_consumer("nope", "c2"),
        Err(MillstreamError::ConsumerGroupIdNotFound(id)) if id == "nope"
    ));
    assert!(matches!(
        system.consume_events("nope", "p1", 1),
        Err(MillstreamError::ConsumerIdNotFound(id)) if id == "nope"
    ));
    assert!(matches!(
        system.delete_consumer("nope"),
        Err(MillstreamError::ConsumerIdNotFound(id)) if id == "nope"
    ));
}

#[test]
fn consumers_should_only_read_partitions_they_own() {
    let system = setup(2);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    system.create_consumer(GROUP_ID, "c2").unwrap();

    // Range over 2 partitions: c1 owns p1, c2 owns p2.
    let result = system.consume_events("c2", "p1", 1);
    assert!(matches!(
        result,
        Err(MillstreamError::PartitionNotAssigned(partition, consumer))
            if partition == "p1" && consumer == "c2"
    ));
}

#[test]
fn snapshots_should_serialize_for_the_rendering_layer() {
    let system = setup(2);
    system.create_consumer(GROUP_ID, "c1").unwrap();
    system
        .produce_event(PRODUCER_ID, TOPIC_ID, string_event("event1", "p1"))
        .unwrap();
    system.consume_events("c1", "p1", 1).unwrap();

    let topic = serde_json::to_value(system.topic_details(TOPIC_ID).unwrap()).unwrap();
    assert_eq!(topic["id"], "t1");
    assert_eq!(topic["kind"], "string");
    assert_eq!(topic["partitions"][0]["events"][0]["id"], "event1");
    assert_eq!(topic["partitions"][0]["events"][0]["value"], "value-event1");
    assert_eq!(topic["partitions"][0]["offsets"][GROUP_ID], 1);

    let group = serde_json::to_value(system.consumer_group_details(GROUP_ID).unwrap()).unwrap();
    assert_eq!(group["strategy"], "range");
    assert_eq!(group["consumers"][0]["id"], "c1");
    assert_eq!(group["consumers"][0]["assignment"][0], "p1");
    assert_eq!(group["consumers"][0]["history"][0]["id"], "event1");
}
