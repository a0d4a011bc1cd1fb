//! End-to-end synchronization scenarios: publisher and subscriber proxies
//! exchanging change messages over in-memory channels.

use std::sync::{Arc, Mutex};

use corelink::{
    ChangeKind, ChangeMessage, CollectionGroup, CollectionGroupProxy, DispatchHub, EchoGuard,
    HubError, InstanceId, InstanceIdentity, MemberValue, MemoryChannel, OwnerId, ProxyRegistry,
    RecentlyPlayed, RecentlyPlayedProxy, SubscriberProxy,
};

struct Pair {
    publisher: CollectionGroupProxy,
    subscriber: CollectionGroupProxy,
    owner_out: MemoryChannel,
    subscriber_out: MemoryChannel,
}

/// Wrap a collection group on the owning side and reference it from a
/// subscriber, each with its own outbound channel.
fn linked_pair(name: &str) -> Pair {
    let guard = Arc::new(EchoGuard::new());
    let owner_out = MemoryChannel::new();
    let subscriber_out = MemoryChannel::new();

    let publisher = CollectionGroupProxy::wrap(
        CollectionGroup::new(name),
        OwnerId::new("core-1"),
        guard,
        Arc::new(owner_out.clone()),
    );
    let subscriber = CollectionGroupProxy::reference(
        publisher.identity().owner().clone(),
        publisher.identity().instance().clone(),
        Arc::new(subscriber_out.clone()),
    );

    Pair {
        publisher,
        subscriber,
        owner_out,
        subscriber_out,
    }
}

#[test]
fn local_set_propagates_to_subscriber_without_echo() {
    let mut pair = linked_pair("Old");

    pair.publisher.set_name("New").expect("set");

    let sent = pair.owner_out.drain();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, ChangeKind::Set);
    assert_eq!(sent[0].member_name, "name");
    assert_eq!(sent[0].payload, MemberValue::from("New"));

    for message in sent {
        pair.subscriber.apply_inbound(message).expect("apply");
    }

    assert_eq!(pair.subscriber.name().as_deref(), Some("New"));
    // The subscriber emitted nothing as a result of applying the update.
    assert_eq!(pair.subscriber_out.pending(), 0);
}

#[test]
fn subscriber_write_round_trips_through_the_owner() {
    let mut pair = linked_pair("Old");

    pair.subscriber.set_name("Other").expect("request");

    // The request went to the owner and the local cache is untouched.
    assert_eq!(pair.subscriber_out.pending(), 1);
    assert_eq!(pair.subscriber.name(), None);

    let requests = pair.subscriber_out.drain();
    assert_eq!(requests[0].kind, ChangeKind::Set);
    assert_eq!(requests[0].target, *pair.publisher.identity());

    // The owner applies the genuine mutation and re-publishes it once.
    for request in requests {
        pair.publisher.apply_inbound(request).expect("apply request");
    }
    assert_eq!(pair.publisher.name().as_deref(), Some("Other"));

    let confirmations = pair.owner_out.drain();
    assert_eq!(confirmations.len(), 1);
    for confirmation in confirmations {
        pair.subscriber.apply_inbound(confirmation).expect("apply");
    }

    assert_eq!(pair.subscriber.name().as_deref(), Some("Other"));
}

#[test]
fn rejected_subscriber_write_leaves_both_sides_unchanged() {
    let mut pair = linked_pair("Old");

    pair.subscriber.set_name("").expect("request sends fine");
    let mut faults = 0;
    for request in pair.subscriber_out.drain() {
        if pair.publisher.apply_inbound(request).is_err() {
            faults += 1;
        }
    }

    assert_eq!(faults, 1);
    assert_eq!(pair.publisher.name().as_deref(), Some("Old"));
    assert_eq!(pair.owner_out.pending(), 0);
    assert_eq!(pair.subscriber.name(), None);
}

#[test]
fn snapshot_request_resolves_the_initially_unknown_cache() {
    let mut pair = linked_pair("Library");

    assert_eq!(pair.subscriber.name(), None);
    assert_eq!(pair.subscriber.total_item_count(), None);

    pair.subscriber.request_snapshot().expect("request");
    for request in pair.subscriber_out.drain() {
        pair.publisher.apply_inbound(request).expect("serve");
    }
    for update in pair.owner_out.drain() {
        pair.subscriber.apply_inbound(update).expect("apply");
    }

    assert_eq!(pair.subscriber.name().as_deref(), Some("Library"));
    assert_eq!(pair.subscriber.total_item_count(), Some(0));
}

#[test]
fn events_raised_by_the_owner_reach_the_subscriber() {
    let mut pair = linked_pair("Library");

    pair.publisher
        .model_mut()
        .as_publisher_mut()
        .expect("publisher mode")
        .raise_event("items_changed", MemberValue::from(7u64))
        .expect("raise");

    for message in pair.owner_out.drain() {
        pair.subscriber.apply_inbound(message).expect("apply");
    }

    let events = pair.subscriber.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "items_changed");
    assert_eq!(events[0].1, MemberValue::from(7u64));
}

#[test]
fn reconstructing_a_subscriber_twice_yields_equivalent_proxies() {
    let owner = OwnerId::new("core-1");
    let instance = InstanceId::new("recently-played");
    let channel: Arc<MemoryChannel> = Arc::new(MemoryChannel::new());

    let mut first =
        SubscriberProxy::reference(owner.clone(), instance.clone(), channel.clone());
    let mut second = SubscriberProxy::reference(owner, instance, channel);

    assert_eq!(first.identity(), second.identity());

    let updates = vec![
        ChangeMessage::set_outbound(
            first.identity().clone(),
            "entries",
            MemberValue::from(vec!["track-1".to_string()]),
        )
        .into_inbound(),
        ChangeMessage::set_outbound(
            first.identity().clone(),
            "max_entries",
            MemberValue::from(10u64),
        )
        .into_inbound(),
    ];

    for update in updates.clone() {
        first.apply_inbound(update).expect("apply first");
    }
    for update in updates {
        second.apply_inbound(update).expect("apply second");
    }

    assert_eq!(first.cache(), second.cache());
}

#[test]
fn remote_invocation_republishes_only_the_changed_properties() {
    let guard = Arc::new(EchoGuard::new());
    let owner_out = MemoryChannel::new();
    let subscriber_out = MemoryChannel::new();

    let mut publisher = RecentlyPlayedProxy::wrap(
        RecentlyPlayed::new(),
        OwnerId::new("core-1"),
        guard,
        Arc::new(owner_out.clone()),
    );
    let mut subscriber = RecentlyPlayedProxy::reference(
        publisher.identity().owner().clone(),
        publisher.identity().instance().clone(),
        Arc::new(subscriber_out.clone()),
    );

    subscriber.record("track-9").expect("request");
    for request in subscriber_out.drain() {
        publisher.apply_inbound(request).expect("invoke");
    }

    // Only `entries` changed; `max_entries` kept its value.
    let updates = owner_out.drain();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].member_name, "entries");

    for update in updates {
        subscriber.apply_inbound(update).expect("apply");
    }
    assert_eq!(
        subscriber.entries(),
        Some(vec!["track-9".to_string()])
    );
}

#[test]
fn registry_routes_by_identity_and_drops_unknown_targets() {
    let guard = Arc::new(EchoGuard::new());
    let owner_out = MemoryChannel::new();

    let identity = InstanceIdentity::generate(OwnerId::new("core-1"));
    let hub = Arc::new(Mutex::new(DispatchHub::attach(
        CollectionGroup::new("Old"),
        identity.clone(),
        guard,
        Arc::new(owner_out.clone()),
    )));

    let mut registry = ProxyRegistry::new();
    registry.register(hub.clone()).expect("register");

    // Routed: the hub applies the request and confirms it.
    registry.deliver(ChangeMessage::set_outbound(
        identity.clone(),
        "name",
        MemberValue::from("New"),
    ));
    assert_eq!(hub.lock().unwrap().instance().name(), "New");
    assert_eq!(owner_out.drain().len(), 1);

    // Unknown identity: dropped, counted, nothing propagates.
    let stranger = InstanceIdentity::new(OwnerId::new("core-9"), InstanceId::new("ghost"));
    registry.deliver(ChangeMessage::set_outbound(
        stranger,
        "name",
        MemberValue::from("x"),
    ));
    assert_eq!(registry.dropped_count(), 1);
    assert!(registry.take_faults().is_empty());
}

#[test]
fn registry_reports_detached_targets_as_gone() {
    let guard = Arc::new(EchoGuard::new());
    let owner_out = MemoryChannel::new();

    let identity = InstanceIdentity::generate(OwnerId::new("core-1"));
    let hub = Arc::new(Mutex::new(DispatchHub::attach(
        CollectionGroup::new("Old"),
        identity.clone(),
        guard,
        Arc::new(owner_out.clone()),
    )));

    let mut registry = ProxyRegistry::new();
    registry.register(hub.clone()).expect("register");
    hub.lock().unwrap().detach().expect("detach");

    registry.deliver(ChangeMessage::set_outbound(
        identity,
        "name",
        MemberValue::from("Late"),
    ));

    assert_eq!(registry.dropped_count(), 1);
    let faults = registry.take_faults();
    assert_eq!(faults.len(), 1);
    assert!(matches!(faults[0], HubError::Detached { .. }));
    assert_eq!(owner_out.pending(), 0);
}

#[test]
fn registry_enforces_one_target_per_identity() {
    let guard = Arc::new(EchoGuard::new());
    let channel = MemoryChannel::new();
    let identity = InstanceIdentity::generate(OwnerId::new("core-1"));

    let first = Arc::new(Mutex::new(DispatchHub::attach(
        CollectionGroup::new("A"),
        identity.clone(),
        Arc::clone(&guard),
        Arc::new(channel.clone()),
    )));
    let second = Arc::new(Mutex::new(DispatchHub::attach(
        CollectionGroup::new("B"),
        identity,
        guard,
        Arc::new(channel.clone()),
    )));

    let mut registry = ProxyRegistry::new();
    registry.register(first).expect("first");
    assert!(registry.register(second).is_err());
}

#[test]
fn unknown_member_from_a_newer_peer_is_ignored_with_telemetry() {
    let mut pair = linked_pair("Old");

    let inbound = ChangeMessage::set_outbound(
        pair.publisher.identity().clone(),
        "unknown123",
        MemberValue::from("x"),
    );
    pair.publisher
        .apply_inbound(inbound.into_inbound())
        .expect("drift is recoverable");

    let drift = pair
        .publisher
        .model()
        .as_publisher()
        .expect("publisher mode")
        .drift_count();
    assert_eq!(drift, 1);
    assert_eq!(pair.owner_out.pending(), 0);
}
