use super::*;
use shared::domain::RuleId;
use std::sync::atomic::{AtomicUsize, Ordering};

fn note(id: &str) -> RuleNotification {
    RuleNotification::new(RuleId::from(id))
}

#[test]
fn publish_reaches_every_listener_on_the_channel() {
    let bus = RuleEventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let first = {
        let hits = Arc::clone(&hits);
        bus.subscribe(BusChannel::Close, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };
    let second = {
        let hits = Arc::clone(&hits);
        bus.subscribe(BusChannel::Close, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };

    assert_eq!(bus.publish(BusChannel::Close, &note("a")), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    drop((first, second));
}

#[test]
fn channels_are_isolated() {
    let bus = RuleEventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _sub = {
        let hits = Arc::clone(&hits);
        bus.subscribe(BusChannel::Unchanged, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };

    assert_eq!(bus.publish(BusChannel::Close, &note("a")), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_subscription_removes_listener() {
    let bus = RuleEventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = {
        let hits = Arc::clone(&hits);
        bus.subscribe(BusChannel::Close, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };
    assert_eq!(bus.listener_count(BusChannel::Close), 1);

    sub.cancel();

    assert_eq!(bus.listener_count(BusChannel::Close), 0);
    assert_eq!(bus.publish(BusChannel::Close, &note("a")), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_one_subscription_keeps_the_others() {
    let bus = RuleEventBus::new();
    let first = bus.subscribe(BusChannel::Close, |_| {});
    let second = bus.subscribe(BusChannel::Close, |_| {});

    drop(first);

    assert_eq!(bus.listener_count(BusChannel::Close), 1);
    assert_eq!(second.channel(), BusChannel::Close);
}

#[test]
fn subscription_outliving_bus_is_harmless() {
    let bus = RuleEventBus::new();
    let sub = bus.subscribe(BusChannel::Close, |_| {});
    drop(bus);
    drop(sub);
}

#[test]
fn handler_may_publish_reentrantly() {
    let bus = RuleEventBus::new();
    let closes = Arc::new(AtomicUsize::new(0));

    let _forward = {
        let inner = bus.clone();
        bus.subscribe(BusChannel::Unchanged, move |n| {
            inner.publish(BusChannel::Close, n);
        })
    };
    let _count = {
        let closes = Arc::clone(&closes);
        bus.subscribe(BusChannel::Close, move |_| {
            closes.fetch_add(1, Ordering::SeqCst);
        })
    };

    bus.publish(BusChannel::Unchanged, &note("a"));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}
