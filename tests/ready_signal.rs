// tests/ready_signal.rs
// One-shot semantics of ReadySignal over a channel-backed feed.

use std::sync::mpsc;
use std::time::Duration;

use acad_margin::ready::{ChannelFeed, MutationFeed, ReadyError, ReadySignal, ReadyState};

fn contains_table(doc: &str) -> Option<String> {
    doc.contains("<table").then(|| doc.to_string())
}

#[test]
fn resolves_synchronously_when_already_present() {
    let (_tx, rx) = mpsc::channel();
    let mut feed = ChannelFeed::new("<body><table></table></body>".into(), rx);
    let mut signal = ReadySignal::new();

    // Zero timeout: only the synchronous fast path can succeed.
    let hit = signal.wait_for(contains_table, &mut feed, Duration::ZERO);
    assert!(hit.is_ok());
    assert_eq!(signal.state(), ReadyState::Resolved);
}

#[test]
fn resolves_on_first_matching_batch_and_only_consumes_that_batch() {
    let (tx, rx) = mpsc::channel();
    let mut feed = ChannelFeed::new("<body>loading</body>".into(), rx);
    let mut signal = ReadySignal::new();

    tx.send("<body>still loading</body>".into()).unwrap();
    tx.send("<body><table>first</table></body>".into()).unwrap();
    tx.send("<body><table>second</table></body>".into()).unwrap();

    let hit = signal
        .wait_for(contains_table, &mut feed, Duration::from_secs(1))
        .unwrap();
    assert!(hit.contains("first"));
    assert_eq!(signal.state(), ReadyState::Resolved);

    // The later matching batch is still queued: the signal stopped
    // listening after its first resolution.
    let next = feed.next_batch(Duration::from_millis(50)).unwrap();
    assert!(next.contains("second"));
}

#[test]
fn second_wait_returns_cached_match_without_touching_the_feed() {
    let (tx, rx) = mpsc::channel();
    let mut feed = ChannelFeed::new("<body><table>once</table></body>".into(), rx);
    let mut signal = ReadySignal::new();

    let first = signal
        .wait_for(contains_table, &mut feed, Duration::from_secs(1))
        .unwrap();
    drop(tx); // feed is now dead

    // Still resolves, from the cached value.
    let second = signal
        .wait_for(contains_table, &mut feed, Duration::ZERO)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn times_out_when_target_never_appears() {
    let (_tx, rx) = mpsc::channel::<String>();
    let mut feed = ChannelFeed::new("<body>nothing here</body>".into(), rx);
    let mut signal = ReadySignal::new();

    let err = signal
        .wait_for(contains_table, &mut feed, Duration::from_millis(20))
        .unwrap_err();
    assert!(matches!(err, ReadyError::Timeout(_)));
    assert_eq!(signal.state(), ReadyState::Pending);
}

#[test]
fn reports_closed_feed() {
    let (tx, rx) = mpsc::channel::<String>();
    drop(tx);
    let mut feed = ChannelFeed::new("<body>nothing here</body>".into(), rx);
    let mut signal = ReadySignal::new();

    let err = signal
        .wait_for(contains_table, &mut feed, Duration::from_secs(1))
        .unwrap_err();
    assert_eq!(err, ReadyError::FeedClosed);
}

#[test]
fn independent_waiters_resolve_independently() {
    let (_tx1, rx1) = mpsc::channel();
    let (_tx2, rx2) = mpsc::channel();
    let mut feed1 = ChannelFeed::new("<table>a</table>".into(), rx1);
    let mut feed2 = ChannelFeed::new("<table>b</table>".into(), rx2);

    let mut s1 = ReadySignal::new();
    let mut s2 = ReadySignal::new();
    let a = s1.wait_for(contains_table, &mut feed1, Duration::ZERO).unwrap();
    let b = s2.wait_for(contains_table, &mut feed2, Duration::ZERO).unwrap();
    assert!(a.contains('a') && b.contains('b'));
}
