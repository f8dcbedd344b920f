//! End-to-end tests for hop-mode motif queries.
//!
//! Hop mode attributes a reply to the author of its direct parent, so
//! motifs can appear between actors deep inside a thread.

use std::sync::Arc;

use k2h::{find_motifs, find_motifs_with, ActorId, Event, Mode, MotifConfig, MotifSession, MotifStrategy};
use pretty_assertions::assert_eq;

fn actor(s: &str) -> ActorId {
    ActorId::from(s)
}

fn hop(dt: i64, rep: i64, h: usize) -> MotifConfig {
    MotifConfig::new(dt, rep, h).with_mode(Mode::Hop)
}

/// A single thread: A (root, t) → B (t + 5) → C (child of B, t + 8).
fn thread(tag: &str, t: i64) -> Vec<Event> {
    let root = format!("a{tag}");
    let b = format!("b{tag}");
    vec![
        Event::new(root.as_str(), "A", t, root.as_str()),
        Event::new(b.as_str(), "B", t + 5, root.as_str()).with_parent(root.as_str()),
        Event::new(format!("c{tag}"), "C", t + 8, root.as_str()).with_parent(b.as_str()),
    ]
}

fn two_threads() -> Vec<Event> {
    let mut events = thread("1", 0);
    events.extend(thread("2", 100));
    events
}

fn edge_keys(out: &k2h::MotifOutput) -> Vec<(String, String)> {
    out.graph
        .edges()
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

// ============================================================================
// 1. Delay filter on hop edges
// ============================================================================

#[test]
fn test_hop_delays_in_bipartite() {
    let graph = k2h::HopStrategy.build(&thread("1", 0));
    let mut delays: Vec<(String, String, i64)> = graph
        .edges()
        .map(|e| (e.source.name().to_string(), e.target.name().to_string(), e.delay().unwrap()))
        .collect();
    delays.sort();
    assert_eq!(delays, vec![
        ("B".to_string(), "A".to_string(), 5),
        ("C".to_string(), "B".to_string(), 3),
    ]);
}

#[test]
fn test_both_hops_within_dt() {
    let out = find_motifs(&two_threads(), &hop(10, 200, 2)).unwrap();
    assert_eq!(edge_keys(&out), vec![
        ("B".to_string(), "A".to_string()),
        ("C".to_string(), "B".to_string()),
    ]);
}

#[test]
fn test_only_short_hop_within_dt() {
    let out = find_motifs(&two_threads(), &hop(4, 200, 2)).unwrap();
    assert_eq!(edge_keys(&out), vec![("C".to_string(), "B".to_string())]);
}

#[test]
fn test_no_hop_within_dt() {
    let out = find_motifs(&two_threads(), &hop(2, 200, 2)).unwrap();
    assert!(out.graph.is_empty());
}

// ============================================================================
// 2. Repetition window over parent times
// ============================================================================

#[test]
fn test_repetition_window_uses_parent_time() {
    // B's parents are at 0 and 100, C's at 5 and 105
    let tight = find_motifs(&two_threads(), &hop(10, 99, 2)).unwrap();
    assert!(tight.graph.is_empty());

    let exact = find_motifs(&two_threads(), &hop(10, 100, 2).with_verbose(true)).unwrap();
    let cb = exact.graph.edge(&actor("C"), &actor("B")).unwrap();
    assert_eq!(cb.weight, 1);
    let w: Vec<String> = cb.witnesses.as_ref().unwrap()[0].iter().map(|r| r.to_string()).collect();
    assert_eq!(w, vec!["a1".to_string(), "a2".to_string()]);
}

// ============================================================================
// 3. Dropped rows
// ============================================================================

#[test]
fn test_repeated_exchange_under_one_root_counts_once() {
    // B answers A three times under the same root: one hop edge only
    let events = vec![
        Event::new("a1", "A", 0, "a1"),
        Event::new("b1", "B", 1, "a1").with_parent("a1"),
        Event::new("b2", "B", 2, "a1").with_parent("a1"),
        Event::new("b3", "B", 3, "a1").with_parent("a1"),
    ];
    let out = find_motifs(&events, &hop(10, 100, 2)).unwrap();
    assert!(out.graph.is_empty());
}

#[test]
fn test_orphans_and_self_replies_dropped() {
    let mut events = two_threads();
    events.push(Event::new("x1", "X", 1, "a1").with_parent("nowhere"));
    events.push(Event::new("x2", "X", 101, "a2").with_parent("nowhere"));
    events.push(Event::new("s1", "A", 2, "a1").with_parent("a1"));
    events.push(Event::new("s2", "A", 102, "a2").with_parent("a2"));

    let out = find_motifs(&events, &hop(10, 200, 2)).unwrap();
    assert_eq!(out.graph.actor_count(), 3);
    assert!(out.graph.actor_index(&actor("X")).is_none());
}

// ============================================================================
// 4. Table + reuse
// ============================================================================

#[test]
fn test_table_uses_parent_column() {
    let out = find_motifs(&two_threads(), &hop(10, 200, 2).with_table(true).with_verbose(true)).unwrap();
    let table = out.table.unwrap();
    assert_eq!(table.columns(), vec!["component", "source", "parent", "weight", "witnesses"]);
    assert_eq!(table.len(), 2);
    assert!(table.rows.iter().all(|r| r.component == 0));
}

#[test]
fn test_requery_with_different_dt() {
    let first = find_motifs(&two_threads(), &hop(10, 200, 2)).unwrap();
    let bipartite = first.bipartite.unwrap();

    let narrower = find_motifs_with(Arc::clone(&bipartite), &hop(4, 200, 2)).unwrap();
    assert_eq!(narrower.graph.edge_count(), 1);

    let again = find_motifs_with(bipartite, &hop(10, 200, 2)).unwrap();
    assert_eq!(again.graph, first.graph);
}

#[test]
fn test_session_serves_both_modes() {
    let session = MotifSession::new(two_threads());
    let root = session.query(&MotifConfig::new(10, 200, 2)).unwrap();
    let hopped = session.query(&hop(10, 200, 2)).unwrap();

    // root mode: B and C both react to A's roots
    let mut root_keys = edge_keys(&root);
    root_keys.sort();
    assert_eq!(root_keys, vec![
        ("B".to_string(), "A".to_string()),
        ("C".to_string(), "A".to_string()),
    ]);
    assert_eq!(hopped.graph.edge_count(), 2);
    assert!(session.is_cached(Mode::Root) && session.is_cached(Mode::Hop));
}
