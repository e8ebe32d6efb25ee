//! Full-widget tests for the grouped pager against a recording host.

use std::rc::Rc;
use std::time::{Duration, Instant};

use spool_core::SpoolError;
use spool_core::config::GroupPagingConfig;
use spool_core::types::{Extent, SlotKind};
use spool_core::window::GroupSlot;
use spool_widgets::testing::{Fixtures, RecordingHost};
use spool_widgets::{GroupPager, ItemRole};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
struct Entry(Option<SlotKind>);

impl ItemRole for Entry {
    fn role(&self) -> Option<SlotKind> {
        self.0
    }
}

fn cfg() -> GroupPagingConfig {
    GroupPagingConfig {
        run_length: 3,
        load_rate: 1,
        load_offset: 50.0,
        line_spacing: 10.0,
        cell_spacing: 10.0,
        header_extent: Extent {
            main: 50.0,
            cross: 300.0,
        },
        body_extent: Extent {
            main: 100.0,
            cross: 90.0,
        },
        ..GroupPagingConfig::default()
    }
}

type Pager = GroupPager<Entry, usize>;

/// Builds a started pager over `pattern`, leaving the deferred fill
/// unticked.
fn build(pattern: &[SlotKind], viewport: f32) -> (Pager, RecordingHost, Vec<Rc<Entry>>) {
    let mut host = RecordingHost::new();
    let mut pager = GroupPager::new(cfg());
    pager.set_viewport(viewport);
    let ctxs: Vec<Rc<Entry>> = pattern.iter().map(|k| Rc::new(Entry(Some(*k)))).collect();
    for (i, ctx) in ctxs.iter().enumerate() {
        pager.on_item_added(&mut host, i, ctx.clone()).unwrap();
    }
    pager.start(&mut host);
    (pager, host, ctxs)
}

/// Ticks until the pager reports it is idle.
fn run_idle(pager: &mut Pager, host: &mut RecordingHost) {
    let t0 = Instant::now();
    let mut ticks = 0u64;
    while pager.tick(host, t0 + Duration::from_millis(16 * ticks)) {
        ticks += 1;
        assert!(ticks < 1000, "pager never went idle");
    }
}

fn kinds(pattern: &str) -> Vec<SlotKind> {
    pattern
        .chars()
        .map(|c| match c {
            'H' => SlotKind::Header,
            'B' => SlotKind::Body,
            other => panic!("unexpected kind tag {other:?}"),
        })
        .collect()
}

/// Asserts the materialized slots form whole groups: contiguous indices,
/// headers alone on their line, body lines within the run length, and
/// every interior body line complete (cut only by a header or the list
/// end).
fn assert_whole_groups(slots: &[GroupSlot], pattern: &[SlotKind], run_length: usize) {
    for pair in slots.windows(2) {
        assert_eq!(pair[1].index, pair[0].index + 1, "window must be contiguous");
    }
    let mut lines: Vec<Vec<&GroupSlot>> = Vec::new();
    for slot in slots {
        match lines.last_mut() {
            Some(line)
                if line[0].kind == SlotKind::Body
                    && slot.kind == SlotKind::Body
                    && line[0].position.main == slot.position.main =>
            {
                line.push(slot);
            }
            _ => lines.push(vec![slot]),
        }
    }
    for (i, line) in lines.iter().enumerate() {
        match line[0].kind {
            SlotKind::Header => assert_eq!(line.len(), 1, "headers occupy a line alone"),
            SlotKind::Body => {
                assert!(line.len() <= run_length);
                if i > 0 && i + 1 < lines.len() {
                    let last = line.last().unwrap().index;
                    let complete = line.len() == run_length
                        || last + 1 == pattern.len()
                        || pattern[last + 1] == SlotKind::Header;
                    assert!(complete, "interior body line {i} is split: {line:?}");
                }
            }
        }
    }
}

#[test]
fn fill_loads_header_then_body_run_as_groups() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBBHBB"), 100.0);
    assert!(pager.is_busy());

    let t0 = Instant::now();
    assert!(pager.tick(&mut host, t0));
    assert_eq!(host.bound_indices(), vec![0], "first tick mounts the header");

    assert!(pager.tick(&mut host, t0 + Duration::from_millis(16)));
    assert_eq!(
        host.bound_indices(),
        vec![0, 1, 2, 3],
        "second tick mounts the whole body run"
    );

    assert!(!pager.tick(&mut host, t0 + Duration::from_millis(32)));
    assert!(!pager.is_busy());
    assert_eq!(pager.live(), 4);
    assert_eq!(pager.first_index(), Some(0));
    assert_eq!(pager.last_index(), Some(3));
}

#[test]
fn gestures_are_ignored_until_the_fill_completes() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBBHBB"), 100.0);

    pager.drag_began();
    pager.drag_delta(&mut host, 500.0);
    assert_eq!(pager.scroll(), 0.0);

    run_idle(&mut pager, &mut host);
    pager.drag_delta(&mut host, 10.0);
    assert_eq!(pager.scroll(), 10.0);
}

#[test]
fn roleless_item_is_a_fatal_formatting_error() {
    init_logging();
    let mut host = RecordingHost::new();
    let mut pager: Pager = GroupPager::new(cfg());
    pager
        .on_item_added(&mut host, 0, Rc::new(Entry(Some(SlotKind::Header))))
        .unwrap();

    let err = pager
        .on_item_added(&mut host, 1, Rc::new(Entry(None)))
        .unwrap_err();
    assert!(matches!(err, SpoolError::UnresolvedKind { index: 1 }));
    assert_eq!(pager.len(), 1, "the offending item is not ingested");
}

#[test]
fn forward_paging_swaps_whole_groups() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBBHBB"), 100.0);
    run_idle(&mut pager, &mut host);
    assert_eq!(pager.live(), 4);

    pager.drag_began();
    pager.drag_delta(&mut host, 80.0);

    // The second header entered and the first left, as whole groups.
    assert_eq!(pager.first_index(), Some(1));
    assert_eq!(pager.last_index(), Some(4));
}

#[test]
fn backward_paging_restores_the_tail_line() {
    init_logging();
    let pattern = kinds("HBBBBBHBBB");
    let (mut pager, mut host, _ctxs) = build(&pattern, 100.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    pager.drag_delta(&mut host, 300.0);
    assert!(pager.first_index().unwrap() > 0);
    assert_whole_groups(&pager.materialized_slots(), &pattern, 3);

    // Partway back: the two-body tail line under the first header
    // re-enters as a two-cell line, not a padded run.
    pager.drag_delta(&mut host, -140.0);
    assert_whole_groups(&pager.materialized_slots(), &pattern, 3);
    let slots = pager.materialized_slots();
    let tail: Vec<_> = slots.iter().filter(|s| s.index == 4 || s.index == 5).collect();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].position.main, tail[1].position.main);
    assert_ne!(tail[0].position.cross, tail[1].position.cross);

    // All the way back: the window sits on the list head again.
    pager.drag_delta(&mut host, -160.0);
    assert_eq!(pager.first_index(), Some(0));
    assert_whole_groups(&pager.materialized_slots(), &pattern, 3);
}

#[test]
fn window_stays_whole_groups_under_random_drags() {
    init_logging();
    let mut fixtures = Fixtures::seeded(23);
    let pattern = fixtures.kind_pattern(40, 0.25);
    let (mut pager, mut host, _ctxs) = build(&pattern, 150.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    for delta in fixtures.deltas(50, 200.0) {
        pager.drag_delta(&mut host, delta);
        assert_whole_groups(&pager.materialized_slots(), &pattern, 3);
    }
}

#[test]
fn paging_back_reuses_pooled_handles_per_kind() {
    init_logging();
    let mut fixtures = Fixtures::seeded(5);
    let pattern = fixtures.kind_pattern(40, 0.25);
    let (mut pager, mut host, _ctxs) = build(&pattern, 150.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    pager.drag_delta(&mut host, 600.0);
    let created_after_forward = host.created_count();

    let first_forward = pager.first_index().unwrap();
    pager.drag_delta(&mut host, -600.0);
    assert!(pager.first_index().unwrap() < first_forward);
    assert_eq!(
        host.created_count(),
        created_after_forward,
        "backward re-loads come from the pool"
    );
    assert!(pager.pool_stats().reused > 0);
}

#[test]
fn overdrag_settles_back_to_the_near_bound() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBB"), 100.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    pager.drag_delta(&mut host, -40.0);
    assert_eq!(pager.scroll(), -40.0, "overdrag is allowed mid-gesture");
    pager.drag_ended(&mut host, 0.0);
    run_idle(&mut pager, &mut host);
    assert_eq!(pager.scroll(), 0.0);
}

#[test]
fn overscroll_past_the_end_settles_to_the_far_bound() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBBHBB"), 100.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    pager.drag_delta(&mut host, 10_000.0);
    pager.drag_ended(&mut host, 0.0);
    run_idle(&mut pager, &mut host);
    let bound = pager.content_extent() - 100.0;
    assert!((pager.scroll() - bound).abs() < 0.5);
}

#[test]
fn removal_outside_the_window_only_renumbers() {
    init_logging();
    let (mut pager, mut host, ctxs) = build(&kinds("HBBBHBB"), 100.0);
    run_idle(&mut pager, &mut host);

    pager.drag_began();
    pager.drag_delta(&mut host, 80.0);
    assert_eq!(pager.first_index(), Some(1));

    assert!(pager.on_item_removed(&mut host, &ctxs[0]));
    assert!(!pager.is_busy(), "no refill needed");
    assert_eq!(pager.first_index(), Some(0));
    assert_eq!(pager.last_index(), Some(3));
}

#[test]
fn removal_inside_the_window_schedules_a_refill() {
    init_logging();
    let pattern = kinds("HBBBHBB");
    let (mut pager, mut host, ctxs) = build(&pattern, 100.0);
    run_idle(&mut pager, &mut host);

    assert!(pager.on_item_removed(&mut host, &ctxs[2]));
    assert!(pager.is_busy());
    run_idle(&mut pager, &mut host);

    assert_eq!(pager.first_index(), Some(0));
    assert!(pager.live() > 0);
    // Remaining pattern is H,B,B,H,B,B; the window still holds whole
    // groups of it.
    let remaining = kinds("HBBHBB");
    assert_whole_groups(&pager.materialized_slots(), &remaining, 3);
}

#[test]
fn removing_an_absent_context_is_a_failed_noop() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBB"), 100.0);
    run_idle(&mut pager, &mut host);

    let stranger = Rc::new(Entry(Some(SlotKind::Body)));
    assert!(!pager.on_item_removed(&mut host, &stranger));
    assert_eq!(pager.len(), 3);
}

#[test]
fn insertion_into_a_live_pager_coalesces_into_one_refill() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBB"), 100.0);
    run_idle(&mut pager, &mut host);
    let live_before = pager.live();
    host.take_events();

    pager
        .on_item_added(&mut host, 3, Rc::new(Entry(Some(SlotKind::Body))))
        .unwrap();
    pager
        .on_item_added(&mut host, 4, Rc::new(Entry(Some(SlotKind::Header))))
        .unwrap();
    assert!(pager.is_busy());
    assert_eq!(host.released_count(), live_before, "one teardown for the burst");

    run_idle(&mut pager, &mut host);
    assert_eq!(pager.first_index(), Some(0));
    assert_whole_groups(&pager.materialized_slots(), &kinds("HBBBH"), 3);
}

#[test]
fn stop_parks_both_kinds_in_the_pool() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(&kinds("HBBBH"), 1000.0);
    run_idle(&mut pager, &mut host);
    assert_eq!(pager.live(), 5);

    pager.stop(&mut host);
    let stats = pager.pool_stats();
    assert_eq!(stats.pooled_headers, 2);
    assert_eq!(stats.pooled_bodies, 3);
    assert_eq!(pager.drain_pool().len(), 5);
}
