//! Full-widget tests for the block pager against a recording host.

use std::rc::Rc;

use spool_core::config::BlockPagingConfig;
use spool_widgets::BlockPager;
use spool_widgets::testing::{HostEvent, RecordingHost};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Defaults: 15 shown, blocks of 5, rest band [10, 30], rebases 10/20.
fn cfg() -> BlockPagingConfig {
    BlockPagingConfig::default()
}

fn build(n: usize) -> (BlockPager<usize, usize>, RecordingHost, Vec<Rc<usize>>) {
    let mut host = RecordingHost::new();
    let mut pager = BlockPager::new(cfg());
    let ctxs: Vec<Rc<usize>> = (0..n).map(Rc::new).collect();
    for (i, ctx) in ctxs.iter().enumerate() {
        pager.on_item_added(&mut host, i, ctx.clone());
    }
    pager.start(&mut host);
    (pager, host, ctxs)
}

#[test]
fn start_loads_the_first_page() {
    init_logging();
    let (pager, host, ctxs) = build(45);
    assert_eq!((pager.start_index(), pager.end_index()), (0, 15));
    assert_eq!(pager.live(), 15);
    assert_eq!(host.bound_indices(), (0..15).collect::<Vec<_>>());

    let live = pager.live_contexts();
    assert!(Rc::ptr_eq(&live[0], &ctxs[0]));
    assert!(Rc::ptr_eq(&live[14], &ctxs[14]));
}

#[test]
fn short_lists_load_entirely() {
    init_logging();
    let (pager, host, _ctxs) = build(4);
    assert_eq!(pager.live(), 4);
    assert_eq!(host.bound_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn forward_snap_steps_until_the_offset_rests() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(45);

    // 75 is 45 past the forward threshold of 30; each step rebases the
    // offset down by 20, so three steps bring it to 15 (inside [10, 30]).
    pager.drag_began();
    pager.drag_ended(&mut host, 75.0);

    assert_eq!((pager.start_index(), pager.end_index()), (15, 30));
    assert_eq!(pager.offset(), 15.0);
}

#[test]
fn backward_snap_mirrors_the_forward_formula() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(45);
    pager.drag_began();
    pager.drag_ended(&mut host, 75.0); // [15, 30), offset 15

    // 15 - 20 = -5 sits 15 below the backward threshold of 10; each step
    // rebases up by 10, so two steps bring it to 15.
    pager.drag_began();
    pager.drag_ended(&mut host, -20.0);

    assert_eq!((pager.start_index(), pager.end_index()), (5, 20));
    assert_eq!(pager.offset(), 15.0);
}

#[test]
fn snap_stops_at_the_list_head() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(45);
    pager.drag_began();
    pager.drag_ended(&mut host, -500.0);

    assert_eq!((pager.start_index(), pager.end_index()), (0, 15));
    // Blocked at the head: the offset keeps its out-of-band value.
    assert_eq!(pager.offset(), -500.0);
}

#[test]
fn ragged_tail_pins_without_rebasing() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(18);

    pager.drag_began();
    pager.drag_ended(&mut host, 100.0);

    // 18 % 15 != 0: the final partial block mounts but nothing unloads
    // and the offset is not rebased, so the short page stays in place.
    assert_eq!((pager.start_index(), pager.end_index()), (0, 18));
    assert_eq!(pager.live(), 18);
    assert_eq!(pager.offset(), 100.0);

    // Further forward pressure is blocked outright.
    pager.drag_began();
    pager.drag_ended(&mut host, 50.0);
    assert_eq!((pager.start_index(), pager.end_index()), (0, 18));
}

#[test]
fn inertial_delta_fires_a_single_half_rebased_step() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(45);

    pager.scroll_delta(&mut host, 50.0);
    assert_eq!((pager.start_index(), pager.end_index()), (5, 20));
    // forward_rebase + (50 - forward_threshold) / 2 = 10 + 10.
    assert_eq!(pager.offset(), 20.0);

    // The rebased offset rests inside the band; no further step.
    pager.scroll_delta(&mut host, 5.0);
    assert_eq!((pager.start_index(), pager.end_index()), (5, 20));
}

#[test]
fn drag_deltas_accumulate_without_stepping() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(45);

    pager.drag_began();
    pager.drag_delta(40.0);
    pager.drag_delta(40.0);
    assert_eq!((pager.start_index(), pager.end_index()), (0, 15));
    assert_eq!(pager.offset(), 80.0);

    // Inertial input is ignored mid-gesture.
    pager.scroll_delta(&mut host, 40.0);
    assert_eq!(pager.offset(), 80.0);

    pager.drag_ended(&mut host, 0.0);
    assert_eq!((pager.start_index(), pager.end_index()), (15, 30));
}

#[test]
fn steps_reuse_pooled_handles_once_primed() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(60);

    // The first forward step loads before it unloads, so it constructs a
    // fresh block; every later step draws that block back from the pool.
    pager.drag_began();
    pager.drag_ended(&mut host, 55.0); // one step
    assert_eq!(host.created_count(), 20);

    pager.drag_began();
    pager.drag_ended(&mut host, 200.0);
    pager.drag_began();
    pager.drag_ended(&mut host, -300.0);
    assert_eq!(host.created_count(), 20);
    assert!(pager.pool_stats().reused > 0);
}

#[test]
fn insert_inside_the_window_mounts_at_its_slot() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(30);
    host.take_events();

    pager.on_item_added(&mut host, 3, Rc::new(99));
    assert_eq!(pager.end_index(), 16);
    let bound = host
        .take_events()
        .into_iter()
        .find_map(|e| match e {
            HostEvent::Bound { index, placement, .. } => Some((index, placement)),
            _ => None,
        })
        .unwrap();
    assert_eq!(bound.0, 3);
    assert_eq!(bound.1, spool_core::types::Placement::At(3));
}

#[test]
fn append_tops_up_only_an_underfilled_window() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(4);

    pager.on_item_added(&mut host, 4, Rc::new(4));
    assert_eq!(pager.live(), 5);

    let (mut pager, mut host, _ctxs) = build(30);
    host.take_events();
    pager.on_item_added(&mut host, 30, Rc::new(30));
    assert_eq!(pager.live(), 15);
    assert!(host.take_events().is_empty());
}

#[test]
fn removal_tops_the_window_back_up() {
    init_logging();
    let (mut pager, mut host, ctxs) = build(30);

    assert!(pager.on_item_removed(&mut host, &ctxs[7]));
    assert_eq!((pager.start_index(), pager.end_index()), (0, 15));
    assert_eq!(pager.live(), 15);
    assert_eq!(pager.len(), 29);

    let stranger = Rc::new(7usize);
    assert!(!pager.on_item_removed(&mut host, &stranger));
}

#[test]
fn removal_at_a_covered_tail_grows_toward_the_front() {
    init_logging();
    let (mut pager, mut host, ctxs) = build(30);
    pager.drag_began();
    pager.drag_ended(&mut host, 95.0); // three steps to [15, 30)
    assert_eq!((pager.start_index(), pager.end_index()), (15, 30));

    assert!(pager.on_item_removed(&mut host, &ctxs[20]));
    assert_eq!((pager.start_index(), pager.end_index()), (14, 29));
    assert_eq!(pager.live(), 15);
}

#[test]
fn reset_rebuilds_from_the_pool() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(30);
    assert_eq!(host.created_count(), 15);

    pager.on_data_reset(&mut host);
    assert_eq!(pager.live(), 0);
    assert!(pager.is_empty());

    for i in 0..10 {
        pager.on_item_added(&mut host, i, Rc::new(i));
    }
    assert_eq!(pager.live(), 10);
    assert_eq!(host.created_count(), 15, "rebuild and top-ups reuse the pool");
}

#[test]
fn stop_parks_the_page_in_the_pool() {
    init_logging();
    let (mut pager, mut host, _ctxs) = build(30);
    pager.stop(&mut host);
    assert_eq!(pager.live(), 0);
    assert_eq!(pager.pool_stats().pooled_bodies, 15);
    assert_eq!(pager.drain_pool().len(), 15);
}
