//! Whole-layout properties checked on seeded runs of the generator.

use std::collections::HashSet;

use dungeon_geo::{Dimension, Rect};
use dungeon_layout::{Generator, Layout, LayoutConfig, Match, Room};
use rand::SeedableRng;
use rand::rngs::StdRng;

// =========================================================================
// Helpers
// =========================================================================

fn reference_config() -> LayoutConfig {
    LayoutConfig {
        canvas: Dimension::new(1280, 720),
        unit: Dimension::new(64, 12),
        ..LayoutConfig::default()
    }
}

fn generate(seed: u64) -> Layout {
    let generator = Generator::new(reference_config()).expect("valid config");
    generator
        .generate(&mut StdRng::seed_from_u64(seed))
        .expect("no invariant violation")
}

/// Coordinates a room claims on one axis: low wall, centre, high wall, and
/// the buffer band next to each.
fn claimed(low: i32, center: i32, high: i32, band: i32) -> HashSet<i32> {
    let mut set: HashSet<i32> = [low, center, high].into_iter().collect();
    for i in 1..=band {
        set.insert(low + i);
        set.insert(high - i);
        set.insert(center - band / 2 + i);
    }
    set
}

fn claimed_x(room: &Room, band: i32) -> HashSet<i32> {
    let r = room.rect();
    claimed(r.left(), r.cx(), r.right(), band)
}

fn claimed_y(room: &Room, band: i32) -> HashSet<i32> {
    let r = room.rect();
    claimed(r.top(), r.cy(), r.bottom(), band)
}

/// Index of the room whose centre sits on the given corridor end.
fn room_at(rooms: &[Room], rect: &Rect) -> Vec<usize> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| rect.contains_point(&room.center()))
        .map(|(i, _)| i)
        .collect()
}

fn find(parent: &mut [usize], i: usize) -> usize {
    let mut root = i;
    while parent[root] != root {
        root = parent[root];
    }
    parent[i] = root;
    root
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn test_rooms_do_not_overlap_with_margin() {
    let layout = generate(42);
    let margin = reference_config().corridor_width;
    assert!(layout.rooms.len() > 1, "expected a non-trivial layout");

    for (i, a) in layout.rooms.iter().enumerate() {
        for b in &layout.rooms[i + 1..] {
            assert!(
                !a.overlaps(b, margin),
                "{} and {} overlap within {margin}px",
                a.rect(),
                b.rect()
            );
        }
    }
}

#[test]
fn test_wall_and_center_coordinates_never_collide() {
    let layout = generate(42);
    let band = reference_config().corridor_width;

    for (i, a) in layout.rooms.iter().enumerate() {
        for b in &layout.rooms[i + 1..] {
            assert!(claimed_x(a, band).is_disjoint(&claimed_x(b, band)));
            assert!(claimed_y(a, band).is_disjoint(&claimed_y(b, band)));
            assert_ne!(a.center().x, b.center().x);
            assert_ne!(a.center().y, b.center().y);
        }
    }
}

#[test]
fn test_corridors_form_a_spanning_tree() {
    let layout = generate(42);
    let n = layout.rooms.len();
    assert_eq!(layout.corridors.len(), n - 1);

    // Each corridor touches exactly two room centres, one per strip end.
    // Union-find over those pairs must never close a cycle and must end
    // with a single component.
    let mut parent: Vec<usize> = (0..n).collect();
    for corridor in &layout.corridors {
        let h = corridor.horizontal_line();
        let v = corridor.vertical_line();
        let junction = corridor.junction();
        let h_end = if h.p1 == junction { h.p2 } else { h.p1 };
        let v_end = if v.p1 == junction { v.p2 } else { v.p1 };

        let a = room_at(&layout.rooms, &Rect::new(h_end.x, h_end.y, h_end.x, h_end.y));
        let b = room_at(&layout.rooms, &Rect::new(v_end.x, v_end.y, v_end.x, v_end.y));
        assert_eq!(a.len(), 1, "horizontal end must be a room centre");
        assert_eq!(b.len(), 1, "vertical end must be a room centre");

        let (ra, rb) = (find(&mut parent, a[0]), find(&mut parent, b[0]));
        assert_ne!(ra, rb, "corridor closes a cycle");
        parent[ra] = rb;
    }

    let root = find(&mut parent, 0);
    for i in 0..n {
        assert_eq!(find(&mut parent, i), root, "room {i} is unreachable");
    }
}

#[test]
fn test_same_seed_reproduces_layout() {
    let first = generate(1234);
    let second = generate(1234);
    assert_eq!(first, second);

    let other = generate(4321);
    assert_ne!(first.rooms, other.rooms);
}

#[test]
fn test_properties_hold_across_seeds() {
    let config = LayoutConfig {
        attempts: 10_000,
        ..reference_config()
    };
    let generator = Generator::new(config.clone()).unwrap();

    for seed in 0..5 {
        let m = Match::random(&generator, &mut StdRng::seed_from_u64(seed))
            .expect("default canvas always fits a room");
        assert_eq!(m.corridors().len(), m.rooms().len() - 1);
        for (i, a) in m.rooms().iter().enumerate() {
            for b in &m.rooms()[i + 1..] {
                assert!(!a.overlaps(b, config.corridor_width));
            }
        }
    }
}
