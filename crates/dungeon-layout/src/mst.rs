//! Greedy (Prim-style) minimum spanning tree over room centres.

use dungeon_geo::Point;

/// Returns the spanning-tree edges connecting every point, as
/// `(connected, newly_connected)` index pairs in the order they were chosen.
///
/// The tree grows from index 0. Each round scans every (connected,
/// unconnected) pair and takes the globally closest one; ties keep the first
/// pair found. That is O(n²) per round and O(n³) overall, which is fine for
/// the few dozen rooms a canvas holds.
///
/// Yields exactly `points.len() - 1` edges for a non-empty input and none
/// for zero or one point.
pub fn spanning_edges(points: &[Point]) -> Vec<(usize, usize)> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut connected = vec![false; n];
    let mut tree = Vec::with_capacity(n);
    let mut edges = Vec::with_capacity(n - 1);

    connected[0] = true;
    tree.push(0);

    while tree.len() < n {
        let mut best: Option<(usize, usize, i64)> = None;

        for &a in &tree {
            for b in (0..n).filter(|&b| !connected[b]) {
                let d = points[a].distance_squared(&points[b]);
                if best.is_none_or(|(_, _, min)| d < min) {
                    best = Some((a, b, d));
                }
            }
        }

        // Some unconnected point always exists while the tree is short.
        let Some((a, b, _)) = best else { break };
        connected[b] = true;
        tree.push(b);
        edges.push((a, b));
    }

    edges
}
