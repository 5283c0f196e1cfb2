/// Planner: turns "walk to this cell" into a queue of unit steps.
///
/// The search itself is the pathfinding crate's `astar` over the
/// collision map, 4-connected with unit costs and a Manhattan
/// heuristic. Everything around it is shaping:
///   1. The search runs in (row, col) space; the public surface speaks
///      (x, y). Coordinates swap on the way in and again on the way out.
///   2. The raw cell walk is simplified: an axis-aligned step followed
///      by a perpendicular one collapses into a single diagonal.
///   3. The surviving cells relativize into unit deltas, first delta
///      taken from the actor's start cell.
///
/// Planning is total: out-of-range goals, blocked goals, unreachable
/// goals and degenerate start==goal requests all come back as an empty
/// queue, never an error.

use std::collections::VecDeque;

use pathfinding::prelude::astar;

use super::grid::CollisionMap;

/// Neighbor offsets in (row, col) order, matching the search space.
const DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Plan a walk from `start` to `goal` and deliver it as scheduler-ready
/// unit steps. `start` is an actor position and therefore in range;
/// `goal` may be anything (pointer clicks land wherever they land).
pub fn plan_path(
    start: (i32, i32),
    goal: (i32, i32),
    map: &CollisionMap,
) -> VecDeque<(i32, i32)> {
    if !map.in_bounds(goal.0, goal.1) {
        return VecDeque::new();
    }
    if map.blocked(goal.0, goal.1) {
        return VecDeque::new();
    }

    let start_rc = (start.1 as usize, start.0 as usize);
    let goal_rc = (goal.1 as usize, goal.0 as usize);
    let raw = match search(map, start_rc, goal_rc) {
        Some(cells) => cells,
        None => return VecDeque::new(),
    };

    // Reverse into walk order, swapping axes back to (x, y) as we go.
    let cells: Vec<(i32, i32)> = raw
        .iter()
        .rev()
        .map(|&(r, c)| (c as i32, r as i32))
        .collect();
    let cells = simplify(&cells, start);
    relativize(&cells, start)
}

/// Run the grid search. Nodes are (row, col). The result comes back in
/// goal→start order with the start cell left off, which is the shape
/// the pipeline above expects; `None` means unreachable.
fn search(
    map: &CollisionMap,
    start: (usize, usize),
    goal: (usize, usize),
) -> Option<Vec<(usize, usize)>> {
    let (found, _cost) = astar(
        &start,
        |&(r, c)| {
            let mut next = Vec::with_capacity(4);
            for &(dr, dc) in &DIRS {
                let nr = r as i32 + dr;
                let nc = c as i32 + dc;
                if !map.blocked(nc, nr) {
                    next.push(((nr as usize, nc as usize), 1u32));
                }
            }
            next
        },
        |&(r, c)| (r.abs_diff(goal.0) + c.abs_diff(goal.1)) as u32,
        |&node| node == goal,
    )?;
    Some(found.into_iter().skip(1).rev().collect())
}

// ── Staircase simplification ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Scan {
    Idle,
    /// A horizontal step landed on the remembered cell; a vertical step
    /// next makes that cell a corner to fuse away.
    ArmedH(usize),
    /// Mirror case: vertical step armed, horizontal fuses.
    ArmedV(usize),
}

/// One pass over the walk order, marking staircase corners and copying
/// the survivors. A fused corner's two unit steps relativize into one
/// diagonal. A same-axis repeat disarms the scan instead of re-arming
/// on the newer cell: H,H,V stays unfused while H,H,H,V fuses only its
/// trailing pair.
fn simplify(cells: &[(i32, i32)], start: (i32, i32)) -> Vec<(i32, i32)> {
    let mut fused = vec![false; cells.len()];
    let mut scan = Scan::Idle;
    let (mut px, mut py) = start;
    for (i, &(x, y)) in cells.iter().enumerate() {
        let horizontal = y == py && (x - px).abs() == 1;
        let vertical = x == px && (y - py).abs() == 1;
        scan = match scan {
            Scan::Idle if horizontal => Scan::ArmedH(i),
            Scan::Idle if vertical => Scan::ArmedV(i),
            Scan::ArmedH(corner) if vertical => {
                fused[corner] = true;
                Scan::Idle
            }
            Scan::ArmedV(corner) if horizontal => {
                fused[corner] = true;
                Scan::Idle
            }
            _ => Scan::Idle,
        };
        px = x;
        py = y;
    }
    cells
        .iter()
        .zip(fused.iter())
        .filter(|&(_, &gone)| !gone)
        .map(|(&cell, _)| cell)
        .collect()
}

/// Absolute cells → consecutive deltas, first relative to `start`.
fn relativize(cells: &[(i32, i32)], start: (i32, i32)) -> VecDeque<(i32, i32)> {
    let (mut px, mut py) = start;
    cells
        .iter()
        .map(|&(x, y)| {
            let step = (x - px, y - py);
            px = x;
            py = y;
            step
        })
        .collect()
}
