/// The per-frame scheduler: advances both actors by one tick.
///
/// Processing order each frame:
///   1. Player gate: when energy reaches the threshold, spend it and
///      try the front queued step. A step that lands in bounds on an
///      open cell moves the player and replans the hunter toward the
///      new cell; anything else is discarded silently.
///   2. Hunter gate: same rule, no replanning.
///   3. Energy: both actors gain 1, always.
///
/// With threshold T and a non-empty queue this releases exactly one
/// step every T frames in steady state, and energy never leaves
/// [0, T].

use crate::domain::actor::Actor;
use crate::domain::grid::CollisionMap;
use crate::domain::path;

use super::world::World;

pub fn tick(world: &mut World) {
    // ── Player ──
    if world.player.energy == world.player.energy_threshold {
        world.player.energy = 0;
        if let Some(step) = world.player.path.pop_front() {
            if try_step(&mut world.player, step, &world.collision) {
                world.dirty = true;
                replan_hunter(world);
            }
        }
    }

    // ── Hunter ──
    if world.hunter.energy == world.hunter.energy_threshold {
        world.hunter.energy = 0;
        if let Some(step) = world.hunter.path.pop_front() {
            if try_step(&mut world.hunter, step, &world.collision) {
                world.dirty = true;
            }
        }
    }

    world.player.energy += 1;
    world.hunter.energy += 1;
}

/// Validate and apply one step. Rejections leave the actor in place.
fn try_step(actor: &mut Actor, (dx, dy): (i32, i32), map: &CollisionMap) -> bool {
    let nx = actor.x + dx;
    let ny = actor.y + dy;
    if !map.in_bounds(nx, ny) || map.blocked(nx, ny) {
        return false;
    }
    actor.x = nx;
    actor.y = ny;
    true
}

/// The player moved, so whatever walk the hunter had queued is stale.
/// Plan a fresh one toward the player's new cell.
fn replan_hunter(world: &mut World) {
    world.hunter.path = path::plan_path(
        (world.hunter.x, world.hunter.y),
        (world.player.x, world.player.y),
        &world.collision,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Grid;
    use std::collections::VecDeque;

    /// '.' = open floor, '#' = obstacle. Both actors start with empty
    /// sprites and threshold 1; tests override what they need.
    fn world_from(rows: &[&str], player: (i32, i32), hunter: (i32, i32)) -> World {
        let cells = rows
            .iter()
            .map(|row| {
                row.bytes()
                    .map(|b| if b == b'#' { 1u8 } else { 0 })
                    .collect()
            })
            .collect();
        let grid = Grid::from_cells(cells);
        let collision = CollisionMap::build(&grid);
        World {
            grid,
            collision,
            player: Actor::new(player.0, player.1, vec![], 1),
            hunter: Actor::new(hunter.0, hunter.1, vec![], 1),
            dirty: false,
        }
    }

    #[test]
    fn steps_release_once_per_threshold_frames() {
        let mut world = world_from(&[".....", "....."], (0, 0), (4, 1));
        world.player.energy_threshold = 2;
        world.player.path = VecDeque::from(vec![(1, 0), (1, 0), (1, 0)]);

        let mut positions = vec![];
        for _ in 0..7 {
            tick(&mut world);
            positions.push(world.player.x);
        }
        assert_eq!(positions, vec![0, 0, 1, 1, 2, 2, 3]);
        assert!(world.dirty);
        assert!(world.player.path.is_empty());
    }

    #[test]
    fn rejected_step_is_discarded_silently() {
        let mut world = world_from(&[".#.", "..."], (0, 0), (2, 1));
        world.player.path = VecDeque::from(vec![(1, 0)]);

        tick(&mut world); // energy 0 → 1, gate closed
        tick(&mut world); // gate opens, step pops, wall refuses it

        assert_eq!((world.player.x, world.player.y), (0, 0));
        assert!(!world.dirty);
        assert!(world.player.path.is_empty());
    }

    #[test]
    fn step_off_the_field_is_rejected() {
        let mut world = world_from(&["..", ".."], (0, 0), (1, 1));
        world.player.path = VecDeque::from(vec![(-1, 0)]);

        tick(&mut world);
        tick(&mut world);

        assert_eq!((world.player.x, world.player.y), (0, 0));
        assert!(!world.dirty);
    }

    #[test]
    fn player_move_replans_the_hunter() {
        let mut world = world_from(
            &["......", "......", "......", "......"],
            (0, 0),
            (4, 2),
        );
        world.hunter.energy_threshold = 100;
        world.hunter.path = VecDeque::from(vec![(0, -1), (0, -1)]);
        world.player.path = VecDeque::from(vec![(1, 0)]);

        tick(&mut world);
        tick(&mut world); // player steps to (1, 0) here

        assert_eq!((world.player.x, world.player.y), (1, 0));
        assert!(!world.hunter.path.is_empty());
        let (mut x, mut y) = (world.hunter.x, world.hunter.y);
        for &(dx, dy) in &world.hunter.path {
            x += dx;
            y += dy;
        }
        assert_eq!((x, y), (1, 0), "fresh plan should end on the player");
    }

    #[test]
    fn hunter_steps_are_validated_too() {
        let mut world = world_from(&["...", ".#."], (0, 0), (0, 1));
        world.hunter.path = VecDeque::from(vec![(1, 0)]);

        tick(&mut world);
        tick(&mut world);

        assert_eq!((world.hunter.x, world.hunter.y), (0, 1));
        assert!(!world.dirty);
        assert!(world.hunter.path.is_empty());
    }

    #[test]
    fn hunter_walks_a_planned_path() {
        let mut world = world_from(&["....", "...."], (0, 0), (3, 1));
        world.player.energy_threshold = 100;
        world.hunter.path =
            path::plan_path((3, 1), (0, 0), &world.collision);
        assert!(!world.hunter.path.is_empty());

        for _ in 0..20 {
            tick(&mut world);
        }
        assert_eq!((world.hunter.x, world.hunter.y), (0, 0));
        assert!(world.dirty);
    }
}
