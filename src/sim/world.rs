/// World: the complete snapshot of a running round.
///
/// A round is terrain plus two actors:
///   - `grid`      — the generated obstacle field. Never mutated; a
///                   reset replaces it wholesale.
///   - `collision` — the 0/1 view of the grid shared by the planner
///                   and the movement scheduler.
///   - `player`    — steered by keys and pointer clicks.
///   - `hunter`    — walks computed paths toward the player.
///
/// `dirty` is the redraw flag: set when an actor actually moved or the
/// round was rebuilt, cleared by the frame loop once it repaints.
///
/// Spawn cells are not carved out of the terrain. A walled-in spawn is
/// legal; planning toward or out of it just degrades to empty paths.

use rand::Rng;

use crate::config::Config;
use crate::domain::actor::Actor;
use crate::domain::grid::{CollisionMap, Grid};
use crate::domain::path;

/// Player anchor cell at round start. The sprite's upper pixel sits on
/// the row above, so the anchor starts one row down.
const PLAYER_SPAWN: (i32, i32) = (0, 1);

pub struct World {
    pub grid: Grid,
    pub collision: CollisionMap,
    pub player: Actor,
    pub hunter: Actor,
    pub dirty: bool,
}

impl World {
    pub fn new(config: &Config) -> Self {
        Self::generate(config, &mut rand::thread_rng())
    }

    /// Tear the round down and roll a fresh one: new terrain, both
    /// actors recreated, hunter replanned from its new spawn.
    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }

    fn generate(config: &Config, rng: &mut impl Rng) -> Self {
        let grid = Grid::random(
            config.window.width,
            config.window.height,
            config.terrain.obstacle_chance,
            config.terrain.color_min,
            config.terrain.color_max,
            rng,
        );
        let collision = CollisionMap::build(&grid);

        let player = Actor::new(
            PLAYER_SPAWN.0,
            PLAYER_SPAWN.1,
            Actor::column_sprite(config.actors.player_color),
            config.speed.player_energy,
        );

        // The hunter starts somewhere in the lower-right quadrant, away
        // from the player's corner.
        let w = grid.width as i32;
        let h = grid.height as i32;
        let hx = rng.gen_range(w / 2..w);
        let hy = rng.gen_range(h / 2..h);
        let mut hunter = Actor::new(
            hx,
            hy,
            Actor::column_sprite(config.actors.hunter_color),
            config.speed.hunter_energy,
        );
        hunter.path = path::plan_path((hx, hy), (player.x, player.y), &collision);

        World {
            grid,
            collision,
            player,
            hunter,
            dirty: true,
        }
    }
}
