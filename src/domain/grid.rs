/// Obstacle field and the collision view derived from it.
/// The grid stores 256-color ids (0 = empty); everything that needs to
/// know "can an actor stand here" asks the CollisionMap instead of
/// re-deriving the rule, so blocking semantics are centralized here.

use rand::Rng;

// ── Grid: the generated terrain ──

/// Rectangular field of color ids, row-major, immutable once generated.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<u8>>,
}

impl Grid {
    pub fn from_cells(cells: Vec<Vec<u8>>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.len());
        Grid { width, height, cells }
    }

    /// Roll a fresh field: each cell has a 1-in-`obstacle_chance` shot at
    /// becoming an obstacle, colored uniformly from `color_min..=color_max`.
    pub fn random(
        width: usize,
        height: usize,
        obstacle_chance: u32,
        color_min: u8,
        color_max: u8,
        rng: &mut impl Rng,
    ) -> Self {
        let mut cells = vec![vec![0u8; width]; height];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                if rng.gen_range(0..obstacle_chance) == 0 {
                    *cell = rng.gen_range(color_min..=color_max);
                }
            }
        }
        Grid { width, height, cells }
    }

    /// Color id at (x, y). Callers stay in range.
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }
}

// ── CollisionMap: the 0/1 view the planner and scheduler share ──

/// Same shape as the grid it was built from; a cell is blocked exactly
/// when the grid holds a non-zero color there. Queries outside the field
/// count as blocked, so the edge behaves like a wall.
#[derive(Clone, Debug)]
pub struct CollisionMap {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<bool>>,
}

impl CollisionMap {
    pub fn build(grid: &Grid) -> Self {
        let cells = (0..grid.height)
            .map(|y| (0..grid.width).map(|x| grid.at(x, y) != 0).collect())
            .collect();
        CollisionMap { width: grid.width, height: grid.height, cells }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn blocked(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[y as usize][x as usize]
    }
}
