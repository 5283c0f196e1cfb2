/// Actor state. The player and the hunter share one representation:
/// a grid position, a sprite stamped relative to it, a FIFO of pending
/// unit steps, and the energy counter that paces how often the
/// scheduler lets a step out of the queue.

use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct Actor {
    pub x: i32,
    pub y: i32,
    /// Sprite pixels as (dx, dy, color), stamped relative to (x, y).
    pub sprite: Vec<(i32, i32, u8)>,
    /// Pending unit steps, consumed front-first by the scheduler.
    pub path: VecDeque<(i32, i32)>,
    /// Counts frames; a step is released when this reaches the threshold.
    pub energy: u32,
    /// Frames per step (inverse speed), always at least 1.
    pub energy_threshold: u32,
}

impl Actor {
    pub fn new(x: i32, y: i32, sprite: Vec<(i32, i32, u8)>, energy_threshold: u32) -> Self {
        Actor {
            x,
            y,
            sprite,
            path: VecDeque::new(),
            energy: 0,
            energy_threshold,
        }
    }

    /// The two-tall column both actors wear: one pixel on the anchor row
    /// and one directly above, same color.
    pub fn column_sprite(color: u8) -> Vec<(i32, i32, u8)> {
        vec![(0, -1, color), (0, 0, color)]
    }
}
