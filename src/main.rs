/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use config::Config;
use domain::path;
use sim::step;
use sim::world::World;
use ui::input::{self, Command, InputEvent};
use ui::renderer::Screen;

fn main() {
    let config = Config::load();

    let mut world = World::new(&config);
    let mut screen = Screen::new(
        config.window.width,
        config.window.height,
        config.window.charset,
    );
    screen.set_background(&world.grid);

    if let Err(e) = screen.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    run(&mut world, &mut screen, &config);

    if let Err(e) = screen.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
}

/// The frame loop. Each iteration: at most one input event, one
/// scheduler tick, a repaint when something moved, then a fixed nap.
fn run(world: &mut World, screen: &mut Screen, config: &Config) {
    let frame_sleep = Duration::from_millis(config.speed.frame_sleep_ms);

    loop {
        match input::poll_event() {
            Some(InputEvent::Key(Command::Quit)) => break,
            Some(InputEvent::Key(Command::Reset)) => {
                world.reset(config);
                screen.set_background(&world.grid);
            }
            Some(InputEvent::Key(Command::Step(dx, dy))) => {
                world.player.path = VecDeque::from([(dx, dy)]);
            }
            Some(InputEvent::PlanAt { col, row, sub }) => {
                let goal = screen.terminal_to_grid(col as i32, row as i32, sub);
                world.player.path =
                    path::plan_path((world.player.x, world.player.y), goal, &world.collision);
            }
            None => {}
        }

        step::tick(world);

        if world.dirty {
            world.dirty = false;
            screen.load_background();
            screen.stamp(&world.player);
            screen.stamp(&world.hunter);
            screen.present();
        }

        thread::sleep(frame_sleep);
    }
}
