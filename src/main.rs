use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use ladder_runner::engine::game_loop::TickClock;
use ladder_runner::engine::input::{Action, InputCollector};
use ladder_runner::engine::physics::{TileMap, TileWorld, DEMO_LEVEL};
use ladder_runner::game::player::{
    apply_frame, AnimationPlayer, MovementStats, PlayerController, PresentationFrame,
};

/// Where the player teleports in: on the raised ledge at the left of the level
const SPAWN_POINT: Vec2 = Vec2::new(40.0, 198.0);

fn show(animation: &mut AnimationPlayer, frame: &PresentationFrame) {
    if let Err(err) = apply_frame(animation, frame) {
        warn!("Dropped frame: {}", err);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Ladder Runner...");

    let map = TileMap::parse(DEMO_LEVEL).context("Failed to parse the demo level")?;
    let stats = MovementStats::default().with_world_width(map.pixel_size().x);
    let mut world = TileWorld::new(map);
    let mut controller =
        PlayerController::new(stats, SPAWN_POINT).context("Invalid movement stats")?;
    let mut animation = AnimationPlayer::with_player_clips();
    let mut input = InputCollector::new();
    let mut clock = TickClock::new();
    let mut last_clip = "";

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ladder Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(1024, 480))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");
    info!("Arrows move, Z jumps, X fires, Space takes a hit, T teleports out, P pauses");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                let action = input.process_keyboard_event(&event);
                if !event.state.is_pressed() || event.repeat {
                    return;
                }
                match action {
                    Some(Action::Pause) => clock.toggle_pause(),
                    Some(Action::TeleportOut) => {
                        if let Some(frame) = controller.begin_teleport_out() {
                            show(&mut animation, &frame);
                        }
                    }
                    _ => {}
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for _ in 0..clock.begin_frame() {
                    let frame = controller.tick(&input.snapshot(), &mut world);
                    input.end_tick();

                    if let Some(change) = controller.last_change() {
                        info!("{:?} -> {:?}", change.from, change.to);
                    }
                    if frame.animation_clip != last_clip {
                        debug!("clip {}", frame.animation_clip);
                        last_clip = frame.animation_clip;
                    }
                    show(&mut animation, &frame);

                    if let Some(token) = animation.update(clock.fixed_timestep()) {
                        if let Some(frame) = controller.on_animation_complete(&token) {
                            info!("{} finished, now {:?}", token, controller.state());
                            show(&mut animation, &frame);
                        }
                    }
                }
                debug!(
                    "player at ({:.1}, {:.1})",
                    controller.actor().position.x,
                    controller.actor().position.y
                );
                window.request_redraw();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
