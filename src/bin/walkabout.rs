//! Walkabout - Headless Controller Demo
//!
//! Run with: `cargo run --bin walkabout -- [--verbose] [config.json]`
//!
//! Plays a scripted walk through a small course and logs every controller
//! event: a sprint down the field, a crouch under a low overhang (with a
//! refused attempt to stand), a running jump onto a ledge, and a drop toward
//! a loose crate.
//!
//! Course layout, walked toward +Z starting at x = 5:
//! - Grass/gravel floor, 5 m cells
//! - Overhang 1.12 m above the floor for z in [15, 18]
//! - 1.5 m ledge for z in [30, 40], a dynamic crate beyond it

use std::error::Error;
use std::fs;

use glam::Vec3;
use log::{debug, info};
use vantage_engine::physics::{BodyDesc, BodyHandle, ColliderDesc, Shape, SurfaceSource, SurfaceTag};
use vantage_engine::{
    CharacterBody, ControllerConfig, ControllerEvent, FirstPersonController, KeyCode, KeyboardInput, SceneWorld,
    logging,
};

const DT: f32 = 1.0 / 60.0;

const GRASS: SurfaceTag = SurfaceTag(1);
const GRAVEL: SurfaceTag = SurfaceTag(2);
const WOOD: SurfaceTag = SurfaceTag(3);

/// One stretch of the script: keys held for a while.
struct Segment {
    label: &'static str,
    seconds: f32,
    keys: &'static [KeyCode],
    /// Mouse delta per frame
    look: (f32, f32),
}

const SCRIPT: &[Segment] = &[
    Segment {
        label: "walk",
        seconds: 1.5,
        keys: &[KeyCode::W],
        look: (0.0, 0.0),
    },
    Segment {
        label: "sprint",
        seconds: 1.2,
        keys: &[KeyCode::W, KeyCode::ShiftLeft],
        look: (0.0, 0.0),
    },
    Segment {
        label: "crouch",
        seconds: 0.5,
        keys: &[KeyCode::C],
        look: (0.0, 0.0),
    },
    Segment {
        label: "crouch walk",
        seconds: 1.5,
        keys: &[KeyCode::W],
        look: (0.0, 0.0),
    },
    Segment {
        label: "try to stand",
        seconds: 0.5,
        keys: &[KeyCode::C],
        look: (0.0, 0.0),
    },
    Segment {
        label: "crouch walk out",
        seconds: 3.0,
        keys: &[KeyCode::W],
        look: (0.0, 0.0),
    },
    Segment {
        label: "stand",
        seconds: 0.5,
        keys: &[KeyCode::C],
        look: (0.0, 0.0),
    },
    Segment {
        label: "look around",
        seconds: 0.5,
        keys: &[],
        look: (0.4, 0.1),
    },
    Segment {
        label: "look back",
        seconds: 0.5,
        keys: &[],
        look: (-0.4, -0.1),
    },
    Segment {
        label: "run up",
        seconds: 1.0,
        keys: &[KeyCode::W, KeyCode::ShiftLeft],
        look: (0.0, 0.0),
    },
    Segment {
        label: "running jump",
        seconds: 3.5,
        keys: &[KeyCode::W, KeyCode::Space],
        look: (0.0, 0.0),
    },
    Segment {
        label: "walk off the ledge",
        seconds: 4.0,
        keys: &[KeyCode::W],
        look: (0.0, 0.0),
    },
    Segment {
        label: "hop",
        seconds: 3.0,
        keys: &[KeyCode::Space],
        look: (0.0, 0.0),
    },
];

fn build_course() -> (SceneWorld, BodyHandle) {
    let mut world = SceneWorld::new();

    // Floor alternating grass and gravel rows along +Z
    let rows = 20;
    let cells = (0..rows)
        .flat_map(|row| {
            let tag = if row % 2 == 0 { GRASS } else { GRAVEL };
            [tag; 2]
        })
        .collect();
    world.add_collider(ColliderDesc::new(Shape::floor(0.0)).with_surface(SurfaceSource::Terrain {
        cell_size: 5.0,
        columns: 2,
        cells,
    }));

    world.add_collider(ColliderDesc::new(Shape::Box {
        min: Vec3::new(2.0, 1.12, 15.0),
        max: Vec3::new(8.0, 1.6, 18.0),
    }));

    world.add_collider(
        ColliderDesc::new(Shape::Box {
            min: Vec3::new(0.0, 0.0, 30.0),
            max: Vec3::new(10.0, 1.5, 40.0),
        })
        .with_surface(SurfaceSource::Fixed(GRAVEL)),
    );

    let crate_body = world.add_body(BodyDesc::dynamic(80.0).with_surface(WOOD));
    world.add_collider(
        ColliderDesc::new(Shape::Box {
            min: Vec3::new(3.5, 0.0, 42.0),
            max: Vec3::new(6.5, 0.6, 46.0),
        })
        .attached_to(crate_body),
    );

    (world, crate_body)
}

fn load_config(path: Option<&str>) -> Result<ControllerConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let config = ControllerConfig::from_json_str(&text)?;
            info!("loaded controller config from {path}");
            Ok(config)
        }
        None => Ok(ControllerConfig::default()),
    }
}

/// Integrate the body and rest it on the course, like a minimal solver would.
fn integrate(controller: &mut FirstPersonController, world: &SceneWorld) {
    let gravity = controller.gravity();
    let body = controller.body_mut();
    body.integrate(DT, gravity);

    if body.velocity.y <= 0.0 {
        if let Some(ground) = world.ground_height(body.position) {
            if body.position.y < ground {
                body.position.y = ground;
                body.velocity.y = 0.0;
            }
        }
    }
}

fn report(event: &ControllerEvent, position: Vec3) {
    match event {
        ControllerEvent::Landed(record) => info!(
            "  landed at ({:.1}, {:.1}, {:.1}): fell {:.2} m, travelled {:.2} m, {} jump(s)",
            position.x, position.y, position.z, record.fall_distance, record.travel_distance, record.jump_count
        ),
        ControllerEvent::TransitionStart { from, to } => info!("  pose {from} -> {to}"),
        ControllerEvent::TransitionEnd { state } => info!("  pose settled: {state}"),
        ControllerEvent::Footstep(cue) => debug!("  footstep ({}, surface {:?})", cue.state, cue.surface),
        other => info!("  {other:?}"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let config_path = args.iter().find(|a| !a.starts_with('-')).map(String::as_str);

    logging::init(verbose);

    let config = load_config(config_path)?;
    let (mut world, crate_body) = build_course();
    // Turned around to face +Z
    let body = CharacterBody {
        yaw: 180.0,
        ..CharacterBody::at(Vec3::new(5.0, 0.0, 1.0))
    };
    let mut controller = FirstPersonController::new(config, body)?;
    let mut keyboard = KeyboardInput::new();

    let mut footsteps = 0;
    for segment in SCRIPT {
        info!("== {} ({:.1} s)", segment.label, segment.seconds);

        keyboard.reset();
        for &key in segment.keys {
            keyboard.handle_key(key, true);
        }

        let frames = (segment.seconds / DT).round() as usize;
        for _ in 0..frames {
            keyboard.add_look(segment.look.0, segment.look.1);
            let input = keyboard.next_frame();
            controller.step(DT, &input, &mut world);
            integrate(&mut controller, &world);

            let position = controller.position();
            for event in controller.drain_events() {
                if matches!(event, ControllerEvent::Footstep(_)) {
                    footsteps += 1;
                }
                report(&event, position);
            }
        }

        let position = controller.position();
        info!(
            "   at ({:.1}, {:.1}, {:.1}) yaw {:.0}, {} {}, {:.2} m/s",
            position.x,
            position.y,
            position.z,
            controller.body().yaw,
            controller.state(),
            if controller.is_grounded() { "grounded" } else { "airborne" },
            controller.body().velocity.length()
        );
    }

    info!("{footsteps} footsteps");
    if let Some(body) = world.body(crate_body) {
        info!("crate velocity after the walk: {:?}", body.velocity);
    }
    Ok(())
}
