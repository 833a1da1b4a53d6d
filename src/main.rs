//! Headless hover demo.
//!
//! Loads two box models, sweeps a simulated cursor across the canvas and
//! logs every highlight change. Run with `RUST_LOG=debug` to see picks.
//!
//! ```text
//! ifc-hover [options.toml]
//! ifc-hover --schema <out.json>
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use ifc_hover::camera::CanvasRect;
use ifc_hover::input::{InputEvent, PointerHub};
use ifc_hover::options::Options;
use ifc_hover::scene::{MeshBuilder, ModelId};
use ifc_hover::{HoverError, ViewerSession};

const CANVAS_WIDTH: f32 = 1280.0;
const CANVAS_HEIGHT: f32 = 720.0;
const SWEEP_STEPS: u32 = 64;

fn write_schema(path: &Path) -> Result<(), HoverError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| HoverError::OptionsParse(e.to_string()))?;
    std::fs::write(path, schema)?;
    log::info!("wrote options schema to {}", path.display());
    Ok(())
}

/// A small storey: a floor slab with two columns, and a separate roof model.
fn load_demo_models(session: &ViewerSession) -> Result<(), HoverError> {
    let mut storey = MeshBuilder::new();
    storey.push_box(
        Vec3::new(-8.0, -0.3, -6.0),
        Vec3::new(4.0, 0.0, 6.0),
        101,
    );
    storey.push_box(
        Vec3::new(-7.0, 0.0, -5.0),
        Vec3::new(-6.4, 4.0, -4.4),
        102,
    );
    storey.push_box(Vec3::new(2.4, 0.0, 4.4), Vec3::new(3.0, 4.0, 5.0), 103);
    session.add_model(ModelId(0), storey.build()?)?;

    let mut roof = MeshBuilder::new();
    roof.push_box(
        Vec3::new(-8.0, 4.0, -6.0),
        Vec3::new(-2.0, 4.3, 6.0),
        201,
    );
    session.add_model(ModelId(1), roof.build()?)?;
    Ok(())
}

fn run(options_path: Option<PathBuf>) -> Result<(), HoverError> {
    let options = match options_path {
        Some(path) => Options::load(&path)?,
        None => Options::default(),
    };

    let canvas = CanvasRect::from_size(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut session = ViewerSession::new(options, canvas);
    load_demo_models(&session)?;

    let hub = PointerHub::new();
    session.start(&hub);

    let y = CANVAS_HEIGHT * 0.5;
    for step in 0..=SWEEP_STEPS {
        let x = CANVAS_WIDTH * step as f32 / SWEEP_STEPS as f32;
        hub.dispatch(&InputEvent::PointerMoved { x, y });
        let _ = session.render(|frame| {
            log::debug!(
                "frame: hovered={} subsets={} fps={:.1}",
                frame.camera.hovered_entity,
                frame.overlay.live_count(),
                frame.fps
            );
        });
        log::info!("x={x:.0}: {:?}", session.highlight()?);
    }

    hub.dispatch(&InputEvent::PointerLeft);
    log::info!("pointer left: {:?}", session.highlight()?);

    let change = session.stop();
    log::info!("stopped ({change:?})");
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let result = match args.next().as_deref() {
        Some("--schema") => match args.next() {
            Some(path) => write_schema(Path::new(&path)),
            None => {
                log::error!("Usage: ifc-hover --schema <path>");
                std::process::exit(1);
            }
        },
        Some(path) => run(Some(PathBuf::from(path))),
        None => run(None),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
