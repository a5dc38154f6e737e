//! Headless globe: drives the real lifecycle with a manual frame clock and
//! a host that only records what it was asked to draw.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, info};

use folio_core::globe::{
    Globe, GlobeHost, GlobeScene, InputEvent, ManualScheduler, Orientation, RotationMode,
    SceneError, Viewport,
};

/// Pixels moved per frame while the simulated drag is held.
const DRAG_STEP_PX: f64 = 12.0;

/// Frames the simulated drag lasts.
const DRAG_FRAMES: u32 = 20;

pub struct SimOptions {
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    pub layout_delay: u32,
    pub drag_at: Option<u32>,
}

struct HeadlessHost {
    frame: Rc<Cell<u32>>,
    layout_delay: u32,
    size: (u32, u32),
    orientation: Orientation,
    renders: u64,
}

impl GlobeHost for HeadlessHost {
    fn surface_size(&self) -> (u32, u32) {
        if self.frame.get() < self.layout_delay {
            (0, 0)
        } else {
            self.size
        }
    }

    fn build_scene(&mut self, scene: &GlobeScene, viewport: Viewport) -> Result<(), SceneError> {
        info!(
            width = viewport.width,
            height = viewport.height,
            aspect = viewport.aspect(),
            markers = scene.markers.len(),
            arcs = scene.arcs.len(),
            highlighted = ?scene.style.highlighted_countries,
            "Built scene"
        );
        Ok(())
    }

    fn attach_listeners(&mut self) {
        debug!("Listeners attached");
    }

    fn detach_listeners(&mut self) {
        debug!("Listeners detached");
    }

    fn apply_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "Resized");
    }

    fn dispose(&mut self) {
        debug!(renders = self.renders, "Scene disposed");
    }
}

fn drag_event(opts: &SimOptions, frame: u32) -> Option<InputEvent> {
    let start = opts.drag_at?;
    let step = frame.checked_sub(start)?;
    let x = f64::from(step) * DRAG_STEP_PX;
    match step {
        0 => Some(InputEvent::pointer_down(0.0, 0.0)),
        s if s < DRAG_FRAMES => Some(InputEvent::pointer_move(x, x / 4.0)),
        s if s == DRAG_FRAMES => Some(InputEvent::PointerUp),
        _ => None,
    }
}

/// Outcome of a simulated run.
#[derive(Debug)]
pub struct SimReport {
    pub orientation: Orientation,
    pub target: Orientation,
    pub mode: RotationMode,
    pub loading: bool,
    pub renders: u64,
}

pub fn simulate(opts: &SimOptions) -> SimReport {
    let scheduler = Rc::new(ManualScheduler::new());
    let frame = Rc::new(Cell::new(0));
    let scene = GlobeScene::default();
    let target = scene.target_orientation();
    let host = HeadlessHost {
        frame: frame.clone(),
        layout_delay: opts.layout_delay,
        size: (opts.width, opts.height),
        orientation: Orientation::ZERO,
        renders: 0,
    };

    let globe = Globe::with_scene(host, scheduler.clone(), scene);
    globe.mount();

    for n in 0..opts.frames {
        frame.set(n);
        if let Some(event) = drag_event(opts, n) {
            globe.handle_input(&event);
        }
        scheduler.run_frame();
    }

    let report = SimReport {
        orientation: globe.with_host(|h| h.orientation),
        target,
        mode: globe.mode(),
        loading: globe.is_loading(),
        renders: globe.with_host(|h| h.renders),
    };
    globe.unmount();
    report
}

pub fn run(opts: SimOptions) -> Result<()> {
    let report = simulate(&opts);
    println!("frames:      {}", opts.frames);
    println!("rendered:    {}", report.renders);
    println!("loading:     {}", report.loading);
    println!("mode:        {:?}", report.mode);
    println!(
        "orientation: yaw {:.4} pitch {:.4}",
        report.orientation.yaw, report.orientation.pitch
    );
    println!(
        "target:      yaw {:.4} pitch {:.4}",
        report.target.yaw, report.target.pitch
    );
    Ok(())
}

pub fn dump_scene() -> Result<()> {
    let json = serde_json::to_string_pretty(&GlobeScene::default())?;
    println!("{}", json);
    Ok(())
}
