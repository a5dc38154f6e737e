use glam::DVec2;

/// Host events the globe reacts to. Positions are in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: DVec2 },
    PointerMove { position: DVec2 },
    PointerUp,
    /// Every finger currently on the surface.
    TouchStart { touches: Vec<DVec2> },
    TouchMove { touches: Vec<DVec2> },
    TouchEnd,
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            position: DVec2::new(x, y),
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: DVec2::new(x, y),
        }
    }
}
