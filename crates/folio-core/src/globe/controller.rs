use glam::DVec2;
use tracing::debug;

use super::input::InputEvent;
use super::orientation::Orientation;

/// Fraction of the remaining distance covered on each auto-rotation tick.
/// Applied per tick, not per second, so convergence speed follows the
/// display's refresh rate.
pub const EASING_FACTOR: f64 = 0.02;

/// Auto-rotation snaps to the target once both axes are this close.
pub const CONVERGENCE_TOLERANCE: f64 = 0.01;

/// Radians of rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// Easing toward the target orientation on every tick.
    AutoRotating,
    /// Only pointer drags move the globe. Once entered, never left.
    UserControlled,
}

/// Rotation state of the globe.
///
/// Starts auto-rotating from `(0, 0)` toward a fixed target. The first
/// pointer-down (or single-finger touch) hands control to the user for the
/// rest of the controller's life; auto-rotation also ends on its own once
/// it has converged.
#[derive(Debug, Clone)]
pub struct RotationController {
    current: Orientation,
    target: Orientation,
    auto_rotate: bool,
    /// Last pointer position while a button or finger is held.
    pointer: Option<DVec2>,
}

impl RotationController {
    pub fn new(target: Orientation) -> Self {
        Self {
            current: Orientation::ZERO,
            target,
            auto_rotate: true,
            pointer: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.current
    }

    pub fn target(&self) -> Orientation {
        self.target
    }

    pub fn mode(&self) -> RotationMode {
        if self.auto_rotate {
            RotationMode::AutoRotating
        } else {
            RotationMode::UserControlled
        }
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// Advance one animation frame and return the orientation to apply.
    pub fn tick(&mut self) -> Orientation {
        if !self.auto_rotate {
            return self.current;
        }

        let current = self.current.as_vec();
        let delta = self.target.as_vec() - current;

        if delta.x.abs() > CONVERGENCE_TOLERANCE || delta.y.abs() > CONVERGENCE_TOLERANCE {
            self.current = Orientation::from_vec(current + delta * EASING_FACTOR);
        } else {
            self.current = self.target;
            self.auto_rotate = false;
            debug!(
                yaw = self.target.yaw,
                pitch = self.target.pitch,
                "Auto-rotation reached target"
            );
        }
        self.current
    }

    pub fn pointer_down(&mut self, position: DVec2) {
        if self.auto_rotate {
            debug!("Pointer down, handing rotation to the user");
        }
        self.auto_rotate = false;
        self.pointer = Some(position);
    }

    /// Rotate by the drag since the last pointer position. Returns whether
    /// the orientation changed (only while a pointer is held).
    pub fn pointer_move(&mut self, position: DVec2) -> bool {
        let Some(last) = self.pointer else {
            return false;
        };

        let delta = (position - last) * DRAG_SENSITIVITY;
        self.current = Orientation::new(self.current.yaw + delta.x, self.current.pitch + delta.y)
            .with_clamped_pitch();
        self.pointer = Some(position);
        true
    }

    pub fn pointer_up(&mut self) {
        self.pointer = None;
    }

    /// Route a host event. Returns whether the orientation changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { position } => {
                self.pointer_down(*position);
                false
            }
            InputEvent::PointerMove { position } => self.pointer_move(*position),
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.pointer_up();
                false
            }
            InputEvent::TouchStart { touches } => {
                if let [touch] = touches.as_slice() {
                    self.pointer_down(*touch);
                }
                false
            }
            InputEvent::TouchMove { touches } => match touches.as_slice() {
                [touch] => self.pointer_move(*touch),
                _ => false,
            },
            InputEvent::Resize { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TARGET: Orientation = Orientation { yaw: 1.0, pitch: 0.3 };

    #[test]
    fn test_auto_rotation_converges_and_snaps() {
        let mut controller = RotationController::new(TARGET);
        let mut last = controller.orientation();
        let mut ticks = 0;

        while controller.is_auto_rotating() {
            let next = controller.tick();
            ticks += 1;
            assert!(next.yaw >= last.yaw && next.yaw <= TARGET.yaw);
            assert!(next.pitch >= last.pitch && next.pitch <= TARGET.pitch);
            last = next;
            assert!(ticks < 500, "auto-rotation did not converge");
        }

        // 0.98^n must drop below 0.01 on the larger axis: 228 easing ticks, then the snap
        assert_eq!(ticks, 229);
        assert_eq!(controller.orientation(), TARGET);
        assert_eq!(controller.mode(), RotationMode::UserControlled);
    }

    #[test]
    fn test_default_focus_snaps_on_tick_247() {
        let target = Orientation::facing(crate::globe::scene::BOSTON);
        let mut controller = RotationController::new(target);
        let mut ticks = 0;
        while controller.is_auto_rotating() {
            controller.tick();
            ticks += 1;
        }
        // yaw of about 1.415 rad needs 246 easing ticks before the snap
        assert_eq!(ticks, 247);
        assert_eq!(controller.orientation(), target);
    }

    #[test]
    fn test_tick_after_convergence_is_stable() {
        let mut controller = RotationController::new(TARGET);
        while controller.is_auto_rotating() {
            controller.tick();
        }
        assert_eq!(controller.tick(), TARGET);
    }

    #[test]
    fn test_first_tick_moves_two_percent() {
        let mut controller = RotationController::new(TARGET);
        let o = controller.tick();
        assert!((o.yaw - 0.02).abs() < 1e-12);
        assert!((o.pitch - 0.006).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_down_stops_auto_rotation_for_good() {
        let mut controller = RotationController::new(TARGET);
        controller.tick();
        controller.handle(&InputEvent::pointer_down(10.0, 10.0));
        assert_eq!(controller.mode(), RotationMode::UserControlled);

        let before = controller.orientation();
        controller.tick();
        assert_eq!(controller.orientation(), before);

        controller.handle(&InputEvent::PointerUp);
        controller.tick();
        assert_eq!(controller.mode(), RotationMode::UserControlled);
        assert_eq!(controller.orientation(), before);
    }

    #[test]
    fn test_drag_rotates_by_sensitivity() {
        let mut controller = RotationController::new(TARGET);
        controller.handle(&InputEvent::pointer_down(100.0, 100.0));
        assert!(controller.handle(&InputEvent::pointer_move(120.0, 90.0)));

        let o = controller.orientation();
        assert!((o.yaw - 0.1).abs() < 1e-12);
        assert!((o.pitch + 0.05).abs() < 1e-12);

        // Deltas are measured from the last move, not the press
        controller.handle(&InputEvent::pointer_move(130.0, 90.0));
        assert!((controller.orientation().yaw - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut controller = RotationController::new(TARGET);
        assert!(!controller.handle(&InputEvent::pointer_move(50.0, 50.0)));
        controller.handle(&InputEvent::pointer_down(0.0, 0.0));
        controller.handle(&InputEvent::PointerUp);
        assert!(!controller.handle(&InputEvent::pointer_move(50.0, 50.0)));
        assert_eq!(controller.orientation(), Orientation::ZERO);
    }

    #[test]
    fn test_pitch_clamped_at_both_poles() {
        let mut controller = RotationController::new(TARGET);
        controller.handle(&InputEvent::pointer_down(0.0, 0.0));
        for step in 1..=20 {
            controller.handle(&InputEvent::pointer_move(0.0, step as f64 * 50.0));
            assert!(controller.orientation().pitch <= FRAC_PI_2);
        }
        assert_eq!(controller.orientation().pitch, FRAC_PI_2);

        controller.handle(&InputEvent::pointer_move(0.0, -2000.0));
        assert_eq!(controller.orientation().pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut controller = RotationController::new(TARGET);
        controller.handle(&InputEvent::pointer_down(0.0, 0.0));
        controller.handle(&InputEvent::pointer_move(4000.0, 0.0));
        assert!((controller.orientation().yaw - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_finger_touch_is_ignored() {
        let mut controller = RotationController::new(TARGET);
        let two = vec![DVec2::new(0.0, 0.0), DVec2::new(40.0, 0.0)];
        controller.handle(&InputEvent::TouchStart { touches: two.clone() });
        assert_eq!(controller.mode(), RotationMode::AutoRotating);

        controller.handle(&InputEvent::TouchStart {
            touches: vec![DVec2::new(0.0, 0.0)],
        });
        assert_eq!(controller.mode(), RotationMode::UserControlled);
        assert!(!controller.handle(&InputEvent::TouchMove { touches: two }));
        assert!(controller.handle(&InputEvent::TouchMove {
            touches: vec![DVec2::new(20.0, 0.0)],
        }));
        controller.handle(&InputEvent::TouchEnd);
        assert!(!controller.is_dragging());
    }
}
