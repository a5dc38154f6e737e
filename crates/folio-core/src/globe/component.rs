//! Mount lifecycle of the globe.
//!
//! `Globe` ties a [`RotationController`] to a host renderer and a frame
//! scheduler:
//!
//! 1. `mount` waits for the surface to be laid out, retrying every frame.
//! 2. Once sized, the host builds the scene. A failure is logged and the
//!    globe stays empty with its loading state cleared.
//! 3. Each frame ticks the controller, applies the orientation and renders.
//! 4. `unmount` cancels the pending frame, detaches listeners and disposes
//!    the scene. Callbacks that still fire afterwards do nothing.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, error, info};

use super::controller::{RotationController, RotationMode};
use super::input::InputEvent;
use super::orientation::Orientation;
use super::scene::{GlobeScene, Viewport};
use super::scheduler::{CancelToken, FrameHandle, FrameScheduler};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Rendering context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Failed to load globe data: {0}")]
    Data(String),
}

/// The environment the globe is embedded in.
///
/// Implementations must not call back into the [`Globe`] from these methods.
pub trait GlobeHost {
    /// Current size of the rendering surface; zero until laid out.
    fn surface_size(&self) -> (u32, u32);

    fn build_scene(&mut self, scene: &GlobeScene, viewport: Viewport) -> Result<(), SceneError>;

    /// Start delivering pointer, touch and resize events to the globe.
    fn attach_listeners(&mut self);

    fn detach_listeners(&mut self);

    fn apply_orientation(&mut self, orientation: Orientation);

    fn render(&mut self);

    fn resize(&mut self, viewport: Viewport);

    /// Release the rendering surface and everything built on it.
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    /// Mounted, waiting for the surface to report a size.
    WaitingForLayout,
    Running,
    /// Scene construction failed; the globe renders nothing.
    Failed,
    Disposed,
}

struct GlobeState<H> {
    host: H,
    controller: RotationController,
    scene: GlobeScene,
    phase: Phase,
    loading: bool,
    viewport: Option<Viewport>,
    pending: Option<FrameHandle>,
    listeners_attached: bool,
}

struct Shared<H, S> {
    state: RefCell<GlobeState<H>>,
    scheduler: Rc<S>,
    token: CancelToken,
}

pub struct Globe<H: GlobeHost + 'static, S: FrameScheduler + 'static> {
    shared: Rc<Shared<H, S>>,
}

impl<H: GlobeHost + 'static, S: FrameScheduler + 'static> Globe<H, S> {
    pub fn new(host: H, scheduler: Rc<S>) -> Self {
        Self::with_scene(host, scheduler, GlobeScene::default())
    }

    pub fn with_scene(host: H, scheduler: Rc<S>, scene: GlobeScene) -> Self {
        let controller = RotationController::new(scene.target_orientation());
        let state = GlobeState {
            host,
            controller,
            scene,
            phase: Phase::Unmounted,
            loading: true,
            viewport: None,
            pending: None,
            listeners_attached: false,
        };
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                scheduler,
                token: CancelToken::new(),
            }),
        }
    }

    /// Start initialization. Calling it again is a no-op.
    pub fn mount(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != Phase::Unmounted {
                debug!(phase = ?state.phase, "Globe already mounted");
                return;
            }
            state.phase = Phase::WaitingForLayout;
        }
        Self::try_init(&self.shared);
    }

    /// Tear everything down. Safe to call more than once.
    pub fn unmount(&self) {
        let shared = &self.shared;
        shared.token.cancel();

        let pending = {
            let mut state = shared.state.borrow_mut();
            if state.phase == Phase::Disposed {
                return;
            }
            if state.listeners_attached {
                state.host.detach_listeners();
                state.listeners_attached = false;
            }
            if state.phase == Phase::Running {
                state.host.dispose();
            }
            state.phase = Phase::Disposed;
            state.pending.take()
        };

        if let Some(handle) = pending {
            shared.scheduler.cancel(handle);
        }
        debug!("Globe unmounted");
    }

    /// Deliver a host event. Ignored unless the globe is running.
    pub fn handle_input(&self, event: &InputEvent) {
        let mut state = self.shared.state.borrow_mut();
        if state.phase != Phase::Running {
            return;
        }

        if let InputEvent::Resize { width, height } = *event {
            // Zero-sized resizes happen while the page is hidden; keep the old size
            let Some(viewport) = Viewport::new(width, height) else {
                return;
            };
            let viewport = match state.viewport {
                Some(old) => viewport.with_device_pixel_ratio(old.pixel_ratio),
                None => viewport,
            };
            state.viewport = Some(viewport);
            state.host.resize(viewport);
            return;
        }

        if state.controller.handle(event) {
            let orientation = state.controller.orientation();
            state.host.apply_orientation(orientation);
        }
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    pub fn orientation(&self) -> Orientation {
        self.shared.state.borrow().controller.orientation()
    }

    pub fn mode(&self) -> RotationMode {
        self.shared.state.borrow().controller.mode()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.shared.state.borrow().viewport
    }

    /// Inspect the host, e.g. to read back what it rendered.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.shared.state.borrow().host)
    }

    fn schedule(shared: &Rc<Shared<H, S>>, step: fn(&Rc<Shared<H, S>>)) {
        let next = Rc::clone(shared);
        let handle = shared
            .scheduler
            .schedule_next_tick(Box::new(move || step(&next)));
        shared.state.borrow_mut().pending = Some(handle);
    }

    fn try_init(shared: &Rc<Shared<H, S>>) {
        if shared.token.is_cancelled() {
            return;
        }

        let started = {
            let mut state = shared.state.borrow_mut();
            state.pending = None;
            let (width, height) = state.host.surface_size();
            let Some(viewport) = Viewport::new(width, height) else {
                drop(state);
                debug!("Globe surface not laid out yet, retrying next frame");
                Self::schedule(shared, Self::try_init);
                return;
            };

            let state = &mut *state;
            match state.host.build_scene(&state.scene, viewport) {
                Ok(()) => {
                    state.host.attach_listeners();
                    state.listeners_attached = true;
                    state.viewport = Some(viewport);
                    state.phase = Phase::Running;
                    info!(width, height, "Globe initialized");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Error initializing globe");
                    state.phase = Phase::Failed;
                    false
                }
            }
        };

        shared.state.borrow_mut().loading = false;
        if started {
            Self::schedule(shared, Self::frame);
        }
    }

    fn frame(shared: &Rc<Shared<H, S>>) {
        if shared.token.is_cancelled() {
            return;
        }

        {
            let mut state = shared.state.borrow_mut();
            state.pending = None;
            if state.phase != Phase::Running {
                return;
            }
            let orientation = state.controller.tick();
            state.host.apply_orientation(orientation);
            state.host.render();
        }

        Self::schedule(shared, Self::frame);
    }
}

impl<H: GlobeHost + 'static, S: FrameScheduler + 'static> Drop for Globe<H, S> {
    fn drop(&mut self) {
        // Pending callbacks hold a reference back to us; cancelling breaks the cycle
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::scheduler::{FrameCallback, ManualScheduler};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct RecordingHost {
        sizes: VecDeque<(u32, u32)>,
        fail_build: bool,
        builds: usize,
        built_viewport: Option<Viewport>,
        listeners: bool,
        renders: usize,
        applied: Vec<Orientation>,
        resizes: Vec<Viewport>,
        disposed: bool,
    }

    impl RecordingHost {
        fn sized(sizes: &[(u32, u32)]) -> Self {
            Self {
                sizes: sizes.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GlobeHost for RecordingHost {
        fn surface_size(&self) -> (u32, u32) {
            self.sizes.front().copied().unwrap_or((0, 0))
        }

        fn build_scene(
            &mut self,
            _scene: &GlobeScene,
            viewport: Viewport,
        ) -> Result<(), SceneError> {
            self.builds += 1;
            if self.fail_build {
                return Err(SceneError::ContextUnavailable("webgl disabled".to_string()));
            }
            self.built_viewport = Some(viewport);
            Ok(())
        }

        fn attach_listeners(&mut self) {
            self.listeners = true;
        }

        fn detach_listeners(&mut self) {
            self.listeners = false;
        }

        fn apply_orientation(&mut self, orientation: Orientation) {
            self.applied.push(orientation);
        }

        fn render(&mut self) {
            self.renders += 1;
        }

        fn resize(&mut self, viewport: Viewport) {
            self.resizes.push(viewport);
        }

        fn dispose(&mut self) {
            self.disposed = true;
        }
    }

    /// Scheduler that never cancels, to exercise callbacks firing after teardown.
    #[derive(Default)]
    struct NoCancelScheduler(ManualScheduler);

    impl FrameScheduler for NoCancelScheduler {
        fn schedule_next_tick(&self, callback: FrameCallback) -> FrameHandle {
            self.0.schedule_next_tick(callback)
        }

        fn cancel(&self, _handle: FrameHandle) {}
    }

    fn running_globe() -> (Globe<RecordingHost, ManualScheduler>, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let globe = Globe::new(RecordingHost::sized(&[(800, 600)]), scheduler.clone());
        globe.mount();
        (globe, scheduler)
    }

    #[test]
    fn test_waits_for_layout_then_initializes() {
        let scheduler = Rc::new(ManualScheduler::new());
        let globe = Globe::new(RecordingHost::sized(&[(0, 0), (1024, 768)]), scheduler.clone());

        globe.mount();
        assert_eq!(globe.phase(), Phase::WaitingForLayout);
        assert!(globe.is_loading());
        assert_eq!(scheduler.pending(), 1);
        globe.with_host(|h| assert_eq!(h.builds, 0));

        // The container is laid out before the retry fires
        globe.shared.state.borrow_mut().host.sizes.pop_front();
        scheduler.run_frame();

        assert_eq!(globe.phase(), Phase::Running);
        assert!(!globe.is_loading());
        let viewport = globe.viewport().unwrap();
        assert_eq!((viewport.width, viewport.height), (1024, 768));
        globe.with_host(|h| {
            assert_eq!(h.builds, 1);
            assert!(h.listeners);
        });
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_mount_twice_is_a_noop() {
        let (globe, scheduler) = running_globe();
        globe.mount();
        globe.with_host(|h| assert_eq!(h.builds, 1));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_frames_tick_apply_and_render() {
        let (globe, scheduler) = running_globe();
        for _ in 0..3 {
            scheduler.run_frame();
        }
        globe.with_host(|h| {
            assert_eq!(h.renders, 3);
            assert_eq!(h.applied.len(), 3);
            assert!(h.applied[2].yaw > h.applied[0].yaw);
        });
        assert_eq!(globe.mode(), RotationMode::AutoRotating);
    }

    #[test]
    fn test_pointer_down_freezes_auto_rotation() {
        let (globe, scheduler) = running_globe();
        scheduler.run_frame();
        globe.handle_input(&InputEvent::pointer_down(5.0, 5.0));
        assert_eq!(globe.mode(), RotationMode::UserControlled);

        let frozen = globe.orientation();
        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(globe.orientation(), frozen);

        globe.handle_input(&InputEvent::pointer_move(25.0, 5.0));
        assert!((globe.orientation().yaw - (frozen.yaw + 0.1)).abs() < 1e-12);
        globe.with_host(|h| assert_eq!(h.applied.last().copied(), Some(globe.orientation())));
    }

    #[test]
    fn test_resize_updates_viewport_and_ignores_zero() {
        let (globe, _scheduler) = running_globe();
        globe.handle_input(&InputEvent::Resize { width: 0, height: 400 });
        globe.handle_input(&InputEvent::Resize { width: 1200, height: 600 });

        let viewport = globe.viewport().unwrap();
        assert_eq!((viewport.width, viewport.height), (1200, 600));
        assert!((viewport.aspect() - 2.0).abs() < 1e-12);
        globe.with_host(|h| assert_eq!(h.resizes.len(), 1));
    }

    #[test]
    fn test_scene_failure_clears_loading_and_stays_empty() {
        let scheduler = Rc::new(ManualScheduler::new());
        let host = RecordingHost {
            fail_build: true,
            ..RecordingHost::sized(&[(800, 600)])
        };
        let globe = Globe::new(host, scheduler.clone());
        globe.mount();

        assert_eq!(globe.phase(), Phase::Failed);
        assert!(!globe.is_loading());
        assert_eq!(scheduler.pending(), 0);
        globe.with_host(|h| assert!(!h.listeners));

        globe.handle_input(&InputEvent::pointer_down(0.0, 0.0));
        assert_eq!(globe.mode(), RotationMode::AutoRotating);
    }

    #[test]
    fn test_unmount_mid_animation_releases_everything() {
        let (globe, scheduler) = running_globe();
        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(globe.mode(), RotationMode::AutoRotating);

        globe.unmount();
        assert_eq!(globe.phase(), Phase::Disposed);
        assert_eq!(scheduler.pending(), 0);
        globe.with_host(|h| {
            assert!(h.disposed);
            assert!(!h.listeners);
        });

        globe.unmount();
        globe.mount();
        assert_eq!(globe.phase(), Phase::Disposed);
    }

    #[test]
    fn test_unmount_while_waiting_for_layout() {
        let scheduler = Rc::new(ManualScheduler::new());
        let globe = Globe::new(RecordingHost::sized(&[]), scheduler.clone());
        globe.mount();
        assert_eq!(scheduler.pending(), 1);

        globe.unmount();
        assert_eq!(scheduler.pending(), 0);
        globe.with_host(|h| assert!(!h.disposed));
    }

    #[test]
    fn test_stale_callback_after_unmount_does_nothing() {
        let scheduler = Rc::new(NoCancelScheduler::default());
        let globe = Globe::new(RecordingHost::sized(&[(800, 600)]), scheduler.clone());
        globe.mount();
        scheduler.0.run_frame();
        let renders = globe.with_host(|h| h.renders);

        globe.unmount();
        assert_eq!(scheduler.0.pending(), 1);
        assert_eq!(scheduler.0.run_frame(), 1);

        globe.with_host(|h| assert_eq!(h.renders, renders));
        assert_eq!(scheduler.0.pending(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let (globe, scheduler) = running_globe();
        drop(globe);
        assert_eq!(scheduler.pending(), 0);
    }
}
