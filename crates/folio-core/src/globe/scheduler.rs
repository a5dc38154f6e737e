//! Frame scheduling.
//!
//! Animation runs on "next frame" callbacks rather than threads: a callback
//! does one frame of work and schedules its successor. `FrameScheduler`
//! hides the host's primitive (a browser's animation-frame request, a
//! render loop, a test driver). Everything here is single-threaded.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    /// Run `callback` on the next frame. Must never run it synchronously.
    fn schedule_next_tick(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending callback. Unknown or already-run handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn schedule_next_tick(&self, callback: FrameCallback) -> FrameHandle {
        (**self).schedule_next_tick(callback)
    }

    fn cancel(&self, handle: FrameHandle) {
        (**self).cancel(handle)
    }
}

/// Liveness flag shared with every scheduled callback. Once cancelled, a
/// callback that still fires must return without touching anything.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Scheduler driven explicitly by calling [`ManualScheduler::run_frame`].
///
/// Used for headless runs and tests. Callbacks scheduled while a frame is
/// running land in the following frame.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    frames: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when the frame started.
    /// Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        self.frames.set(self.frames.get() + 1);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_tick(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handle = FrameHandle(id);
        self.queue.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
