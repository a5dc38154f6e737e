//! Interactive globe on the landing page.
//!
//! The globe itself is drawn by whatever 3D host embeds it; this module
//! owns the parts with behavior:
//!
//! - `orientation`: yaw/pitch pairs and the geographic target mapping
//! - `controller`: auto-rotation easing and pointer-drag rotation
//! - `scheduler`: the frame-callback abstraction and cancellation token
//! - `component`: mount/unmount lifecycle driving a [`GlobeHost`]
//! - `scene`: declarative description of what the host should draw

pub mod component;
pub mod controller;
pub mod input;
pub mod orientation;
pub mod scene;
pub mod scheduler;

pub use component::{Globe, GlobeHost, Phase, SceneError};
pub use controller::{RotationController, RotationMode};
pub use input::InputEvent;
pub use orientation::Orientation;
pub use scene::{GeoPoint, GlobeScene, Viewport};
pub use scheduler::{CancelToken, FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
