//! Geometry, choreography and gesture handling for radial and circular
//! selection menus. Rendering, timing and haptics stay with the host, reached
//! through the [`presenter`] ports.

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod menu;
pub mod presenter;

pub use config::{AnimationType, MenuConfig, Mode};
pub use error::MenuError;
pub use events::{TouchEvent, TouchPhase, Velocity};
pub use geometry::{Point, Rect, Size};
pub use menu::{ItemCount, ItemId, ItemSlot, ItemSpec, Menu, Visibility};
pub use presenter::{AnimationHandle, MenuListener, Presenter};
