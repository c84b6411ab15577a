use std::time::Duration;

pub mod anchors;
pub mod carousel;
pub mod choreo;
pub mod model;
pub mod resolver;
pub mod tables;

#[cfg(test)]
pub(crate) mod testing;

pub use anchors::{Anchor, compute_anchors};
pub use carousel::{Carousel, CarouselState, Gesture, Phase};
pub use model::{ItemCount, ItemId, ItemSlot, ItemSpec, Menu, Visibility};
pub use resolver::{Resolution, resolve};

pub const MAX_ITEMS: usize = 10;
pub const INTAKE_ANGLE: f64 = 270.0; // screen space, straight up

// Entry/exit choreography
pub const STAGGER: Duration = Duration::from_millis(100); // per item index
pub const ITEM_DURATION: Duration = Duration::from_millis(700);
pub const WIPE_DURATION: Duration = Duration::from_millis(500);
pub const WIPE_CONCEAL_CENTER_DELAY: Duration = Duration::from_millis(600);

// Carousel motion, durations are divided by the configured speed
pub const SNAP_DURATION_BASE_MS: u64 = 7500;
pub const FLING_DURATION_BASE_MS: u64 = 25000;
pub const FLING_VELOCITY_DIVISOR: f64 = 25.0; // px/s to degrees
pub const MIN_ANIMATED_DELTA: f64 = 1.0; // degrees
