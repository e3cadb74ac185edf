pub mod config;
pub mod error;
pub mod light;
pub mod math;
pub mod scene;
pub mod visibility;

pub use config::{SceneConfig, SweepConfig};
pub use error::{LumisweepError, Result};
pub use light::LightState;
pub use scene::{Boundary, BuildSegmentSet, Obstacle, SegmentSet};
pub use visibility::{compute_visibility, Hit, Sweeper, VisibilityPolygon};
