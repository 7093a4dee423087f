pub mod clamp;
pub mod constants;
pub mod damp;
pub mod focus;
pub mod gallery;
pub mod head;
pub mod light;
pub mod orbit;
pub mod pick;
pub mod projection;
pub mod scene;
pub mod tracking;
pub mod transition;
pub mod viewer;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use clamp::*;
pub use damp::*;
pub use focus::*;
pub use gallery::*;
pub use head::*;
pub use light::*;
pub use orbit::*;
pub use pick::*;
pub use projection::{aspect_ratio, solve, solve_for_lens, Frustum, Lens, Projection};
pub use scene::*;
pub use tracking::*;
pub use transition::*;
pub use viewer::*;
