use std::f32::consts::PI;
use std::time::Duration;

// Shared camera/tracking tuning constants used by both web and native frontends.

// Focus rig damping rates (per second)
pub const POSITION_LAMBDA: f32 = 6.2;
pub const TARGET_LAMBDA: f32 = 8.8; // look-at settles before the body arrives
pub const EXIT_POSITION_BOOST: f32 = 5.0; // extra position rate at full boost
pub const EXIT_TARGET_BOOST: f32 = 6.0; // extra target rate at full boost

// Hand-off to the orbiter once both errors fall below this (world units)
pub const LOCK_EPSILON: f32 = 0.03;

// Inspect pose
pub const STANDOFF_BASE: f32 = 0.72;
pub const STANDOFF_PER_EXTENT: f32 = 0.16;
pub const INSPECT_EYE_LIFT: f32 = 0.1;
pub const INSPECT_TARGET_LIFT: f32 = 0.02;

// Return boost after leaving inspect
pub const EXIT_BOOST_DURATION: Duration = Duration::from_millis(900);

// Inspect clamp window margins around the snapshot
pub const CLAMP_DISTANCE_MARGIN: f32 = 0.12;
pub const CLAMP_MIN_DISTANCE: f32 = 0.9;
pub const CLAMP_POLAR_MARGIN: f32 = 0.1;
pub const CLAMP_POLAR_EDGE: f32 = 0.15; // keep away from the poles
pub const CLAMP_AZIMUTH_MARGIN: f32 = 0.18;

// Free orbit bounds outside inspect
pub const FREE_MIN_DISTANCE: f32 = 3.6;
pub const FREE_MAX_DISTANCE: f32 = 9.5;
pub const FREE_MIN_POLAR: f32 = PI * 0.28;
pub const FREE_MAX_POLAR: f32 = PI * 0.62;

// Orbiter feel
pub const ORBIT_DAMPING_FACTOR: f32 = 0.1;
pub const ORBIT_ROTATE_SPEED: f32 = 0.55;
pub const INSPECT_ROTATE_SPEED: f32 = 0.18;

// Used when the snapshot never arrived (no orbiter reading yet)
pub const FALLBACK_SNAPSHOT_DISTANCE: f32 = 1.55;
pub const FALLBACK_SNAPSHOT_POLAR: f32 = PI * 0.45;

// Head signal
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.18;
pub const MIN_SMOOTHING_ALPHA: f32 = 0.08;
pub const MAX_SMOOTHING_ALPHA: f32 = 0.35;
pub const DEFAULT_RAW_OFFSET_MAX: f32 = 0.95; // clamp applied to raw face offsets

// Off-axis strength
pub const DEFAULT_STRENGTH: f32 = 0.32;
pub const MIN_STRENGTH: f32 = 0.12;
pub const MAX_STRENGTH: f32 = 0.55;

// Pointer fallback gains (cursor is a coarser proxy than a face)
pub const POINTER_GAIN_X: f32 = 0.45;
pub const POINTER_GAIN_Y: f32 = 0.35;

// Wheel deltas smaller than this do not change focus
pub const WHEEL_FOCUS_THRESHOLD: f32 = 6.0;

// Lens
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 200.0;

// Initial camera before the first preset is reached
pub const INITIAL_EYE: [f32; 3] = [0.0, 1.65, 5.2];
pub const INITIAL_LOOK_TARGET: [f32; 3] = [0.0, 1.8, 0.0];
pub const INITIAL_FOCUS_INDEX: usize = 1; // center preset

// Ctrl+wheel dolly per wheel unit
pub const DOLLY_PER_WHEEL_UNIT: f32 = 0.001;

// A press that travels further than this (logical px) is an orbit drag, not a click
pub const DRAG_CLICK_THRESHOLD_PX: f32 = 4.0;

// Line / page scroll deltas converted to pixels
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Inspect spotlight
pub const SPOT_INTENSITY: f32 = 2.35;
pub const SPOT_FADE_LAMBDA: f32 = 6.5;
pub const SPOT_ANGLE: f32 = 0.32;
pub const SPOT_PENUMBRA: f32 = 0.85;
pub const SPOT_RANGE: f32 = 8.0;

// Atmosphere
pub const BACKGROUND_RGB: [f32; 3] = [0.043, 0.047, 0.063]; // #0b0c10
pub const FOG_NEAR: f32 = 9.0;
pub const FOG_FAR: f32 = 18.0;
