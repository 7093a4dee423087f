//! Head signal conditioning.
//!
//! Raw face-box centers arrive in normalized video coordinates (`0..1`, y down).
//! The processor turns them into a calibrated, clamped and EMA-smoothed
//! [`HeadOffset`] in `[-1, 1]` (y up) that the projection solver reads every
//! frame. A pointer-driven fallback can bypass the whole pipeline with
//! [`HeadSignalProcessor::hard_set`].

use crate::constants::{DEFAULT_RAW_OFFSET_MAX, DEFAULT_SMOOTHING_ALPHA};
use crate::tracking::FaceSample;

/// Smoothed, calibrated viewer-position proxy. Both axes stay within `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadOffset {
    pub nx: f32,
    pub ny: f32,
}

impl HeadOffset {
    pub const ZERO: Self = Self { nx: 0.0, ny: 0.0 };

    /// Clamp both axes into `[-1, 1]`; non-finite values collapse to 0.
    pub fn clamped(nx: f32, ny: f32) -> Self {
        Self {
            nx: clamp_unit(nx),
            ny: clamp_unit(ny),
        }
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Face-box center treated as "looking straight at the screen".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    pub cx: f32,
    pub cy: f32,
    pub calibrated: bool,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            cx: 0.5,
            cy: 0.5,
            calibrated: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingParams {
    /// EMA weight of each new sample, `0..=1`.
    pub alpha: f32,
    /// Clamp applied to the raw (unsmoothed) offsets.
    pub max: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
            max: DEFAULT_RAW_OFFSET_MAX,
        }
    }
}

/// Diagnostic record shown by the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadDiagnostics {
    /// True while the face pipeline drives the offset, false on fallback/idle.
    pub ok: bool,
    pub message: String,
    pub raw: Option<FaceSample>,
    pub offset: HeadOffset,
}

impl Default for HeadDiagnostics {
    fn default() -> Self {
        Self {
            ok: false,
            message: "Tracking idle".to_string(),
            raw: None,
            offset: HeadOffset::ZERO,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadSignalProcessor {
    baseline: Baseline,
    smoothed: HeadOffset,
    diagnostics: HeadDiagnostics,
}

impl HeadSignalProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the baseline; the next face sample becomes the new center.
    pub fn calibrate(&mut self) {
        self.baseline.calibrated = false;
        self.diagnostics.message = "Calibrating… look straight at the screen".to_string();
        log::info!("[head] calibration requested");
    }

    /// Feed one accepted face sample.
    ///
    /// Without a live baseline the sample is adopted as the baseline and the
    /// offset re-centers to zero. Otherwise the baseline-relative offset is
    /// clamped to `±params.max` and blended in with weight `params.alpha`.
    pub fn update(&mut self, sample: FaceSample, params: SmoothingParams) -> HeadOffset {
        if !sample.cx.is_finite() || !sample.cy.is_finite() {
            return self.smoothed;
        }
        if !self.baseline.calibrated {
            self.baseline = Baseline {
                cx: sample.cx,
                cy: sample.cy,
                calibrated: true,
            };
            self.smoothed = HeadOffset::ZERO;
            log::info!(
                "[head] baseline set at ({:.3},{:.3})",
                sample.cx,
                sample.cy
            );
        } else {
            let max = params.max.abs();
            let alpha = params.alpha.clamp(0.0, 1.0);
            let raw_nx = ((sample.cx - self.baseline.cx) * 2.0).clamp(-max, max);
            // screen-up is positive, video y grows downward
            let raw_ny = ((self.baseline.cy - sample.cy) * 2.0).clamp(-max, max);
            let s = self.smoothed;
            self.smoothed = HeadOffset::clamped(
                s.nx + (raw_nx - s.nx) * alpha,
                s.ny + (raw_ny - s.ny) * alpha,
            );
        }

        self.diagnostics = HeadDiagnostics {
            ok: true,
            message: "Tracking active".to_string(),
            raw: Some(sample),
            offset: self.smoothed,
        };
        self.smoothed
    }

    /// Overwrite the offset directly, bypassing baseline and smoothing.
    pub fn hard_set(&mut self, nx: f32, ny: f32, reason: impl Into<String>) -> HeadOffset {
        self.smoothed = HeadOffset::clamped(nx, ny);
        self.diagnostics.ok = false;
        self.diagnostics.message = reason.into();
        self.diagnostics.offset = self.smoothed;
        self.smoothed
    }

    pub fn offset(&self) -> HeadOffset {
        self.smoothed
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn diagnostics(&self) -> &HeadDiagnostics {
        &self.diagnostics
    }
}
