//! Interactive view-state of one chart session, changed only through
//! [`ViewAction`]s.

use crate::quality::round2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

pub const ROTATION_STEP: f64 = PI / 6.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const PIE_MIN_ZOOM: f64 = 0.5;
pub const PIE_MAX_ZOOM: f64 = 2.0;
/// Column zoom has no upper bound but must stay positive.
pub const COLUMN_MIN_ZOOM: f64 = 0.1;
pub const MIN_TILT: f64 = 0.2;
pub const MAX_TILT: f64 = 1.0;
pub const DEFAULT_TILT: f64 = 0.6;

/// The two hand-drawn chart projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Column,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewState {
    /// Radians, kept in `[0, 2π)`
    pub rotation: f64,
    pub zoom: f64,
    /// Vertical squash of the projection, `[0.2, 1.0]`
    pub tilt_angle: f64,
}

impl Default for ChartViewState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            zoom: 1.0,
            tilt_angle: DEFAULT_TILT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ViewAction {
    RotateLeft,
    RotateRight,
    ZoomIn,
    ZoomOut,
    SetTilt(f64),
    Reset,
}

fn clamp_zoom(zoom: f64, kind: ChartKind) -> f64 {
    let zoom = if zoom.is_finite() { zoom } else { 1.0 };
    match kind {
        ChartKind::Pie => zoom.clamp(PIE_MIN_ZOOM, PIE_MAX_ZOOM),
        ChartKind::Column => zoom.max(COLUMN_MIN_ZOOM),
    }
}

fn clamp_tilt(tilt: f64) -> f64 {
    if tilt.is_finite() {
        tilt.clamp(MIN_TILT, MAX_TILT)
    } else {
        DEFAULT_TILT
    }
}

fn normalize_rotation(rotation: f64) -> f64 {
    if !rotation.is_finite() {
        return 0.0;
    }
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    let wrapped = rotation.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

impl ChartViewState {
    /// Returns the state after `action`. The chart data is never involved.
    pub fn apply(self, action: ViewAction, kind: ChartKind) -> Self {
        match action {
            ViewAction::RotateLeft => Self {
                rotation: normalize_rotation(self.rotation - ROTATION_STEP),
                ..self
            },
            ViewAction::RotateRight => Self {
                rotation: normalize_rotation(self.rotation + ROTATION_STEP),
                ..self
            },
            ViewAction::ZoomIn => Self {
                zoom: clamp_zoom(round2(self.zoom + ZOOM_STEP), kind),
                ..self
            },
            ViewAction::ZoomOut => Self {
                zoom: clamp_zoom(round2(self.zoom - ZOOM_STEP), kind),
                ..self
            },
            ViewAction::SetTilt(tilt) => Self {
                tilt_angle: clamp_tilt(tilt),
                ..self
            },
            ViewAction::Reset => Self::default(),
        }
    }

    /// Replays a sequence of actions from this state.
    pub fn replay<I>(self, actions: I, kind: ChartKind) -> Self
    where
        I: IntoIterator<Item = ViewAction>,
    {
        actions
            .into_iter()
            .fold(self, |state, action| state.apply(action, kind))
    }

    /// Brings externally supplied values (e.g. a reloaded payload) into range.
    pub fn sanitized(self, kind: ChartKind) -> Self {
        Self {
            rotation: normalize_rotation(self.rotation),
            zoom: clamp_zoom(self.zoom, kind),
            tilt_angle: clamp_tilt(self.tilt_angle),
        }
    }
}
