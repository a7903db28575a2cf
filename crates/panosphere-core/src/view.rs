//! View State
//!
//! Yaw/pitch/zoom state for the panoramic camera. Mutated by gesture
//! handlers on the input side, snapshotted once per frame by the render
//! loop.

use std::sync::Arc;

use parking_lot::Mutex;

/// Rotation and zoom limits for the virtual camera.
///
/// Scale and distance are linked by a linear map:
/// `(max_scale - scale) / (max_scale - min_scale) =
/// (distance - min_distance) / (max_distance - min_distance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Closest camera distance (fully zoomed in)
    pub min_distance: f32,
    /// Farthest camera distance (fully zoomed out)
    pub max_distance: f32,
    /// Smallest pinch scale
    pub min_scale: f32,
    /// Largest pinch scale
    pub max_scale: f32,
    /// Camera distance at startup
    pub initial_distance: f32,
    /// Yaw at startup, degrees in [0, 360)
    pub initial_yaw: f32,
    /// Pitch at startup, degrees in [-90, 90]
    pub initial_pitch: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_distance: -100.0,
            max_distance: 380.0,
            min_scale: 1.0,
            max_scale: 4.0,
            initial_distance: 350.0,
            initial_yaw: 315.0,
            initial_pitch: 0.0,
        }
    }
}

/// One consistent (yaw, pitch, distance) tuple read per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    /// Yaw in degrees, [0, 360)
    pub yaw: f32,
    /// Pitch in degrees, [-90, 90]
    pub pitch: f32,
    /// Camera distance along +Z
    pub distance: f32,
}

/// Mutable camera state: yaw, pitch, and the pinch scale/distance pair.
#[derive(Debug, Clone)]
pub struct ViewState {
    config: ViewConfig,
    yaw: f32,
    pitch: f32,
    distance: f32,
    scale: f32,
}

/// Single wraparound into [0, 360); gestures never move yaw by a full turn,
/// so a full modulo is not needed.
fn wrap_yaw(mut yaw: f32) -> f32 {
    if yaw >= 360.0 {
        yaw -= 360.0;
    }
    if yaw < 0.0 {
        yaw += 360.0;
    }
    yaw
}

impl ViewState {
    /// Create the view state; the initial scale is derived from the initial
    /// distance through the config's linear map so the two start consistent.
    pub fn new(config: ViewConfig) -> Self {
        let scale = config.max_scale
            - (config.initial_distance - config.min_distance)
                / (config.max_distance - config.min_distance)
                * (config.max_scale - config.min_scale);
        Self {
            yaw: wrap_yaw(config.initial_yaw),
            pitch: config.initial_pitch.clamp(-90.0, 90.0),
            distance: config.initial_distance,
            scale,
            config,
        }
    }

    /// Yaw in degrees, [0, 360)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, [-90, 90]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current camera distance
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current pinch scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set yaw directly, wrapped into [0, 360).
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = wrap_yaw(yaw);
    }

    /// Set pitch directly, clamped to [-90, 90]. No wraparound.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-90.0, 90.0);
    }

    /// Set yaw and pitch together. Roll is accepted and ignored; the camera
    /// does not support it.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32, _roll: f32) {
        self.set_yaw(yaw);
        self.set_pitch(pitch);
    }

    /// Apply a drag delta in degrees: yaw wraps, pitch clamps.
    pub fn apply_rotation_delta(&mut self, dx: f32, dy: f32) {
        self.set_yaw(self.yaw + dx);
        self.set_pitch(self.pitch + dy);
    }

    /// Pinch-zoom policy that rejects out-of-range updates outright.
    ///
    /// The tentative scale is `factor` times the current scale. If it would
    /// reach or leave [min_scale, max_scale] the whole update is dropped and
    /// the state is untouched; otherwise the scale is committed and the
    /// distance recomputed from the linear map. Returns the resulting
    /// distance so callers can detect a rejection.
    pub fn apply_zoom_delta(&mut self, factor: f32) -> f32 {
        let c = &self.config;
        let scale = factor * self.scale;
        if scale >= c.max_scale || scale <= c.min_scale {
            return self.distance;
        }
        self.scale = scale;
        self.distance = (c.max_scale - scale) / (c.max_scale - c.min_scale)
            * (c.max_distance - c.min_distance)
            + c.min_distance;
        self.distance
    }

    /// Saturating pinch policy: always applies, clamping the scale to its
    /// limits. A separate entry point from [`apply_zoom_delta`]; callers
    /// choose one policy or the other. Does not touch the distance.
    ///
    /// [`apply_zoom_delta`]: Self::apply_zoom_delta
    pub fn set_scale(&mut self, factor: f32) {
        let c = &self.config;
        self.scale = (self.scale * factor).clamp(c.min_scale, c.max_scale);
    }

    /// One consistent tuple for the frame's transform computation.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            yaw: self.yaw,
            pitch: self.pitch,
            distance: self.distance,
        }
    }
}

/// View state shared between the gesture side and the render loop.
///
/// Cloneable handle; every operation takes the lock for the duration of the
/// call, so the per-frame snapshot is never torn across a concurrent write.
#[derive(Debug, Clone)]
pub struct SharedViewState {
    inner: Arc<Mutex<ViewState>>,
}

impl SharedViewState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewState::new(config))),
        }
    }

    /// See [`ViewState::apply_rotation_delta`].
    pub fn apply_rotation_delta(&self, dx: f32, dy: f32) {
        self.inner.lock().apply_rotation_delta(dx, dy);
    }

    /// See [`ViewState::apply_zoom_delta`].
    pub fn apply_zoom_delta(&self, factor: f32) -> f32 {
        self.inner.lock().apply_zoom_delta(factor)
    }

    /// See [`ViewState::set_scale`].
    pub fn set_scale(&self, factor: f32) {
        self.inner.lock().set_scale(factor);
    }

    /// See [`ViewState::set_rotation`].
    pub fn set_rotation(&self, yaw: f32, pitch: f32, roll: f32) {
        self.inner.lock().set_rotation(yaw, pitch, roll);
    }

    pub fn distance(&self) -> f32 {
        self.inner.lock().distance()
    }

    pub fn scale(&self) -> f32 {
        self.inner.lock().scale()
    }

    /// See [`ViewState::snapshot`].
    pub fn snapshot(&self) -> ViewSnapshot {
        self.inner.lock().snapshot()
    }
}

impl Default for SharedViewState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
