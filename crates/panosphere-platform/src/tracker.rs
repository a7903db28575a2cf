//! Head Tracker
//!
//! Interface to the sensor-fusion head tracker, plus a scoped session that
//! guarantees pause on every exit path instead of hand-managing a raw
//! native handle.

use panosphere_core::Mat4;

/// Display orientation the pose is reported relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceFrame {
    LandscapeLeft,
    LandscapeRight,
    #[default]
    Portrait,
    PortraitUpsideDown,
}

/// Head-tracking device.
///
/// [`orientation`](Self::orientation) is called once per frame from the
/// render thread and must return the latest available sample without
/// blocking; identity until the first sample arrives.
pub trait HeadTracker: Send {
    /// Start or restart sensor delivery.
    fn resume(&mut self);

    /// Suspend sensor delivery.
    fn pause(&mut self);

    /// Latest head pose as a rotation matrix.
    fn orientation(&mut self, frame: ReferenceFrame) -> Mat4;
}

/// Scoped tracking session: resumes the tracker on construction and pauses
/// it on drop. Dropping the session releases the device.
pub struct TrackerSession {
    tracker: Box<dyn HeadTracker>,
    frame: ReferenceFrame,
}

impl TrackerSession {
    pub fn start(mut tracker: Box<dyn HeadTracker>, frame: ReferenceFrame) -> Self {
        log::info!("head tracking started ({frame:?})");
        tracker.resume();
        Self { tracker, frame }
    }

    /// Latest head pose for this session's reference frame.
    pub fn sample(&mut self) -> Mat4 {
        self.tracker.orientation(self.frame)
    }
}

impl Drop for TrackerSession {
    fn drop(&mut self) {
        log::info!("head tracking paused");
        self.tracker.pause();
    }
}
