//! Gesture Delivery
//!
//! Carries drag and pinch events from the input thread to the render loop,
//! which applies them to the shared view state once per frame.

use crossbeam::channel::{Receiver, Sender, unbounded};
use glam::Vec2;
use panosphere_core::SharedViewState;

/// Gesture events produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// One-finger drag; delta in degrees of yaw (x) and pitch (y).
    Drag { delta: Vec2 },
    /// Pinch factor applied with the rejecting zoom policy
    /// ([`ViewState::apply_zoom_delta`]).
    ///
    /// [`ViewState::apply_zoom_delta`]: panosphere_core::ViewState::apply_zoom_delta
    Pinch { factor: f32 },
    /// Pinch factor applied with the clamping policy
    /// ([`ViewState::set_scale`]).
    ///
    /// [`ViewState::set_scale`]: panosphere_core::ViewState::set_scale
    PinchClamped { factor: f32 },
}

/// Input-side handle. Cloneable; sending never blocks.
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: Sender<GestureEvent>,
}

impl GestureSender {
    pub fn send(&self, event: GestureEvent) {
        // the receiver outlives the senders in normal operation; a closed
        // channel just means the render loop is gone
        let _ = self.tx.send(event);
    }

    pub fn drag(&self, dx: f32, dy: f32) {
        self.send(GestureEvent::Drag {
            delta: Vec2::new(dx, dy),
        });
    }

    pub fn pinch(&self, factor: f32) {
        self.send(GestureEvent::Pinch { factor });
    }

    pub fn pinch_clamped(&self, factor: f32) {
        self.send(GestureEvent::PinchClamped { factor });
    }
}

/// Render-side handle; drained once per frame.
#[derive(Debug)]
pub struct GestureReceiver {
    rx: Receiver<GestureEvent>,
}

impl GestureReceiver {
    /// Apply all pending gestures to the view state.
    pub fn drain(&self, view: &SharedViewState) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                GestureEvent::Drag { delta } => view.apply_rotation_delta(delta.x, delta.y),
                GestureEvent::Pinch { factor } => {
                    view.apply_zoom_delta(factor);
                }
                GestureEvent::PinchClamped { factor } => view.set_scale(factor),
            }
        }
    }
}

/// Create a connected sender/receiver pair.
pub fn channel() -> (GestureSender, GestureReceiver) {
    let (tx, rx) = unbounded();
    (GestureSender { tx }, GestureReceiver { rx })
}
