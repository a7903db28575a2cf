//! Render Session
//!
//! The dedicated render-loop thread. Each iteration drains pending
//! gestures, polls the video source, samples the head tracker, composes the
//! frame transforms, and hands them to the renderer, at a best-effort
//! ~50 Hz cadence.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use panosphere_core::SharedViewState;
use panosphere_platform::gestures::GestureReceiver;
use panosphere_platform::surface::RenderSurface;
use panosphere_platform::tracker::TrackerSession;
use panosphere_platform::video::VideoFrameSource;

use crate::RendererResult;
use crate::mesh::{Mesh, MeshCache};
use crate::transform::{FrameTransforms, vertex_transform};

/// Sphere geometry parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Sphere radius in model units
    pub radius: f32,
    /// Angular step of the latitude/longitude sweep, degrees
    pub step_degrees: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            step_degrees: 5.0,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Sphere geometry parameters
    pub geometry: GeometryConfig,
    /// Idle sleep between frames (best-effort cadence, not wall-clock)
    pub frame_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            frame_interval: Duration::from_millis(20),
        }
    }
}

/// Renderer capability contract: GL-side setup, per-frame draw, teardown.
/// All three are called on the render thread.
pub trait FrameRenderer: Send {
    /// Upload static geometry; called once before the first frame.
    fn init(&mut self, mesh: &Mesh);

    /// Draw one frame with the supplied transforms. `new_frame` mirrors the
    /// video source's flag for callers that skip redundant texture updates.
    fn draw_frame(&mut self, transforms: &FrameTransforms, new_frame: bool);

    /// Release GPU resources; called before the render thread exits.
    fn teardown(&mut self);
}

/// Everything the render loop needs from the outside world.
pub struct RenderSession {
    config: SessionConfig,
    surface: Box<dyn RenderSurface>,
    video: Box<dyn VideoFrameSource>,
    renderer: Box<dyn FrameRenderer>,
    view: SharedViewState,
    gestures: GestureReceiver,
    tracker: Option<TrackerSession>,
    mesh: MeshCache,
}

impl RenderSession {
    pub fn new(
        config: SessionConfig,
        surface: Box<dyn RenderSurface>,
        video: Box<dyn VideoFrameSource>,
        renderer: Box<dyn FrameRenderer>,
        view: SharedViewState,
        gestures: GestureReceiver,
    ) -> Self {
        let mesh = MeshCache::new(config.geometry.radius, config.geometry.step_degrees);
        Self {
            config,
            surface,
            video,
            renderer,
            view,
            gestures,
            tracker: None,
            mesh,
        }
    }

    /// Attach a head-tracking session; without one the model term starts
    /// from identity.
    pub fn with_tracker(mut self, tracker: TrackerSession) -> Self {
        self.tracker = Some(tracker);
        self
    }
}

/// Handle to the running render thread.
///
/// Stopping (or dropping) the handle signals the loop and joins it, so
/// teardown has finished by the time either returns.
pub struct RenderLoop {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RenderLoop {
    /// Spawn the render thread. Geometry is generated here first, so
    /// parameter errors surface at spawn time rather than on the loop.
    pub fn spawn(mut session: RenderSession) -> RendererResult<Self> {
        session.mesh.get()?;

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let thread = thread::Builder::new()
            .name(String::from("pano-render"))
            .spawn(move || run_loop(session, flag))
            .expect("Failed to spawn render thread");

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    /// Signal the loop to stop and wait for teardown to complete.
    pub fn stop(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(mut session: RenderSession, running: Arc<AtomicBool>) {
    log::debug!("render loop starting");
    match session.mesh.get() {
        Ok(mesh) => session.renderer.init(mesh),
        Err(err) => {
            // spawn() pre-generates, so this only happens if a caller built
            // the loop some other way
            log::error!("sphere generation failed: {err}");
            return;
        }
    }
    // the GPU copy is the sole reference from here on
    session.mesh.clear();

    while running.load(Ordering::Relaxed) {
        session.gestures.drain(&session.view);

        let frame = session.video.poll();
        let head_pose = session.tracker.as_mut().map(|t| t.sample());
        let size = session.surface.size();
        let view = session.view.snapshot();

        let transforms = FrameTransforms {
            vertex: vertex_transform(view, head_pose, size.x, size.y),
            texture: frame.texture_transform,
        };
        session.renderer.draw_frame(&transforms, frame.new_frame);
        if let Err(err) = session.surface.swap_buffers() {
            log::warn!("swap buffers failed: {err}");
        }

        thread::sleep(session.config.frame_interval);
    }

    session.renderer.teardown();
    // the tracker session (if any) drops with `session`, pausing the device
    log::debug!("render loop stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::time::Instant;

    use glam::UVec2;
    use panosphere_core::{Mat4, ViewConfig};
    use panosphere_platform::gestures;
    use panosphere_platform::tracker::{HeadTracker, ReferenceFrame};
    use panosphere_platform::video::VideoFrame;
    use panosphere_platform::PlatformResult;
    use parking_lot::Mutex;

    use super::*;

    struct FakeSurface {
        size: UVec2,
        swaps: Arc<AtomicU32>,
    }

    impl RenderSurface for FakeSurface {
        fn size(&self) -> UVec2 {
            self.size
        }

        fn swap_buffers(&mut self) -> PlatformResult<()> {
            self.swaps.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    struct FakeVideo {
        transform: Mat4,
    }

    impl VideoFrameSource for FakeVideo {
        fn poll(&mut self) -> VideoFrame {
            VideoFrame {
                texture_transform: self.transform,
                new_frame: true,
            }
        }
    }

    #[derive(Default)]
    struct RendererLog {
        init_vertices: Option<usize>,
        frames: Vec<FrameTransforms>,
        torn_down: bool,
    }

    struct FakeRenderer {
        log: Arc<Mutex<RendererLog>>,
    }

    impl FrameRenderer for FakeRenderer {
        fn init(&mut self, mesh: &Mesh) {
            self.log.lock().init_vertices = Some(mesh.vertex_count());
        }

        fn draw_frame(&mut self, transforms: &FrameTransforms, _new_frame: bool) {
            self.log.lock().frames.push(*transforms);
        }

        fn teardown(&mut self) {
            self.log.lock().torn_down = true;
        }
    }

    struct FakeTracker {
        paused: Arc<AtomicBool>,
    }

    impl HeadTracker for FakeTracker {
        fn resume(&mut self) {
            self.paused.store(false, Ordering::Relaxed);
        }

        fn pause(&mut self) {
            self.paused.store(true, Ordering::Relaxed);
        }

        fn orientation(&mut self, _frame: ReferenceFrame) -> Mat4 {
            Mat4::IDENTITY.rotated_z(0.25)
        }
    }

    fn test_config() -> SessionConfig {
        SessionConfig {
            // coarse sphere keeps the test quick
            geometry: GeometryConfig {
                radius: 400.0,
                step_degrees: 30.0,
            },
            frame_interval: Duration::from_millis(1),
        }
    }

    fn wait_for_frames(log: &Arc<Mutex<RendererLog>>, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while log.lock().frames.len() < n {
            assert!(Instant::now() < deadline, "render loop produced no frames");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_session_draws_frames_and_tears_down() {
        let swaps = Arc::new(AtomicU32::new(0));
        let log = Arc::new(Mutex::new(RendererLog::default()));
        let texture = Mat4::IDENTITY.rotated_y(1.0);
        let (_tx, rx) = gestures::channel();

        let session = RenderSession::new(
            test_config(),
            Box::new(FakeSurface {
                size: UVec2::new(1280, 720),
                swaps: swaps.clone(),
            }),
            Box::new(FakeVideo { transform: texture }),
            Box::new(FakeRenderer { log: log.clone() }),
            SharedViewState::new(ViewConfig::default()),
            rx,
        );

        let render_loop = RenderLoop::spawn(session).unwrap();
        wait_for_frames(&log, 3);
        render_loop.stop();

        let log = log.lock();
        // 13 columns x 7 rows at a 30 degree step
        assert_eq!(log.init_vertices, Some(91));
        assert!(log.frames.len() >= 3);
        assert!(log.torn_down);
        assert!(swaps.load(Ordering::Relaxed) >= 3);
        // texture transform is passed through unchanged
        assert!(log.frames.iter().all(|f| f.texture == texture));
    }

    #[test]
    fn test_gestures_reach_the_view_state() {
        let log = Arc::new(Mutex::new(RendererLog::default()));
        let (tx, rx) = gestures::channel();
        let view = SharedViewState::new(ViewConfig::default());

        let session = RenderSession::new(
            test_config(),
            Box::new(FakeSurface {
                size: UVec2::new(640, 480),
                swaps: Arc::new(AtomicU32::new(0)),
            }),
            Box::new(FakeVideo {
                transform: Mat4::IDENTITY,
            }),
            Box::new(FakeRenderer { log: log.clone() }),
            view.clone(),
            rx,
        );

        let render_loop = RenderLoop::spawn(session).unwrap();
        wait_for_frames(&log, 1);
        tx.drag(10.0, 5.0);

        // wait for the loop to drain the gesture, then for two more frames
        // so the last one was composed entirely after the new state landed
        let deadline = Instant::now() + Duration::from_secs(5);
        while view.snapshot().yaw != 325.0 {
            assert!(Instant::now() < deadline, "gesture never applied");
            thread::sleep(Duration::from_millis(1));
        }
        let applied_at = log.lock().frames.len();
        wait_for_frames(&log, applied_at + 2);
        render_loop.stop();

        let snap = view.snapshot();
        assert_eq!(snap.yaw, 325.0);
        assert_eq!(snap.pitch, 5.0);
        // the vertex transform moved once the gesture landed
        let log = log.lock();
        assert!(log.frames.first() != log.frames.last());
    }

    #[test]
    fn test_tracker_pauses_on_stop() {
        let paused = Arc::new(AtomicBool::new(true));
        let log = Arc::new(Mutex::new(RendererLog::default()));
        let (_tx, rx) = gestures::channel();

        let tracker = TrackerSession::start(
            Box::new(FakeTracker {
                paused: paused.clone(),
            }),
            ReferenceFrame::Portrait,
        );
        assert!(!paused.load(Ordering::Relaxed));

        let session = RenderSession::new(
            test_config(),
            Box::new(FakeSurface {
                size: UVec2::new(1280, 720),
                swaps: Arc::new(AtomicU32::new(0)),
            }),
            Box::new(FakeVideo {
                transform: Mat4::IDENTITY,
            }),
            Box::new(FakeRenderer { log: log.clone() }),
            SharedViewState::new(ViewConfig::default()),
            rx,
        )
        .with_tracker(tracker);

        let render_loop = RenderLoop::spawn(session).unwrap();
        wait_for_frames(&log, 2);
        render_loop.stop();

        assert!(paused.load(Ordering::Relaxed));
        // the head pose participated in the model term
        let view = SharedViewState::new(ViewConfig::default()).snapshot();
        let without_head = vertex_transform(view, None, 1280, 720);
        assert!(log.lock().frames[0].vertex != without_head);
    }

    #[test]
    fn test_spawn_rejects_bad_geometry() {
        let (_tx, rx) = gestures::channel();
        let session = RenderSession::new(
            SessionConfig {
                geometry: GeometryConfig {
                    radius: 400.0,
                    step_degrees: 0.0,
                },
                ..SessionConfig::default()
            },
            Box::new(FakeSurface {
                size: UVec2::new(1280, 720),
                swaps: Arc::new(AtomicU32::new(0)),
            }),
            Box::new(FakeVideo {
                transform: Mat4::IDENTITY,
            }),
            Box::new(FakeRenderer {
                log: Arc::new(Mutex::new(RendererLog::default())),
            }),
            SharedViewState::new(ViewConfig::default()),
            rx,
        );

        assert!(RenderLoop::spawn(session).is_err());
    }
}
