//! Per-frame camera playback and globe auto-rotation.
//!
//! The globe spins slowly while idle. A fly-to pauses the spin and resets it
//! so the target coordinate lines up with the unrotated projection, then
//! plays the fly path back one frame per [`CameraDriver::tick`] and resumes
//! the spin once the last frame has been shown. Rotation state is owned by a
//! [`RotationControl`] that the render loop passes in explicitly.

use glam::DVec3;
use tracing::{debug, trace};

use crate::coords::GeoCoordinate;
use crate::fly::{DEFAULT_FLY_DISTANCE, FlyPath, FlyPathOptions, plan};

/// Globe spin per rendered frame, in radians.
pub const DEFAULT_ROTATION_SPEED: f64 = 0.001;
/// Camera position at rest after the intro approach.
pub const HOME_POSITION: DVec3 = DVec3::new(0.0, 0.0, DEFAULT_FLY_DISTANCE);
/// Initial camera position before the intro approach.
pub const INTRO_START_POSITION: DVec3 = DVec3::new(0.0, 0.0, 3.1);
/// Fraction of the remaining distance covered per intro frame.
const INTRO_LERP_FACTOR: f64 = 0.03;
/// Distance from [`HOME_POSITION`] at which the intro snaps and finishes.
const INTRO_SNAP_DISTANCE: f64 = 0.01;
/// Frames used for fly-to animations started from the driver.
pub const FLY_TO_FRAME_COUNT: usize = 90;

/// Commands a camera transition sends to the globe's auto-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCommand {
    /// Stop spinning.
    Pause,
    /// Return the globe to zero rotation.
    Reset,
    /// Continue spinning.
    Resume,
}

/// Receiver for [`RotationCommand`]s.
pub trait RotationControl {
    fn apply(&mut self, command: RotationCommand);
}

impl<F: FnMut(RotationCommand)> RotationControl for F {
    fn apply(&mut self, command: RotationCommand) {
        self(command);
    }
}

/// Idle spin of the globe around its Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRotation {
    /// Current rotation about +Y in radians.
    pub angle: f64,
    /// Rotation added per tick.
    pub speed: f64,
    paused: bool,
}

impl Default for AutoRotation {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED)
    }
}

impl AutoRotation {
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self {
            angle: 0.0,
            speed,
            paused: false,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by one frame unless paused. Returns the new angle.
    pub fn tick(&mut self) -> f64 {
        if !self.paused {
            self.angle += self.speed;
        }
        self.angle
    }
}

impl RotationControl for AutoRotation {
    fn apply(&mut self, command: RotationCommand) {
        trace!(?command, angle = self.angle, "auto-rotation command");
        match command {
            RotationCommand::Pause => self.paused = true,
            RotationCommand::Reset => self.angle = 0.0,
            RotationCommand::Resume => self.paused = false,
        }
    }
}

/// Cursor over a [`FlyPath`], one frame per [`FlyAnimation::advance`].
#[derive(Debug, Clone)]
pub struct FlyAnimation {
    path: FlyPath,
    next: usize,
}

impl FlyAnimation {
    #[must_use]
    pub fn new(path: FlyPath) -> Self {
        Self { path, next: 0 }
    }

    /// Return the next frame, or `None` once every frame has been consumed.
    pub fn advance(&mut self) -> Option<DVec3> {
        let frame = self.path.get(self.next)?;
        self.next += 1;
        Some(frame)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.path.len()
    }

    /// Fraction of frames consumed, in [0, 1].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        self.next as f64 / self.path.len() as f64
    }

    #[must_use]
    pub fn path(&self) -> &FlyPath {
        &self.path
    }
}

/// What the camera is doing this frame.
#[derive(Debug, Clone, Default)]
pub enum CameraState {
    /// Easing in from [`INTRO_START_POSITION`] to [`HOME_POSITION`].
    #[default]
    Intro,
    /// Holding position.
    Idle,
    /// Playing back a fly path.
    Flying(FlyAnimation),
}

/// Drives the camera position from frame to frame.
#[derive(Debug, Clone)]
pub struct CameraDriver {
    position: DVec3,
    state: CameraState,
}

impl Default for CameraDriver {
    fn default() -> Self {
        Self::new(INTRO_START_POSITION)
    }
}

impl CameraDriver {
    /// Start at `position` with the intro approach pending.
    #[must_use]
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            state: CameraState::Intro,
        }
    }

    /// Start at `position` with no intro.
    #[must_use]
    pub fn idle_at(position: DVec3) -> Self {
        Self {
            position,
            state: CameraState::Idle,
        }
    }

    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    #[must_use]
    pub fn is_flying(&self) -> bool {
        matches!(self.state, CameraState::Flying(_))
    }

    /// The flight currently being played back, if any.
    #[must_use]
    pub fn flight(&self) -> Option<&FlyAnimation> {
        match &self.state {
            CameraState::Flying(animation) => Some(animation),
            CameraState::Intro | CameraState::Idle => None,
        }
    }

    /// Begin flying to `target` from the current position.
    ///
    /// Pauses and resets the globe rotation first. Any flight already in
    /// progress is dropped and replaced; the new path starts wherever the
    /// camera currently is.
    pub fn fly_to(
        &mut self,
        target: GeoCoordinate,
        options: &FlyPathOptions,
        rotation: &mut impl RotationControl,
    ) {
        rotation.apply(RotationCommand::Pause);
        rotation.apply(RotationCommand::Reset);

        if self.is_flying() {
            debug!("replacing in-flight camera path");
        }
        let path = plan(self.position, target, options);
        debug!(frames = path.len(), ?target, "flying to target");
        self.state = CameraState::Flying(FlyAnimation::new(path));
    }

    /// [`CameraDriver::fly_to`] with the default distance and
    /// [`FLY_TO_FRAME_COUNT`] frames.
    pub fn fly_to_default(&mut self, target: GeoCoordinate, rotation: &mut impl RotationControl) {
        let options = FlyPathOptions {
            frame_count: FLY_TO_FRAME_COUNT,
            ..FlyPathOptions::default()
        };
        self.fly_to(target, &options, rotation);
    }

    /// Advance one rendered frame and return the camera position to use.
    ///
    /// When a flight's last frame has been consumed the next tick sends
    /// [`RotationCommand::Resume`] once and the driver goes idle.
    pub fn tick(&mut self, rotation: &mut impl RotationControl) -> DVec3 {
        match &mut self.state {
            CameraState::Intro => {
                self.position = self.position.lerp(HOME_POSITION, INTRO_LERP_FACTOR);
                if self.position.distance(HOME_POSITION) < INTRO_SNAP_DISTANCE {
                    self.position = HOME_POSITION;
                    self.state = CameraState::Idle;
                    debug!("intro approach finished");
                }
            }
            CameraState::Idle => {}
            CameraState::Flying(animation) => {
                if let Some(frame) = animation.advance() {
                    self.position = frame;
                } else {
                    self.state = CameraState::Idle;
                    rotation.apply(RotationCommand::Resume);
                    debug!("fly path finished");
                }
            }
        }
        self.position
    }
}
