//! Tilt and shake recognition
//!
//! Derived from the same accelerometer samples the mapper uses, but only
//! consumed by the display. The packet encoder never looks at it.

use super::reading::Accel;

/// Raw value at which an axis counts as tilted
pub const TILT_ENTER: i8 = 26;

/// Raw magnitude below which a tilted axis returns to level
pub const TILT_EXIT: i8 = 15;

/// Sum of per-axis deltas between samples that starts a shake
pub const SHAKE_ENTER: u16 = 120;

/// Sum of per-axis deltas below which a shake ends
pub const SHAKE_EXIT: u16 = 40;

/// Change flags returned by [`TiltShakeRecognizer::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionFlags(u8);

impl MotionFlags {
    /// Tilt state changed on at least one axis
    pub const TILT: Self = Self(0x01);
    /// Shake started or stopped
    pub const SHAKE: Self = Self(0x02);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// Per-axis tilt, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

/// Hysteresis-based tilt and shake detector for one node
#[derive(Debug, Clone, Default)]
pub struct TiltShakeRecognizer {
    tilt: Tilt,
    shaking: bool,
    last: Option<Accel>,
}

impl TiltShakeRecognizer {
    pub const fn new() -> Self {
        Self {
            tilt: Tilt { x: 0, y: 0, z: 0 },
            shaking: false,
            last: None,
        }
    }

    /// Current tilt
    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    /// Check if the node is being shaken
    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// Feed a new sample and report what changed
    pub fn update(&mut self, accel: Accel) -> MotionFlags {
        let mut flags = MotionFlags::empty();

        let tilt = Tilt {
            x: next_tilt(self.tilt.x, accel.x),
            y: next_tilt(self.tilt.y, accel.y),
            z: next_tilt(self.tilt.z, accel.z),
        };
        if tilt != self.tilt {
            self.tilt = tilt;
            flags.insert(MotionFlags::TILT);
        }

        if let Some(last) = self.last {
            let delta = axis_delta(last.x, accel.x)
                + axis_delta(last.y, accel.y)
                + axis_delta(last.z, accel.z);

            let shaking = if self.shaking {
                delta >= SHAKE_EXIT
            } else {
                delta >= SHAKE_ENTER
            };
            if shaking != self.shaking {
                self.shaking = shaking;
                flags.insert(MotionFlags::SHAKE);
            }
        }
        self.last = Some(accel);

        flags
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn next_tilt(current: i8, raw: i8) -> i8 {
    if raw >= TILT_ENTER {
        1
    } else if raw <= -TILT_ENTER {
        -1
    } else if raw.unsigned_abs() < TILT_EXIT.unsigned_abs() || raw.signum() != current {
        // Level, or crossed over without reaching the other threshold
        0
    } else {
        current
    }
}

fn axis_delta(a: i8, b: i8) -> u16 {
    (i16::from(a) - i16::from(b)).unsigned_abs()
}
