use std::sync::atomic::{AtomicU16, Ordering};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, engine::ADC_MAX};

/// An open interval of ADC readings, `low < sample < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub low: u16,
    pub high: u16,
}

impl Band {
    #[must_use]
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub const fn contains(self, sample: u16) -> bool {
        sample > self.low && sample < self.high
    }

    /// Midpoint of the band, the nominal reading of the button it decodes.
    #[must_use]
    pub const fn center(self) -> u16 {
        self.low + self.high.saturating_sub(self.low) / 2
    }

    fn validate(self, name: &'static str) -> Result<(), ConfigError> {
        if self.high.saturating_sub(self.low) > 1 {
            Ok(())
        } else {
            Err(ConfigError::EmptyBand {
                name,
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Thresholds that map the ladder voltage onto buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputBands {
    pub left: Band,
    pub right: Band,
    pub soft_drop: Band,
    pub rotate: Band,
    /// Confirms a menu entry.
    pub select: Band,
    /// Any button at all, used to leave summary screens.
    pub any_button: Band,
}

impl Default for InputBands {
    fn default() -> Self {
        Self {
            left: Band::new(1700, 2300),
            right: Band::new(2500, 3100),
            soft_drop: Band::new(3300, 3450),
            rotate: Band::new(3520, 3650),
            select: Band::new(3300, 3650),
            any_button: Band::new(1700, 3650),
        }
    }
}

impl InputBands {
    /// Decodes a gameplay event. Bands are tested left, right, rotate, then
    /// soft drop.
    #[must_use]
    pub fn decode(&self, sample: u16) -> InputEvent {
        if self.left.contains(sample) {
            InputEvent::Left
        } else if self.right.contains(sample) {
            InputEvent::Right
        } else if self.rotate.contains(sample) {
            InputEvent::Rotate
        } else if self.soft_drop.contains(sample) {
            InputEvent::SoftDrop
        } else {
            InputEvent::None
        }
    }

    /// Decodes a menu event.
    #[must_use]
    pub fn decode_menu(&self, sample: u16) -> MenuEvent {
        if self.left.contains(sample) {
            MenuEvent::Next
        } else if self.right.contains(sample) {
            MenuEvent::Previous
        } else if self.select.contains(sample) {
            MenuEvent::Select
        } else {
            MenuEvent::None
        }
    }

    #[must_use]
    pub fn is_any_button(&self, sample: u16) -> bool {
        self.any_button.contains(sample)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.left.validate("left")?;
        self.right.validate("right")?;
        self.soft_drop.validate("soft_drop")?;
        self.rotate.validate("rotate")?;
        self.select.validate("select")?;
        self.any_button.validate("any_button")?;
        // Readings above `any_button` are the idle level.
        if self.any_button.high >= ADC_MAX {
            return Err(ConfigError::NoIdleLevel(self.any_button.high));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum InputEvent {
    None,
    Left,
    Right,
    SoftDrop,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MenuEvent {
    None,
    /// Left button; moves the cursor forward.
    Next,
    /// Right button; moves the cursor back.
    Previous,
    Select,
}

/// Source of raw ADC readings.
pub trait AnalogInput {
    fn read(&mut self) -> u16;
}

/// The latest ADC conversion, written from an interrupt and read by the game
/// loop.
#[derive(Debug, Default)]
pub struct SharedSample(AtomicU16);

impl SharedSample {
    #[must_use]
    pub const fn new(sample: u16) -> Self {
        Self(AtomicU16::new(sample))
    }

    /// Called from the conversion-complete handler.
    pub fn store(&self, sample: u16) {
        self.0.store(sample, Ordering::Relaxed);
    }

    #[must_use]
    pub fn load(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }
}

impl AnalogInput for &SharedSample {
    fn read(&mut self) -> u16 {
        self.load()
    }
}

impl AnalogInput for SharedSample {
    fn read(&mut self) -> u16 {
        self.load()
    }
}
