use rand::{SeedableRng as _, distr::Distribution as _};
use rand_distr::Normal;
use rand_pcg::Pcg32;

use crate::engine::{AnalogInput, Band, InputBands};

/// Highest reading of the 12-bit converter.
pub const ADC_MAX: u16 = 4095;

/// A button on the resistor ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Button {
    Left,
    Right,
    /// Third button: soft drop in game, select in menus.
    Down,
    /// Fourth button: rotate in game, also selects in menus.
    Rotate,
}

impl Button {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Down, Self::Rotate];

    /// The band the button's ladder tap falls in.
    #[must_use]
    pub const fn band(self, bands: &InputBands) -> Band {
        match self {
            Self::Left => bands.left,
            Self::Right => bands.right,
            Self::Down => bands.soft_drop,
            Self::Rotate => bands.rotate,
        }
    }
}

/// Simulated resistor-ladder input.
///
/// Produces the nominal reading of the pressed button (or the idle level)
/// plus Gaussian noise, clamped so a pressed button always decodes to its own
/// band. The noise is what the piece generator draws its randomness from.
#[derive(Debug, Clone)]
pub struct LadderSimulator {
    bands: InputBands,
    rng: Pcg32,
    noise: Option<Normal<f64>>,
    idle: Band,
    pressed: Option<Button>,
}

impl LadderSimulator {
    /// Default standard deviation of the reading noise, in ADC counts.
    pub const DEFAULT_NOISE: f64 = 12.0;

    #[must_use]
    pub fn new(bands: InputBands, seed: u64) -> Self {
        Self::with_noise(bands, seed, Self::DEFAULT_NOISE)
    }

    /// Creates a simulator with the given noise standard deviation.
    ///
    /// Negative or non-finite deviations fall back to a noiseless ladder.
    #[must_use]
    pub fn with_noise(bands: InputBands, seed: u64, std_dev: f64) -> Self {
        let noise = Normal::new(0.0, std_dev).ok();
        let idle = Band::new(bands.any_button.high, ADC_MAX + 1);
        Self {
            bands,
            rng: Pcg32::seed_from_u64(seed),
            noise,
            idle,
            pressed: None,
        }
    }

    pub fn press(&mut self, button: Button) {
        self.pressed = Some(button);
    }

    pub fn release(&mut self) {
        self.pressed = None;
    }

    #[must_use]
    pub fn pressed(&self) -> Option<Button> {
        self.pressed
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample_in(&mut self, band: Band, center: u16) -> u16 {
        let jitter = self
            .noise
            .as_ref()
            .map_or(0.0, |noise| noise.sample(&mut self.rng));
        let value = (f64::from(center) + jitter).round();
        // Inner edges of the band, collapsed to one value when it is empty.
        let low = band.low.saturating_add(1).min(ADC_MAX);
        let high = band.high.saturating_sub(1).clamp(low, ADC_MAX);
        value.clamp(f64::from(low), f64::from(high)) as u16
    }
}

impl AnalogInput for LadderSimulator {
    fn read(&mut self) -> u16 {
        match self.pressed {
            Some(button) => {
                let band = button.band(&self.bands);
                self.sample_in(band, band.center())
            }
            None => {
                let idle = self.idle;
                let center = idle.high.saturating_sub(200).max(idle.center());
                self.sample_in(idle, center)
            }
        }
    }
}
