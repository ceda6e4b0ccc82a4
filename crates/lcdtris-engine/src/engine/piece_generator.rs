use crate::core::ShapeCode;

/// Picks the next shape from an ADC reading.
///
/// The console has no hardware RNG; the low bits of the noisy ladder reading
/// stand in for one. `sample % 7` picks the family and a second modulus picks
/// the orientation within it.
///
/// # Example
///
/// ```
/// use lcdtris_engine::RandomPieceGenerator;
///
/// assert_eq!(RandomPieceGenerator::shape_for_sample(700).code(), 0);
/// assert_eq!(RandomPieceGenerator::shape_for_sample(701).code(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPieceGenerator;

impl RandomPieceGenerator {
    #[must_use]
    pub const fn shape_for_sample(sample: u16) -> ShapeCode {
        let code = match sample % 7 {
            0 => 0,
            1 => 1 + sample % 2,
            2 => 3 + sample % 2,
            3 => 5 + sample % 2,
            4 => 7 + sample % 4,
            5 => 11 + sample % 4,
            _ => 15 + sample % 4,
        };
        match ShapeCode::new(code as u8) {
            Ok(shape) => shape,
            Err(_) => ShapeCode::SQUARE,
        }
    }

    /// Draws the next shape, logging the choice.
    #[must_use]
    pub fn generate(&self, sample: u16) -> ShapeCode {
        let shape = Self::shape_for_sample(sample);
        tracing::trace!(sample, shape = shape.code(), "generated shape");
        shape
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::core::Family;

    use super::*;

    #[test]
    fn test_documented_samples() {
        assert_eq!(RandomPieceGenerator::shape_for_sample(700).code(), 0);
        // 701 % 7 == 1 picks the bar; 701 % 2 == 1 picks the horizontal one.
        assert_eq!(RandomPieceGenerator::shape_for_sample(701).code(), 2);
        assert_eq!(RandomPieceGenerator::shape_for_sample(708).code(), 1);
    }

    #[test]
    fn test_family_follows_sample_mod_seven() {
        for sample in 0..2000u16 {
            let shape = RandomPieceGenerator::shape_for_sample(sample);
            assert_eq!(shape.family(), Family::ALL[usize::from(sample % 7)]);
        }
    }

    #[test]
    fn test_every_shape_reachable() {
        let shapes: HashSet<_> = (0..4096u16)
            .map(RandomPieceGenerator::shape_for_sample)
            .collect();
        assert_eq!(shapes.len(), ShapeCode::LEN);
    }
}
