// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Celebration planning.
//!
//! A celebration is three confetti bursts fired at once: one from the
//! centre and two narrower ones biased left and right. Origins are in
//! viewport-normalised coordinates, `(0, 0)` top-left to `(1, 1)`
//! bottom-right.

use kurbo::Point;

use crate::backend::CelebrationEffects;

/// Parameters of one particle burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    /// Number of particles.
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: f64,
    /// Normalised launch origin.
    pub origin: Point,
}

/// Confetti tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiConfig {
    /// Particles per burst.
    pub particle_count: u32,
    /// Spread of the centre burst, in degrees.
    pub spread: f64,
    /// Spread of the two side bursts, in degrees.
    pub side_spread: f64,
    /// Vertical origin shared by all bursts.
    pub origin_y: f64,
    /// Horizontal distance of the side bursts from the centre.
    pub side_offset: f64,
}

impl ConfettiConfig {
    /// Default burst parameters.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            particle_count: 120,
            spread: 90.0,
            side_spread: 70.0,
            origin_y: 0.6,
            side_offset: 0.2,
        }
    }

    /// Returns the centre, left and right bursts, in firing order.
    #[must_use]
    pub const fn bursts(&self) -> [Burst; 3] {
        let center = Burst {
            particle_count: self.particle_count,
            spread: self.spread,
            origin: Point::new(0.5, self.origin_y),
        };
        let left = Burst {
            particle_count: self.particle_count,
            spread: self.side_spread,
            origin: Point::new(0.5 - self.side_offset, self.origin_y),
        };
        let right = Burst {
            particle_count: self.particle_count,
            spread: self.side_spread,
            origin: Point::new(0.5 + self.side_offset, self.origin_y),
        };
        [center, left, right]
    }
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Fires the celebration on `effects` unless reduced motion is preferred.
///
/// Returns the number of bursts fired.
pub fn celebrate<E: CelebrationEffects + ?Sized>(effects: &E, config: &ConfettiConfig) -> usize {
    if effects.prefers_reduced_motion() {
        return 0;
    }
    let bursts = config.bursts();
    for burst in &bursts {
        effects.burst(burst);
    }
    bursts.len()
}
