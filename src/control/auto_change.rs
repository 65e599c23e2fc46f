use rand::Rng;

use super::Lighting;

/// Per-tick draws in `0..1024` below this leave a term untouched.
const HOLD_THRESHOLD: u32 = 800;
const ANGLE_STEP: f32 = 0.02;

/// Slow random walk over the lighting terms, driven by the timer tick.
///
/// Each tick every term independently moves by `cos(angle) / 100` with
/// probability 224/1024, then is clamped to `[0, 1]`. The shared angle
/// advances every tick so the walk drifts up and down over time.
#[derive(Debug, Clone, Default)]
pub struct AutoChange {
    enabled: bool,
    angle: f32,
}

impl AutoChange {
    /// Whether the walk runs on each tick.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the walk on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the walk on/off and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Advance one tick. Returns `true` if the walk is enabled (the caller
    /// must re-render), `false` if nothing happened.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        lighting: &mut Lighting,
        rng: &mut R,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let amount = self.angle.cos() / 100.0;
        for term in lighting.terms_mut() {
            if rng.random_range(0..1024_u32) < HOLD_THRESHOLD {
                continue;
            }
            *term = (*term + amount).clamp(0.0, 1.0);
        }
        self.angle += ANGLE_STEP;
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::control::ControlState;

    #[test]
    fn disabled_walk_is_inert() {
        let mut walk = AutoChange::default();
        let mut lighting = ControlState::new().lighting;
        let before = lighting;
        let mut rng = StdRng::seed_from_u64(7);
        assert!(!walk.step(&mut lighting, &mut rng));
        assert_eq!(lighting, before);
    }

    #[test]
    fn walk_stays_in_unit_range() {
        let mut walk = AutoChange::default();
        assert!(walk.toggle());
        let mut lighting = ControlState::new().lighting;
        lighting.ambient = 1.0;
        lighting.diffuse = 0.0;
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            assert!(walk.step(&mut lighting, &mut rng));
            for term in lighting.terms_mut() {
                assert!((0.0..=1.0).contains(&*term));
            }
        }
    }

    #[test]
    fn walk_moves_some_terms() {
        let mut walk = AutoChange::default();
        walk.set_enabled(true);
        let mut lighting = ControlState::new().lighting;
        let before = lighting;
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let _ = walk.step(&mut lighting, &mut rng);
        }
        assert_ne!(lighting, before);
    }
}
