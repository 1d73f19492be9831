use std::f64::consts::PI;

/// How long the camera jitters after a successful placement.
pub const SHAKE_DURATION_MS: f64 = 500.0;

// Transient animation timestamps, held in a use_mut_ref by the game view.
// The engine never reads these; it only reacts to the completion signal.
#[derive(Default, Debug, Clone)]
pub struct Fx {
    /// When the current drop animation started (ms since epoch).
    pub drop_started_ms: Option<f64>,
    /// When the game-over keel-over started.
    pub fall_started_ms: Option<f64>,
    /// Tower tilt at the moment of the miss, eased towards the fall angle.
    pub fall_from_tilt: f64,
    /// When the placement screen shake started.
    pub shake_started_ms: Option<f64>,
}

impl Fx {
    /// Camera jitter for the placement shake. A damped oscillation that dies
    /// out by `SHAKE_DURATION_MS`; zero whenever no shake is running.
    pub fn shake_offset(&self, now: f64) -> (f64, f64) {
        let Some(start) = self.shake_started_ms else {
            return (0.0, 0.0);
        };
        let t = (now - start) / SHAKE_DURATION_MS;
        if !(0.0..1.0).contains(&t) {
            return (0.0, 0.0);
        }
        let damp = 1.0 - t;
        let dx = (t * 40.0 * PI).sin() * 4.0 * damp;
        let dy = (t * 34.0 * PI).cos() * 3.0 * damp;
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_shake_without_a_stamp() {
        assert_eq!(Fx::default().shake_offset(1_000.0), (0.0, 0.0));
    }

    #[test]
    fn shake_jitters_while_running() {
        let fx = Fx { shake_started_ms: Some(0.0), ..Fx::default() };
        let (dx, dy) = fx.shake_offset(100.0);
        assert!(dx.abs() > 0.0 || dy.abs() > 0.0);
        assert!(dx.abs() <= 4.0 && dy.abs() <= 3.0);
    }

    #[test]
    fn shake_dies_out_after_its_duration() {
        let fx = Fx { shake_started_ms: Some(0.0), ..Fx::default() };
        assert_eq!(fx.shake_offset(SHAKE_DURATION_MS), (0.0, 0.0));
        assert_eq!(fx.shake_offset(SHAKE_DURATION_MS * 3.0), (0.0, 0.0));
    }
}
