//! Run parameters for the wave solver.
//!
//! The physical domain is fixed to `(-1, 1) x (-1, 1)` and the final time
//! to 1, so a run is fully described by the point counts, the number of
//! steps and the wave speed.

use serde::{Deserialize, Serialize};

use crate::wave_error::WaveError;

/// Which two-level time recurrence [`step`](crate::algs::stencil::step) evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// `next = 2·cur + prev + C²·L(cur)`, kept exactly as the reference
    /// program computes it.
    #[default]
    Literal,
    /// Standard second-order leapfrog, `next = 2·cur - prev + C²·L(cur)`.
    Leapfrog,
}

/// Global parameters shared by every rank of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Interior points along x (split among ranks).
    pub nx: usize,
    /// Interior points along y (never split).
    pub ny: usize,
    /// Number of time steps; also fixes `dt = 1/(steps-1)`.
    pub steps: usize,
    /// Wave speed `c`.
    pub wave_speed: f64,
    /// Update formula for "next"; see [`Recurrence`].
    pub recurrence: Recurrence,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            nx: 100,
            ny: 100,
            steps: 10,
            wave_speed: 1.0,
            recurrence: Recurrence::Literal,
        }
    }
}

impl WaveConfig {
    /// Config with the given grid and the default time stepping.
    pub fn new(nx: usize, ny: usize, steps: usize) -> Self {
        Self {
            nx,
            ny,
            steps,
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON config; missing keys take defaults.
    pub fn from_json(s: &str) -> Result<Self, WaveError> {
        let cfg: WaveConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the rank-independent parameters.
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(WaveError::InvalidGrid {
                nx: self.nx,
                ny: self.ny,
            });
        }
        if self.steps < 2 {
            return Err(WaveError::InvalidStepCount(self.steps));
        }
        if !self.wave_speed.is_finite() || self.wave_speed <= 0.0 {
            return Err(WaveError::InvalidWaveSpeed(self.wave_speed));
        }
        Ok(())
    }

    /// Time step; the run spans `t ∈ [0, 1]`.
    pub fn dt(&self) -> f64 {
        1.0 / (self.steps as f64 - 1.0)
    }

    /// Grid spacing along x; x spans `(-1, 1)`.
    pub fn dx(&self) -> f64 {
        2.0 / (self.nx as f64 + 1.0)
    }

    /// Grid spacing along y; y spans `(-1, 1)`.
    pub fn dy(&self) -> f64 {
        2.0 / (self.ny as f64 + 1.0)
    }

    /// `c²·(dt/dx)²`, the coefficient of the Laplacian in the update.
    pub fn courant_sq(&self) -> f64 {
        let dtdx = self.dt() / self.dx();
        self.wave_speed * self.wave_speed * dtdx * dtdx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let cfg = WaveConfig::default();
        assert_eq!((cfg.nx, cfg.ny, cfg.steps), (100, 100, 10));
        assert_eq!(cfg.wave_speed, 1.0);
        assert_eq!(cfg.recurrence, Recurrence::Literal);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn derived_quantities() {
        let cfg = WaveConfig::new(4, 9, 11);
        assert!((cfg.dt() - 0.1).abs() < 1e-15);
        assert!((cfg.dx() - 0.4).abs() < 1e-15);
        assert!((cfg.dy() - 0.2).abs() < 1e-15);
        assert!((cfg.courant_sq() - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            WaveConfig::new(0, 4, 10).validate(),
            Err(WaveError::InvalidGrid { nx: 0, ny: 4 })
        ));
        assert!(matches!(
            WaveConfig::new(4, 4, 1).validate(),
            Err(WaveError::InvalidStepCount(1))
        ));
        let mut cfg = WaveConfig::new(4, 4, 10);
        cfg.wave_speed = f64::NAN;
        assert!(matches!(cfg.validate(), Err(WaveError::InvalidWaveSpeed(_))));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let cfg = WaveConfig::from_json(r#"{ "nx": 8, "recurrence": "leapfrog" }"#).unwrap();
        assert_eq!(cfg.nx, 8);
        assert_eq!(cfg.ny, 100);
        assert_eq!(cfg.recurrence, Recurrence::Leapfrog);
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            WaveConfig::from_json("{ nx: }"),
            Err(WaveError::Config(_))
        ));
    }
}
