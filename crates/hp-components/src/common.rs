//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hp_core::numeric::ensure_finite;

/// Residual scale for mass flow equations (kg/s).
pub const MASS_SCALE: f64 = 1.0;

/// Residual scale for pressure equations (Pa).
pub const PRESSURE_SCALE: f64 = 1e5;

/// Residual scale for enthalpy equations (J/kg).
pub const ENTHALPY_SCALE: f64 = 1e5;

/// Residual scale for heat and power equations (W).
pub const POWER_SCALE: f64 = 1e6;

/// Residual scale for temperature equations (K).
pub const TEMPERATURE_SCALE: f64 = 10.0;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Validate an optional pressure ratio (must be positive).
pub fn check_pressure_ratio(pr: Option<f64>) -> ComponentResult<()> {
    match pr {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(ComponentError::InvalidArg {
            what: "pressure ratio must be positive and finite",
        }),
        _ => Ok(()),
    }
}

/// Scaled pressure ratio residual `p_out - pr * p_in`.
pub fn pressure_ratio_residual(p_in: f64, p_out: f64, pr: f64) -> f64 {
    (p_out - pr * p_in) / PRESSURE_SCALE
}

/// Scaled mass balance residual.
pub fn mass_residual(m_in: f64, m_out: f64) -> f64 {
    (m_in - m_out) / MASS_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_pressure_ratio() {
        assert!(check_pressure_ratio(None).is_ok());
        assert!(check_pressure_ratio(Some(1.0)).is_ok());
        assert!(check_pressure_ratio(Some(0.0)).is_err());
        assert_eq!(pressure_ratio_residual(2e5, 2e5, 1.0), 0.0);
        assert!((pressure_ratio_residual(1e5, 3e5, 2.0) - 1.0).abs() < 1e-12);
    }
}
