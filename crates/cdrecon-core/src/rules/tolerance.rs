use crate::error::CoreError;
use serde::Serialize;

/// Inclusive limits on how far two operators' measurements may drift apart
/// and still describe the same call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerances {
    duration: f64,
    time: f64,
}

impl Tolerances {
    pub fn new(duration: f64, time: f64) -> Result<Self, CoreError> {
        Ok(Self {
            duration: validate_tolerance("duration", duration)?,
            time: validate_tolerance("time", time)?,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn accepts_duration(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.duration
    }

    pub fn accepts_time(&self, a: i64, b: i64) -> bool {
        a.abs_diff(b) as f64 <= self.time
    }
}

pub fn validate_tolerance(name: &'static str, value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidTolerance { name, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::Tolerances;
    use crate::error::CoreError;

    #[test]
    fn new_accepts_zero() {
        let tolerances = Tolerances::new(0.0, 0.0).unwrap();
        assert!(tolerances.accepts_duration(10.0, 10.0));
        assert!(!tolerances.accepts_duration(10.0, 10.5));
    }

    #[test]
    fn new_rejects_negative() {
        let err = Tolerances::new(-1.0, 5.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTolerance {
                name: "duration",
                ..
            }
        ));
    }

    #[test]
    fn new_rejects_missing_values() {
        assert!(Tolerances::new(5.0, f64::NAN).is_err());
        assert!(Tolerances::new(f64::INFINITY, 5.0).is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let tolerances = Tolerances::new(5.0, 2.0).unwrap();
        assert!(tolerances.accepts_duration(120.0, 125.0));
        assert!(!tolerances.accepts_duration(120.0, 125.5));
        assert!(tolerances.accepts_time(45_045, 45_047));
        assert!(tolerances.accepts_time(45_047, 45_045));
        assert!(!tolerances.accepts_time(45_045, 45_048));
    }
}
