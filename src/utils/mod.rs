//! The utilies module provides general capabilities, that may span the
//! input modeling, output analysis, and simulator modules.  The utilities
//! are centered around error reporting and debugging.

pub mod errors;

/// When the `console_error_panic_hook` feature is enabled, we can call the
/// `set_panic_hook` function at least once during initialization, and then
/// we will get better error messages if our code ever panics.
///
/// For more details see
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Check that a configured value is finite and strictly positive, naming
/// the offending parameter in the returned error.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, errors::SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(errors::SimulationError::InvalidParameter(format!(
            "{} must be finite and greater than zero, but was {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq![2.5, require_positive("mean", 2.5).unwrap()];
    }

    #[test]
    fn non_positive_and_non_finite_values_are_rejected() {
        assert!(require_positive("mean", 0.0).is_err());
        assert!(require_positive("mean", -1.0).is_err());
        assert!(require_positive("mean", f64::NAN).is_err());
        assert!(require_positive("mean", f64::INFINITY).is_err());
    }
}
