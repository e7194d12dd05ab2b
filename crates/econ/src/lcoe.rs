use serde::{Deserialize, Serialize};

use crate::error::EconError;

fn default_opex_per_capex() -> f64 {
    0.02
}

fn default_lifetime() -> u32 {
    20
}

fn default_discount_rate() -> f64 {
    0.08
}

/// Financial assumptions for [`simple_lcoe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Financing {
    /// Annual operating cost as a fraction of capex.
    #[serde(default = "default_opex_per_capex")]
    pub opex_per_capex: f64,
    /// Economic lifetime in years.
    #[serde(default = "default_lifetime")]
    pub lifetime: u32,
    /// Annual discount rate.
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
}

impl Default for Financing {
    fn default() -> Self {
        Self {
            opex_per_capex: default_opex_per_capex(),
            lifetime: default_lifetime(),
            discount_rate: default_discount_rate(),
        }
    }
}

impl Financing {
    /// Sets the annual opex fraction.
    pub fn with_opex_per_capex(mut self, opex_per_capex: f64) -> Self {
        self.opex_per_capex = opex_per_capex;
        self
    }

    /// Sets the lifetime in years.
    pub fn with_lifetime(mut self, lifetime: u32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the discount rate.
    pub fn with_discount_rate(mut self, discount_rate: f64) -> Self {
        self.discount_rate = discount_rate;
        self
    }

    /// Validates the assumptions.
    ///
    /// # Errors
    ///
    /// Returns [`EconError::InvalidConfig`] for a zero lifetime, a negative or
    /// non-finite opex fraction, or a discount rate that is not finite and
    /// above -1.
    pub fn validate(&self) -> Result<(), EconError> {
        if self.lifetime == 0 {
            return Err(EconError::InvalidConfig {
                reason: "lifetime must be at least one year".to_string(),
            });
        }
        if !self.opex_per_capex.is_finite() || self.opex_per_capex < 0.0 {
            return Err(EconError::InvalidConfig {
                reason: format!("opex_per_capex must be >= 0, got {}", self.opex_per_capex),
            });
        }
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(EconError::InvalidConfig {
                reason: format!("discount_rate must be > -1, got {}", self.discount_rate),
            });
        }
        Ok(())
    }

    /// Capital recovery factor `r / (1 - (1 + r)^-N)`, `1 / N` at `r = 0`.
    pub fn capital_recovery_factor(&self) -> f64 {
        let r = self.discount_rate;
        let n = f64::from(self.lifetime);
        if r == 0.0 {
            return 1.0 / n;
        }
        r / (1.0 - (1.0 + r).powf(-n))
    }
}

/// LCOE from an annuitised capex plus a fixed opex share:
/// `capex * (crf + opex_per_capex) / mean_production`.
///
/// `mean_production` is the expected annual production; the result is in
/// capex currency per production unit.
///
/// # Errors
///
/// Returns [`EconError::InvalidConfig`] for invalid financing or a negative
/// capex, and [`EconError::NoProduction`] for a production that is not
/// strictly positive.
pub fn simple_lcoe(capex: f64, mean_production: f64, financing: &Financing) -> Result<f64, EconError> {
    financing.validate()?;
    if !capex.is_finite() || capex < 0.0 {
        return Err(EconError::InvalidConfig {
            reason: format!("capex must be >= 0, got {capex}"),
        });
    }
    if !mean_production.is_finite() || mean_production <= 0.0 {
        return Err(EconError::NoProduction {
            value: mean_production,
        });
    }
    Ok(capex * (financing.capital_recovery_factor() + financing.opex_per_capex) / mean_production)
}

/// Discount rate applied in [`lcoe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscountRate {
    /// Same rate every year.
    Uniform(f64),
    /// One rate per year; year `y` is discounted by `(1 + r[y])^y`.
    PerYear(Vec<f64>),
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::Uniform(default_discount_rate())
    }
}

/// LCOE from annual cash flows: the discounted sum of expenditures over the
/// discounted sum of productions. Year 0 is undiscounted.
///
/// # Errors
///
/// Returns [`EconError::EmptyData`] for empty series,
/// [`EconError::LengthMismatch`] when productions or per-year rates do not
/// match the expenditures, and [`EconError::NoProduction`] when discounted
/// production is zero.
pub fn lcoe(
    expenditures: &[f64],
    productions: &[f64],
    rate: &DiscountRate,
) -> Result<f64, EconError> {
    let n = expenditures.len();
    if n == 0 {
        return Err(EconError::EmptyData);
    }
    if productions.len() != n {
        return Err(EconError::LengthMismatch {
            expected: n,
            got: productions.len(),
            field: "productions".to_string(),
        });
    }
    let rates = match rate {
        DiscountRate::Uniform(r) => vec![*r; n],
        DiscountRate::PerYear(r) if r.len() == n => r.clone(),
        DiscountRate::PerYear(r) => {
            return Err(EconError::LengthMismatch {
                expected: n,
                got: r.len(),
                field: "discount_rate".to_string(),
            });
        }
    };

    let mut cost = 0.0;
    let mut production = 0.0;
    for (year, ((&e, &p), &r)) in expenditures.iter().zip(productions).zip(&rates).enumerate() {
        let factor = (1.0 + r).powi(year as i32);
        cost += e / factor;
        production += p / factor;
    }
    if production == 0.0 || !production.is_finite() {
        return Err(EconError::NoProduction { value: production });
    }
    Ok(cost / production)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crf_zero_rate() {
        let f = Financing::default().with_discount_rate(0.0).with_lifetime(25);
        assert_relative_eq!(f.capital_recovery_factor(), 0.04);
    }

    #[test]
    fn crf_single_year_repays_with_interest() {
        let f = Financing::default().with_lifetime(1);
        assert_relative_eq!(f.capital_recovery_factor(), 1.08, epsilon = 1e-12);
    }

    #[test]
    fn validate_rejects_zero_lifetime() {
        let f = Financing::default().with_lifetime(0);
        assert!(matches!(f.validate(), Err(EconError::InvalidConfig { .. })));
    }

    #[test]
    fn simple_lcoe_rejects_zero_production() {
        assert!(matches!(
            simple_lcoe(1000.0, 0.0, &Financing::default()),
            Err(EconError::NoProduction { .. })
        ));
    }

    #[test]
    fn lcoe_single_year() {
        let v = lcoe(&[100.0], &[50.0], &DiscountRate::default()).unwrap();
        assert_relative_eq!(v, 2.0);
    }

    #[test]
    fn lcoe_rejects_mismatched_rates() {
        let err = lcoe(&[1.0, 1.0], &[1.0, 1.0], &DiscountRate::PerYear(vec![0.05])).unwrap_err();
        assert!(matches!(err, EconError::LengthMismatch { got: 1, .. }));
    }
}
