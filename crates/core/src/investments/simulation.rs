//! Compound growth projections for a one-off investment.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::{new_id, now_naive, round_currency};

const DEFAULT_TIMEFRAME_YEARS: u32 = 5;
const MAX_TIMEFRAME_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Expected annual return in percent.
    pub fn expected_return(&self) -> Decimal {
        match self {
            RiskLevel::Conservative => dec!(5.5),
            RiskLevel::Moderate => dec!(8.5),
            RiskLevel::Aggressive => dec!(12.0),
        }
    }

    pub fn risk_metrics(&self) -> RiskMetrics {
        let (volatility, sharpe_ratio, max_drawdown) = match self {
            RiskLevel::Conservative => (dec!(8.2), dec!(0.52), dec!(8.5)),
            RiskLevel::Moderate => (dec!(12.5), dec!(0.68), dec!(15.2)),
            RiskLevel::Aggressive => (dec!(18.7), dec!(0.81), dec!(25.8)),
        };
        RiskMetrics {
            volatility,
            sharpe_ratio,
            max_drawdown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Conservative => "conservative",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(RiskLevel::Conservative),
            "moderate" => Ok(RiskLevel::Moderate),
            "aggressive" => Ok(RiskLevel::Aggressive),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "risk level",
                value: other.to_string(),
            })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub volatility: Decimal,
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub asset: String,
    pub amount: Decimal,
    pub strategy: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub timeframe_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedReturn {
    pub year: u32,
    pub value: Decimal,
    pub annual_return: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub id: String,
    pub asset: String,
    pub amount: Decimal,
    pub strategy: String,
    pub risk_level: RiskLevel,
    pub expected_return: Decimal,
    pub timeframe_years: u32,
    pub submitted_date: NaiveDateTime,
    pub projected_returns: Vec<ProjectedReturn>,
    pub risk_metrics: RiskMetrics,
}

/// Projects year-end values of `request.amount` compounding at the risk
/// level's expected return.
pub fn simulate_growth(request: &SimulationRequest) -> Result<SimulationResult> {
    if request.asset.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "asset".to_string(),
        )));
    }
    if request.strategy.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "strategy".to_string(),
        )));
    }
    if request.amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NotPositive {
            field: "amount",
            value: request.amount.to_string(),
        }));
    }
    let years = request.timeframe_years.unwrap_or(DEFAULT_TIMEFRAME_YEARS);
    if years == 0 || years > MAX_TIMEFRAME_YEARS {
        return Err(Error::invalid(format!(
            "Timeframe must be between 1 and {} years",
            MAX_TIMEFRAME_YEARS
        )));
    }

    let rate = request.risk_level.expected_return();
    let growth = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
    let mut value = request.amount;
    let mut projected_returns = Vec::with_capacity(years as usize);
    for year in 1..=years {
        value = value
            .checked_mul(growth)
            .ok_or_else(|| Error::Calculation("Projected value overflow".to_string()))?;
        projected_returns.push(ProjectedReturn {
            year,
            value: round_currency(value),
            annual_return: rate,
        });
    }

    Ok(SimulationResult {
        id: new_id(),
        asset: request.asset.trim().to_string(),
        amount: request.amount,
        strategy: request.strategy.trim().to_string(),
        risk_level: request.risk_level,
        expected_return: rate,
        timeframe_years: years,
        submitted_date: now_naive(),
        projected_returns,
        risk_metrics: request.risk_level.risk_metrics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(risk_level: RiskLevel, years: Option<u32>) -> SimulationRequest {
        SimulationRequest {
            asset: "S&P 500 ETF".to_string(),
            amount: dec!(10000),
            strategy: "buy-and-hold".to_string(),
            risk_level,
            timeframe_years: years,
        }
    }

    #[test]
    fn test_moderate_projection_defaults_to_five_years() {
        let result = simulate_growth(&request(RiskLevel::Moderate, None)).unwrap();
        assert_eq!(result.timeframe_years, 5);
        let values: Vec<_> = result.projected_returns.iter().map(|p| p.value).collect();
        assert_eq!(
            values,
            vec![
                dec!(10850.00),
                dec!(11772.25),
                dec!(12772.89),
                dec!(13858.59),
                dec!(15036.57)
            ]
        );
        assert_eq!(result.risk_metrics.sharpe_ratio, dec!(0.68));
    }

    #[test]
    fn test_conservative_rate_and_metrics() {
        let result = simulate_growth(&request(RiskLevel::Conservative, Some(1))).unwrap();
        assert_eq!(result.expected_return, dec!(5.5));
        assert_eq!(result.projected_returns[0].value, dec!(10550.00));
        assert_eq!(result.risk_metrics.max_drawdown, dec!(8.5));
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut bad = request(RiskLevel::Aggressive, Some(0));
        assert!(simulate_growth(&bad).is_err());
        bad.timeframe_years = Some(3);
        bad.amount = dec!(0);
        assert!(simulate_growth(&bad).is_err());
    }

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!("Aggressive".parse::<RiskLevel>().unwrap(), RiskLevel::Aggressive);
        assert!("reckless".parse::<RiskLevel>().is_err());
    }
}
