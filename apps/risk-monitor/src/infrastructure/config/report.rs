//! Report content settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::ConfigError;
use crate::application::services::DEFAULT_REPORT_TITLE;
use crate::application::use_cases::{ExposurePlan, PositionQuery, ReportPlan};
use crate::domain::exposure::{ExposureRule, InstrumentKind};
use crate::domain::report::MarginScope;
use crate::domain::shared::Currency;

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Message title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Settlement currencies, as a list or a comma-separated string.
    #[serde(default = "default_currencies", deserialize_with = "currency_list")]
    pub currencies: Vec<String>,
    /// Maintenance margin aggregation.
    #[serde(default)]
    pub maintenance_margin: MarginSettings,
    /// Option exposure. Omit for a balances-only status report.
    #[serde(default)]
    pub exposure: Option<ExposureSettings>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            currencies: default_currencies(),
            maintenance_margin: MarginSettings::default(),
            exposure: None,
        }
    }
}

/// Maintenance margin scope name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginScopeKind {
    /// Sum every currency's maintenance margin.
    #[default]
    PerCurrency,
    /// Take the account-wide figure from one currency.
    Global,
}

/// Maintenance margin settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarginSettings {
    /// Aggregation scope.
    #[serde(default)]
    pub scope: MarginScopeKind,
    /// Currency carrying the account-wide figure (global scope only).
    #[serde(default)]
    pub currency: Option<String>,
}

/// Exposure rule name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureRuleKind {
    /// Filtered sum over short calls.
    ShortCalls,
    /// Unfiltered signed sum.
    NetNotional,
}

/// Option exposure settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureSettings {
    /// Reduction rule.
    pub rule: ExposureRuleKind,
    /// Underlying the instrument names are matched against.
    pub underlying: String,
    /// Currency whose USD index values short calls. Defaults to the underlying.
    #[serde(default)]
    pub index_currency: Option<String>,
    /// Contract multiplier for the net-notional rule.
    #[serde(default)]
    pub contract_multiplier: Option<Decimal>,
    /// Position queries. Defaults to the underlying's options.
    #[serde(default)]
    pub queries: Vec<PositionQuerySettings>,
}

/// One position query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionQuerySettings {
    /// Settlement currency.
    pub currency: String,
    /// Instrument kind.
    #[serde(default = "default_kind")]
    pub kind: String,
}

impl ReportSettings {
    /// Build the domain plan for one run.
    pub fn to_plan(&self) -> Result<ReportPlan, ConfigError> {
        let currencies = self
            .currencies
            .iter()
            .map(|code| parse_currency("report.currencies", code))
            .collect::<Result<Vec<_>, _>>()?;
        if currencies.is_empty() {
            return Err(ConfigError::ValidationError(
                "report.currencies must not be empty".to_string(),
            ));
        }

        let margin_scope = match self.maintenance_margin.scope {
            MarginScopeKind::PerCurrency => MarginScope::PerCurrency,
            MarginScopeKind::Global => {
                let code = self.maintenance_margin.currency.as_deref().ok_or_else(|| {
                    ConfigError::ValidationError(
                        "report.maintenance_margin.currency is required for global scope"
                            .to_string(),
                    )
                })?;
                let currency = parse_currency("report.maintenance_margin.currency", code)?;
                if !currencies.contains(&currency) {
                    return Err(ConfigError::ValidationError(format!(
                        "report.maintenance_margin.currency {currency} is not in report.currencies"
                    )));
                }
                MarginScope::Global(currency)
            }
        };

        let exposure = self
            .exposure
            .as_ref()
            .map(ExposureSettings::to_plan)
            .transpose()?;

        Ok(ReportPlan {
            currencies,
            margin_scope,
            exposure,
        })
    }
}

impl ExposureSettings {
    fn to_plan(&self) -> Result<ExposurePlan, ConfigError> {
        // Instrument names carry the underlying in upper case
        let underlying = self.underlying.trim().to_uppercase();
        if underlying.is_empty() {
            return Err(ConfigError::ValidationError(
                "report.exposure.underlying must not be empty".to_string(),
            ));
        }

        let rule = match self.rule {
            ExposureRuleKind::ShortCalls => {
                let index_code = self.index_currency.as_deref().unwrap_or(&underlying);
                ExposureRule::ShortCalls {
                    underlying: underlying.clone(),
                    index_currency: parse_currency("report.exposure.index_currency", index_code)?,
                }
            }
            ExposureRuleKind::NetNotional => {
                if let Some(multiplier) = self.contract_multiplier
                    && multiplier <= Decimal::ZERO
                {
                    return Err(ConfigError::ValidationError(
                        "report.exposure.contract_multiplier must be positive".to_string(),
                    ));
                }
                ExposureRule::net_notional(underlying.clone(), self.contract_multiplier)
            }
        };

        let queries = if self.queries.is_empty() {
            vec![PositionQuery {
                currency: parse_currency("report.exposure.underlying", &underlying)?,
                kind: InstrumentKind::Option,
            }]
        } else {
            self.queries
                .iter()
                .map(PositionQuerySettings::to_query)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(ExposurePlan { rule, queries })
    }
}

impl PositionQuerySettings {
    fn to_query(&self) -> Result<PositionQuery, ConfigError> {
        Ok(PositionQuery {
            currency: parse_currency("report.exposure.queries.currency", &self.currency)?,
            kind: self.kind.parse().map_err(|e| {
                ConfigError::ValidationError(format!("report.exposure.queries.kind: {e}"))
            })?,
        })
    }
}

fn parse_currency(field: &str, code: &str) -> Result<Currency, ConfigError> {
    Currency::new(code).map_err(|e| ConfigError::ValidationError(format!("{field}: {e}")))
}

/// Accept `[BTC, ETH]` or `"BTC,ETH"`.
fn currency_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_currencies() -> Vec<String> {
    vec!["BTC".to_string()]
}

fn default_kind() -> String {
    InstrumentKind::Option.as_str().to_string()
}
