//! Generate Report Use Case
//!
//! Authenticates, aggregates account summaries, resolves index prices,
//! reduces positions and calculates the report. Every call is awaited in
//! order and the first failure aborts the run.

use std::sync::Arc;

use chrono::Utc;

use super::error::ReportError;
use crate::application::ports::{AccessToken, ClientCredentials, ExchangePort};
use crate::application::services::PriceResolver;
use crate::domain::account::{AccountSummary, CurrencyBalance};
use crate::domain::exposure::{ExposureRule, InstrumentKind, OptionExposure, Position};
use crate::domain::report::{MarginScope, MetricsCalculator, RiskReport};
use crate::domain::shared::Currency;

/// One `(currency, kind)` position query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionQuery {
    /// Settlement currency to query.
    pub currency: Currency,
    /// Instrument kind filter.
    pub kind: InstrumentKind,
}

/// Exposure section of a report: which positions to fetch and how to reduce them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposurePlan {
    /// Reduction rule.
    pub rule: ExposureRule,
    /// Position queries whose results are concatenated before reduction.
    pub queries: Vec<PositionQuery>,
}

/// What a single run reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    /// Settlement currencies, in report order.
    pub currencies: Vec<Currency>,
    /// Maintenance margin aggregation.
    pub margin_scope: MarginScope,
    /// Option exposure, if any. `None` fetches no positions.
    pub exposure: Option<ExposurePlan>,
}

/// Use case for producing a [`RiskReport`] from live exchange state.
pub struct GenerateReportUseCase<E>
where
    E: ExchangePort,
{
    exchange: Arc<E>,
    credentials: ClientCredentials,
}

impl<E> GenerateReportUseCase<E>
where
    E: ExchangePort,
{
    /// Create a new GenerateReportUseCase.
    pub fn new(exchange: Arc<E>, credentials: ClientCredentials) -> Self {
        Self {
            exchange,
            credentials,
        }
    }

    /// Execute the use case.
    pub async fn execute(&self, plan: &ReportPlan) -> Result<RiskReport, ReportError> {
        let token = self
            .exchange
            .authenticate(&self.credentials)
            .await
            .map_err(ReportError::Auth)?;
        tracing::info!(expires_in_secs = ?token.expires_in_secs(), "Authenticated");

        let summaries = self.fetch_summaries(&token, &plan.currencies).await?;

        let mut prices = PriceResolver::new();
        let balances = self.convert(&summaries, &mut prices).await?;

        let option_exposure = match &plan.exposure {
            Some(exposure) => Some(self.reduce_exposure(&token, exposure, &mut prices).await?),
            None => None,
        };

        let report = MetricsCalculator::new(plan.margin_scope.clone()).calculate(
            balances,
            option_exposure,
            Utc::now(),
        )?;

        tracing::info!(
            total_nav_usd = %report.total_nav_usd,
            total_maint_margin_usd = %report.total_maint_margin_usd,
            margin_usage_pct = %report.margin_usage_pct,
            index_fetches = prices.fetch_count(),
            "Report calculated"
        );

        Ok(report)
    }

    async fn fetch_summaries(
        &self,
        token: &AccessToken,
        currencies: &[Currency],
    ) -> Result<Vec<AccountSummary>, ReportError> {
        let mut summaries = Vec::with_capacity(currencies.len());
        for currency in currencies {
            let summary = self
                .exchange
                .get_account_summary(token, currency)
                .await
                .map_err(ReportError::fetch(format!("account summary for {currency}")))?;
            tracing::info!(
                currency = %currency,
                equity = %summary.equity,
                maintenance_margin = %summary.maintenance_margin,
                usd_provided = !summary.needs_index_price(),
                "Fetched account summary"
            );
            summaries.push(summary);
        }
        Ok(summaries)
    }

    async fn convert(
        &self,
        summaries: &[AccountSummary],
        prices: &mut PriceResolver,
    ) -> Result<Vec<CurrencyBalance>, ReportError> {
        let mut balances = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let index_price = if summary.needs_index_price() {
                let price = prices
                    .resolve(self.exchange.as_ref(), &summary.currency)
                    .await
                    .map_err(ReportError::fetch(format!(
                        "index price {}",
                        summary.currency.usd_index_name()
                    )))?;
                Some(price)
            } else {
                None
            };
            balances.push(summary.to_usd(index_price)?);
        }
        Ok(balances)
    }

    async fn reduce_exposure(
        &self,
        token: &AccessToken,
        exposure: &ExposurePlan,
        prices: &mut PriceResolver,
    ) -> Result<OptionExposure, ReportError> {
        let mut positions: Vec<Position> = Vec::new();
        for query in &exposure.queries {
            let batch = self
                .exchange
                .get_positions(token, &query.currency, query.kind)
                .await
                .map_err(ReportError::fetch(format!(
                    "{} positions for {}",
                    query.kind, query.currency
                )))?;
            tracing::info!(
                currency = %query.currency,
                kind = %query.kind,
                count = batch.len(),
                "Fetched positions"
            );
            positions.extend(batch);
        }

        let index_price = match exposure.rule.index_currency() {
            Some(currency) => Some(
                prices
                    .resolve(self.exchange.as_ref(), currency)
                    .await
                    .map_err(ReportError::fetch(format!(
                        "index price {}",
                        currency.usd_index_name()
                    )))?,
            ),
            None => None,
        };

        let reduced = exposure.rule.reduce(&positions, index_price)?;
        tracing::info!(
            underlying = reduced.underlying(),
            positions = reduced.position_count(),
            "Reduced option exposure"
        );
        Ok(reduced)
    }
}
