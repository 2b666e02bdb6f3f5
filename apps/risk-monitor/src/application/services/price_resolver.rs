//! Price Resolver
//!
//! Resolves USD index prices with a memo that lives for one run, so the
//! account conversion and the exposure valuation share a single fetch.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::application::ports::{ExchangeError, ExchangePort};
use crate::domain::shared::Currency;

/// Run-scoped index price cache.
#[derive(Debug, Default)]
pub struct PriceResolver {
    prices: HashMap<Currency, Decimal>,
    fetches: usize,
}

impl PriceResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the USD index price of `currency`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the exchange error from the first fetch.
    pub async fn resolve<E>(
        &mut self,
        exchange: &E,
        currency: &Currency,
    ) -> Result<Decimal, ExchangeError>
    where
        E: ExchangePort + ?Sized,
    {
        if let Some(price) = self.prices.get(currency) {
            tracing::debug!(currency = %currency, price = %price, "Index price from run cache");
            return Ok(*price);
        }

        let index = exchange.get_index_price(currency).await?;
        self.fetches += 1;
        tracing::info!(
            currency = %currency,
            index_name = %currency.usd_index_name(),
            price_usd = %index.price_usd,
            "Resolved index price"
        );
        self.prices.insert(currency.clone(), index.price_usd);
        Ok(index.price_usd)
    }

    /// Number of index prices fetched from the exchange so far.
    #[must_use]
    pub const fn fetch_count(&self) -> usize {
        self.fetches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AccessToken, ClientCredentials};
    use crate::domain::account::{AccountSummary, IndexPrice};
    use crate::domain::exposure::{InstrumentKind, Position};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingExchange {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExchangePort for CountingExchange {
        async fn authenticate(
            &self,
            _credentials: &ClientCredentials,
        ) -> Result<AccessToken, ExchangeError> {
            unreachable!()
        }

        async fn get_account_summary(
            &self,
            _token: &AccessToken,
            _currency: &Currency,
        ) -> Result<AccountSummary, ExchangeError> {
            unreachable!()
        }

        async fn get_index_price(&self, currency: &Currency) -> Result<IndexPrice, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match currency.as_str() {
                "BTC" => Ok(IndexPrice::new(currency.clone(), dec!(50000))),
                "USDC" => Ok(IndexPrice::new(currency.clone(), dec!(0.9998))),
                other => Err(ExchangeError::Request {
                    message: format!("unknown index {other}"),
                }),
            }
        }

        async fn get_positions(
            &self,
            _token: &AccessToken,
            _currency: &Currency,
            _kind: InstrumentKind,
        ) -> Result<Vec<Position>, ExchangeError> {
            unreachable!()
        }
    }

    fn exchange() -> CountingExchange {
        CountingExchange {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn fetches_each_index_once() {
        let exchange = exchange();
        let mut resolver = PriceResolver::new();
        let btc = Currency::new("BTC").unwrap();

        assert_eq!(resolver.resolve(&exchange, &btc).await.unwrap(), dec!(50000));
        assert_eq!(resolver.resolve(&exchange, &btc).await.unwrap(), dec!(50000));

        assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.fetch_count(), 1);
    }

    #[tokio::test]
    async fn stablecoin_uses_its_own_index() {
        let exchange = exchange();
        let mut resolver = PriceResolver::new();
        let usdc = Currency::new("USDC").unwrap();

        let price = resolver.resolve(&exchange, &usdc).await.unwrap();
        assert_eq!(price, dec!(0.9998));
    }

    #[tokio::test]
    async fn failure_is_not_cached() {
        let exchange = exchange();
        let mut resolver = PriceResolver::new();
        let sol = Currency::new("SOL").unwrap();

        assert!(resolver.resolve(&exchange, &sol).await.is_err());
        assert!(resolver.resolve(&exchange, &sol).await.is_err());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.fetch_count(), 0);
    }
}
