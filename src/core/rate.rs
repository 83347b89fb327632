//! Currency rate abstractions

use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::error::RateError;

/// Latest rates returned by a single provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRate {
    /// Name of the service that provided the rates.
    pub service_name: String,
    /// Currency all reference rates are expressed against.
    pub base: String,
    /// Rate per reference currency code.
    pub reference: HashMap<String, f32>,
}

/// A concrete rate provider.
#[async_trait]
pub trait CurrencySource: Send + Sync {
    async fn get_rate(&self) -> Result<CurrencyRate, RateError>;
}
