use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::config::FixerConfig;
use crate::core::{CurrencyRate, CurrencySource, RateError};

pub const SERVICE_NAME: &str = "fixer.io";

/// Latest rates endpoint of fixer.io for a fixed base and set of symbols.
pub struct FixerSource {
    url_rate: String,
}

impl FixerSource {
    /// Inputs are interpolated as given, without escaping.
    pub fn new(key: &str, base_url: &str, base: &str, reference: &str) -> Self {
        let url_rate =
            format!("{base_url}/api/latest?access_key={key}&base={base}&symbols={reference}");
        FixerSource { url_rate }
    }

    pub fn from_config(config: &FixerConfig, base: &str, reference: &str) -> Self {
        Self::new(&config.api_key, &config.base_url, base, reference)
    }

    pub fn url(&self) -> &str {
        &self.url_rate
    }
}

// Missing or null fields decode to empty values.
#[derive(Debug, Default, Deserialize)]
struct FixerResponse {
    #[serde(default)]
    base: Option<String>,
    #[serde(default, deserialize_with = "deserialize_rates")]
    rates: HashMap<String, f32>,
}

fn deserialize_rates<'de, D>(deserializer: D) -> Result<HashMap<String, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let rates = Option::<HashMap<String, f64>>::deserialize(deserializer)?.unwrap_or_default();
    rates
        .into_iter()
        .map(|(symbol, rate)| {
            let narrowed = rate as f32;
            if narrowed.is_finite() {
                Ok((symbol, narrowed))
            } else {
                Err(<D::Error as serde::de::Error>::custom(format!(
                    "cannot unmarshal number {rate:e} into float32 rate for {symbol}"
                )))
            }
        })
        .collect()
}

/// Decodes the first JSON value of `body`; anything after it is ignored.
fn decode_response(body: &[u8]) -> Result<FixerResponse, RateError> {
    let mut values =
        serde_json::Deserializer::from_slice(body).into_iter::<Option<FixerResponse>>();
    match values.next() {
        Some(value) => value
            .map(Option::unwrap_or_default)
            .map_err(|e| RateError::InvalidResponse(e.to_string())),
        None => Err(RateError::InvalidResponse("empty body".to_string())),
    }
}

#[async_trait]
impl CurrencySource for FixerSource {
    #[instrument(name = "FixerRateFetch", skip(self), fields(service = SERVICE_NAME))]
    async fn get_rate(&self) -> Result<CurrencyRate, RateError> {
        let client = reqwest::Client::builder()
            .user_agent("gurrency/0.1")
            .build()
            .map_err(RateError::ServiceUnavailable)?;

        let response = client
            .get(&self.url_rate)
            .send()
            .await
            .map_err(RateError::ServiceUnavailable)?;

        debug!(status = %response.status(), "Received fixer.io response");

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RateError::BadResponse(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RateError::InvalidResponse(e.to_string()))?;
        let data = decode_response(&body)?;

        Ok(CurrencyRate {
            service_name: SERVICE_NAME.to_string(),
            base: data.base.unwrap_or_default(),
            reference: data.rates,
        })
    }
}
