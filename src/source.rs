use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::Write;
use tracing::debug;

use crate::core::{CurrencyRate, CurrencySource};

/// Generalized source that owns a concrete provider.
pub struct Source {
    src: Box<dyn CurrencySource>,
}

impl Source {
    pub fn new<S: CurrencySource + 'static>(src: S) -> Self {
        Source { src: Box::new(src) }
    }

    /// Fetches the rates once and writes the formatted block to `out`.
    /// Nothing is written when the provider fails.
    pub async fn write_rate<W: Write + Send>(&self, out: &mut W) -> Result<()> {
        let rates = self.src.get_rate().await?;
        debug!(
            service = %rates.service_name,
            count = rates.reference.len(),
            "Fetched rates"
        );

        // One write per block keeps concurrent sources from interleaving.
        out.write_all(format_rate(&rates).as_bytes())
            .and_then(|_| out.flush())
            .context("Failed to write rates")
    }

    pub async fn print_rate(&self) -> Result<()> {
        let mut buf = Vec::new();
        self.write_rate(&mut buf).await?;
        std::io::stdout()
            .lock()
            .write_all(&buf)
            .context("Failed to write rates to stdout")
    }
}

/// Renders a rate block, one `<base>/<symbol>` line per reference currency.
pub fn format_rate(rates: &CurrencyRate) -> String {
    let mut out = format!("Service Name: {}\n", rates.service_name);
    for (symbol, rate) in &rates.reference {
        let _ = writeln!(out, "{}/{}: {:.2}", rates.base, symbol, rate);
    }
    out
}
