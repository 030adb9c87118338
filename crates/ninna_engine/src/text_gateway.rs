//! Ordered-fallback gateway over the text drivers.

use crate::{STUB_PROVIDER, extract_json, parse_json, stub_story};
use ninna_core::{GenerateRequest, Language, StoryPayload};
use ninna_interface::StoryDriver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// What the gateway produced and how.
#[derive(Debug, Clone)]
pub struct StoryOutcome {
    /// A structurally complete payload, from a provider or the stub.
    pub payload: StoryPayload,
    /// Label of the provider that produced it.
    pub provider: String,
    /// True when the stub supplied the payload.
    pub degraded: bool,
    /// Fallback transitions taken, as (failed, tried-next) pairs.
    pub fallbacks: Vec<(String, String)>,
}

/// Walks an ordered driver list and falls through to the stub.
///
/// Total by construction: error, timeout, malformed JSON, and
/// structurally incomplete payloads all mean "next driver", and the
/// stub ends the line.
pub struct TextGateway {
    drivers: Vec<Arc<dyn StoryDriver>>,
    timeout: Duration,
}

impl TextGateway {
    /// Build a gateway over drivers in fallback order.
    pub fn new(drivers: Vec<Arc<dyn StoryDriver>>, timeout: Duration) -> Self {
        Self { drivers, timeout }
    }

    /// Generate a story payload, degrading to the stub when every
    /// driver fails.
    #[instrument(skip(self, request), fields(drivers = self.drivers.len()))]
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        language: Language,
        duration_minutes: u8,
    ) -> StoryOutcome {
        let mut fallbacks = Vec::new();

        for (index, driver) in self.drivers.iter().enumerate() {
            let provider = driver.provider_name();
            match self.try_driver(driver.as_ref(), request).await {
                Ok(payload) => {
                    debug!(provider, "Story payload produced");
                    return StoryOutcome {
                        payload,
                        provider: provider.to_string(),
                        degraded: false,
                        fallbacks,
                    };
                }
                Err(reason) => {
                    let next = self
                        .drivers
                        .get(index + 1)
                        .map(|d| d.provider_name())
                        .unwrap_or(STUB_PROVIDER);
                    warn!(provider, next, %reason, "Provider failed, falling back");
                    fallbacks.push((provider.to_string(), next.to_string()));
                }
            }
        }

        StoryOutcome {
            payload: stub_story(language, duration_minutes),
            provider: STUB_PROVIDER.to_string(),
            degraded: true,
            fallbacks,
        }
    }

    /// One bounded attempt: generate, extract, parse, validate.
    async fn try_driver(
        &self,
        driver: &dyn StoryDriver,
        request: &GenerateRequest,
    ) -> Result<StoryPayload, String> {
        let response = tokio::time::timeout(self.timeout, driver.generate(request))
            .await
            .map_err(|_| format!("timed out after {}ms", self.timeout.as_millis()))?
            .map_err(|e| e.to_string())?;

        let json = extract_json(&response.text).map_err(|e| e.to_string())?;
        let payload: StoryPayload = parse_json(&json).map_err(|e| e.to_string())?;

        if !payload.is_complete() {
            return Err("payload missing required sections".to_string());
        }
        Ok(payload)
    }
}
