//! Provider fan-out
//!
//! Queries every provider concurrently, waits for all of them to settle
//! and merges the outcomes into one aggregate payload

use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::task;
use tracing::{info, warn};

use crate::models::{AggregateData, GenerationParams, OdaiData, ProviderErrors, ProviderId};
use crate::services::OdaiGenerator;
use crate::utils::error::GenerationError;

/// Message recorded when a provider task dies instead of settling
const TASK_FAILED: &str = "Request failed";

/// Merged result of querying all providers
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Per-provider odai lists (empty for failed providers)
    pub data: AggregateData,
    /// Failure messages for the providers that failed
    pub errors: ProviderErrors,
}

impl AggregateOutcome {
    /// True when every provider failed
    ///
    /// A successful provider always contributes at least one odai, so a
    /// zero total means all three settled with an error.
    pub fn all_failed(&self) -> bool {
        self.data.total_count == 0
    }
}

/// Run `run` for every provider and wait for all of them
///
/// Each provider gets its own task, so one failure or panic never
/// cancels the others. Settled errors keep their display message; a
/// panicked task settles as [`TASK_FAILED`].
pub async fn settle_all<F, Fut>(run: F) -> Vec<(ProviderId, Result<OdaiData, String>)>
where
    F: Fn(ProviderId) -> Fut,
    Fut: Future<Output = Result<OdaiData, GenerationError>> + Send + 'static,
{
    let tasks: Vec<_> = ProviderId::ALL
        .iter()
        .map(|&provider| task::spawn(run(provider)))
        .collect();

    let settled = join_all(tasks).await;

    ProviderId::ALL
        .iter()
        .zip(settled)
        .map(|(&provider, joined)| {
            let outcome = match joined {
                Ok(result) => result.map_err(|error| error.to_string()),
                Err(join_error) => {
                    warn!("{} task did not settle: {}", provider, join_error);
                    Err(TASK_FAILED.to_string())
                }
            };
            (provider, outcome)
        })
        .collect()
}

/// Query all providers concurrently and merge their odai
pub async fn generate_all(
    generator: Arc<OdaiGenerator>,
    params: GenerationParams,
) -> AggregateOutcome {
    let settled = settle_all(move |provider| {
        let generator = Arc::clone(&generator);
        let params = params.clone();
        async move { generator.generate(provider, &params).await }
    })
    .await;

    let mut outcome = AggregateOutcome::default();
    for (provider, result) in settled {
        match result {
            Ok(data) => {
                outcome.data.total_count += data.odais.len();
                *outcome.data.slot_mut(provider) = data.odais;
            }
            Err(message) => {
                outcome.errors.insert(provider, message);
            }
        }
    }

    info!(
        "Aggregate generation produced {} odai, {} provider(s) failed",
        outcome.data.total_count,
        outcome.errors.len()
    );

    outcome
}
