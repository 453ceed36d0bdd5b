// Background name generation

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::NameGenerator;
use crate::events::AppEvent;

/// Run one generation on a tokio task and report the outcome on `event_tx`.
///
/// The request itself runs in a nested task so that a panic inside the
/// generator still produces an event instead of leaving the UI loading forever.
pub fn spawn_generation(
    generator: Arc<dyn NameGenerator>,
    category: String,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(category = %category, "Generating names");

        let request = {
            let category = category.clone();
            tokio::spawn(async move { generator.generate_names(&category).await })
        };

        let event = match request.await {
            Ok(Ok(names)) => {
                info!(category = %category, count = names.len(), "Names generated");
                AppEvent::NamesGenerated(names)
            }
            Ok(Err(e)) => {
                error!(category = %category, error = %e, "Error generating names");
                AppEvent::GenerationFailed(e.to_string())
            }
            Err(e) => {
                error!(category = %category, error = %e, "Name generation task did not complete");
                AppEvent::GenerationAborted
            }
        };

        let _ = event_tx.send(event);
    })
}
