use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use super::entry::{DefaultItemAdapter, directory_entry, image_entry};
use super::error::{Result, RunnerError};
use super::traits::{Context, HostPresentation, ItemAdapter, Provider};
use super::types::{CycleOutcome, Handle, ListEntry, NavigationResult, Payload, ResultOptions};
use crate::items::Item;
use crate::observability::Metrics;

pub const EXCEPTION_DIALOG_TITLE: &str = "Exception in ContentProvider";

/// Drives one provider invocation into host presentation calls
///
/// Every cycle ends with exactly one terminal call: `end_listing` or
/// `set_resolved_playback`.
pub struct ProviderRunner {
    host: Arc<dyn HostPresentation>,
    adapter: Arc<dyn ItemAdapter>,
    metrics: Arc<Metrics>,
}

impl ProviderRunner {
    pub fn new(host: Arc<dyn HostPresentation>) -> Self {
        Self {
            host,
            adapter: Arc::new(DefaultItemAdapter),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn with_adapter(mut self, adapter: Arc<dyn ItemAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub async fn run(&self, provider: &dyn Provider, context: &dyn Context) -> Result<CycleOutcome> {
        let cycle_id = Uuid::now_v7();
        let span = info_span!("cycle", %cycle_id);

        let result = self.run_cycle(provider, context).instrument(span).await;

        match &result {
            Ok(CycleOutcome::ProviderFailed) | Err(_) => self.metrics.cycle_failed(),
            Ok(_) => self.metrics.cycle_completed(),
        }
        result
    }

    async fn run_cycle(&self, provider: &dyn Provider, context: &dyn Context) -> Result<CycleOutcome> {
        let handle = context.handle();

        let NavigationResult { payload, options } = match provider.navigate(context).await {
            Ok(result) => result,
            Err(error) => {
                if provider.handle_exception(context, &error) {
                    let message = error.to_string();
                    context.log_error(&message);
                    context.ui().on_ok(EXCEPTION_DIALOG_TITLE, &message);
                }
                self.host.end_listing(handle, false, false, true);
                return Ok(CycleOutcome::ProviderFailed);
            }
        };

        for key in options.extra.keys() {
            warn!(option = %key, "Ignoring unknown result option");
        }

        let show_fanart = context.settings().show_fanart();

        match payload {
            Payload::False => {
                self.host.end_listing(handle, false, false, true);
                Ok(CycleOutcome::NotListed)
            }
            Payload::Single(item @ (Item::Video(_) | Item::Audio(_) | Item::Uri(_))) => {
                let mut entry = self.adapter.to_playback_item(context, &item);
                entry.set_path(item.uri());
                debug!(uri = item.uri(), "Resolving playback");
                self.host.set_resolved_playback(handle, entry);
                Ok(CycleOutcome::Resolved)
            }
            Payload::Single(Item::Directory(directory)) => {
                let (entry, is_folder) = directory_entry(&directory, show_fanart);
                // 0 leaves the total unknown to the host
                self.host
                    .add_list_entry(&handle, &directory.base.uri, entry, is_folder, 0);
                self.finish_listing(context, handle, &options);
                Ok(CycleOutcome::Listed { entries: 1 })
            }
            Payload::Single(Item::Image(image)) => {
                self.host.end_listing(handle, false, false, true);
                Err(RunnerError::MalformedPayload(format!(
                    "single image item '{}' cannot be listed",
                    image.base.name
                )))
            }
            Payload::Sequence(items) => {
                let entries = match self.build_entries(context, &items, show_fanart) {
                    Ok(entries) => entries,
                    Err(error) => {
                        self.host.end_listing(handle, false, false, true);
                        return Err(error);
                    }
                };

                let total = entries.len();
                for (url, entry, is_folder) in entries {
                    self.host.add_list_entry(&handle, &url, entry, is_folder, total);
                }
                self.finish_listing(context, handle, &options);
                Ok(CycleOutcome::Listed { entries: total })
            }
        }
    }

    /// Entries in payload order as `(url, entry, is_folder)`
    fn build_entries(
        &self,
        context: &dyn Context,
        items: &[Item],
        show_fanart: bool,
    ) -> Result<Vec<(String, ListEntry, bool)>> {
        items
            .iter()
            .map(|item| {
                let url = item.uri().to_string();
                let (mut entry, is_folder) = match item {
                    Item::Directory(directory) => directory_entry(directory, show_fanart),
                    Item::Image(image) => (image_entry(image, show_fanart), false),
                    Item::Video(video) => (self.adapter.to_video_item(context, video), false),
                    Item::Audio(audio) => (self.adapter.to_audio_item(context, audio), false),
                    Item::Uri(_) => {
                        return Err(RunnerError::MalformedPayload(format!(
                            "uri item '{url}' is not allowed in a listing"
                        )));
                    }
                };
                entry.set_path(url.clone());
                Ok((url, entry, is_folder))
            })
            .collect()
    }

    fn finish_listing(&self, context: &dyn Context, handle: Handle, options: &ResultOptions) {
        self.host
            .end_listing(handle, true, options.update_listing, options.cache_to_disc);

        if !context.settings().is_override_view_enabled() {
            return;
        }
        if let Some(view_id) = context.ui().view_mode() {
            context.log_debug(&format!("Override view mode to \"{view_id}\""));
            self.host.override_view(view_id);
        }
    }
}
