//! CLI route: build the engine services and dispatch commands.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::booking::{BookingQueue, BookingRequest, HttpBookingTransport};
use crate::cli::output;
use crate::cli::parse::{BookingCommands, CmsCommands, Commands, ContextCommands};
use crate::cms::ContentStore;
use crate::config::{BaizeConfig, ConfigLoader};
use crate::context::coherence::classify_engagement;
use crate::context::recommend::recommendations;
use crate::context::{ContextAction, ContextStore, PageVisit, SnapshotStore};
use crate::error::EngineError;
use crate::perf::PerfMonitor;
use crate::scoring::{default_modules, rank, ContentModule};
use crate::storage::open_db;
use crate::telemetry::now_millis;

/// Everything a command needs, wired once per invocation.
pub struct RunContext {
    config: BaizeConfig,
    snapshots: Arc<SnapshotStore>,
    store: ContextStore,
    content: ContentStore,
    queue: BookingQueue,
    perf: Arc<PerfMonitor>,
}

impl RunContext {
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, EngineError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)
                .map_err(|e| EngineError::ConfigError(e.to_string()))?,
            None => ConfigLoader::load(&workspace)
                .map_err(|e| EngineError::ConfigError(e.to_string()))?,
        };
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            EngineError::ConfigError(msgs.join("; "))
        })?;

        let data_path = workspace.join(&config.system.storage.data_path);
        let db = open_db(&data_path)?;
        debug!("Opened data directory {:?}", data_path);

        let snapshots = Arc::new(SnapshotStore::new(&db)?);
        let store = ContextStore::open(snapshots.clone());
        let content = ContentStore::open(&db)?;
        let perf = Arc::new(PerfMonitor::new(config.system.perf_samples));
        let transport = Arc::new(HttpBookingTransport::new(config.booking.endpoint.clone()));
        let queue = BookingQueue::new(&db, transport, perf.clone())?;

        Ok(Self {
            config,
            snapshots,
            store,
            content,
            queue,
            perf,
        })
    }

    /// Loaded configuration (for the binary's logging bootstrap).
    pub fn config(&self) -> &BaizeConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, EngineError> {
        match command {
            Commands::Context { command } => self.execute_context(command),
            Commands::Rank { modules, format } => self.execute_rank(modules.as_deref(), format),
            Commands::Cms { command } => self.execute_cms(command),
            Commands::Booking { command } => self.execute_booking(command).await,
        }
    }

    fn execute_context(&self, command: &ContextCommands) -> Result<String, EngineError> {
        match command {
            ContextCommands::Show { format } => {
                let state = self.store.state();
                if format == "json" {
                    output::format_context_json(&state)
                } else {
                    Ok(output::format_context_text(&state))
                }
            }
            ContextCommands::Visit { page, duration_ms } => {
                let state = self.store.dispatch(ContextAction::AddPageVisit(PageVisit {
                    page: page.clone(),
                    timestamp_ms: now_millis(),
                    duration_ms: *duration_ms,
                }));
                let engagement =
                    classify_engagement(state.visit_count(), state.cells.session_duration_ms);
                let state = self
                    .store
                    .dispatch(ContextAction::UpdateEngagement(engagement));
                Ok(format!(
                    "Recorded visit to '{}' ({} visits, engagement {})",
                    page,
                    state.visit_count(),
                    state.cells.engagement
                ))
            }
            ContextCommands::Interests { interests } => {
                let state = self
                    .store
                    .dispatch(ContextAction::UpdateInterests(interests.clone()));
                Ok(format!(
                    "Interests set: {}",
                    if state.molecules.interests.is_empty() {
                        "(none)".to_string()
                    } else {
                        state.molecules.interests.join(", ")
                    }
                ))
            }
            ContextCommands::Engagement { level } => {
                let state = self.store.dispatch(ContextAction::UpdateEngagement(*level));
                Ok(format!(
                    "Engagement set to {} (layout {})",
                    state.cells.engagement, state.organs.layout
                ))
            }
            ContextCommands::Journey { stage } => {
                let state = self.store.dispatch(ContextAction::UpdateJourney(*stage));
                Ok(format!("Journey stage set to {}", state.fields.journey))
            }
            ContextCommands::Resonance { value } => {
                let state = self.store.dispatch(ContextAction::UpdateResonance(*value));
                Ok(format!("Resonance set to {:.2}", state.fields.resonance))
            }
            ContextCommands::Recommend => {
                let state = self.store.state();
                let recs = recommendations(state.fields.journey, &state.molecules.interests);
                let state = self
                    .store
                    .dispatch(ContextAction::SetRecommendations(recs));
                let mut out = String::from("Recommendations:\n");
                for rec in &state.organs.recommendations {
                    out.push_str(&format!("  - {}\n", rec));
                }
                Ok(out)
            }
            ContextCommands::Reset => {
                self.snapshots.clear()?;
                Ok("Context snapshot cleared; defaults apply on next run.".to_string())
            }
        }
    }

    fn execute_rank(
        &self,
        manifest: Option<&std::path::Path>,
        format: &str,
    ) -> Result<String, EngineError> {
        let modules: Vec<ContentModule> = match manifest {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    EngineError::InvalidInput(format!("cannot read manifest {:?}: {}", path, e))
                })?;
                serde_json::from_str(&raw).map_err(|e| {
                    EngineError::InvalidContent(format!("manifest parse failed: {}", e))
                })?
            }
            None => default_modules(),
        };

        let ranked = rank(&modules, &self.store.state());
        if format == "json" {
            serde_json::to_string_pretty(&ranked)
                .map_err(|e| EngineError::InvalidContent(e.to_string()))
        } else {
            Ok(output::format_ranked_table(&ranked))
        }
    }

    fn execute_cms(&self, command: &CmsCommands) -> Result<String, EngineError> {
        match command {
            CmsCommands::Get { key } => {
                let entry = self
                    .content
                    .get(key)?
                    .ok_or_else(|| EngineError::UnknownContentKey(key.clone()))?;
                serde_json::to_string_pretty(&entry)
                    .map_err(|e| EngineError::InvalidContent(e.to_string()))
            }
            CmsCommands::Set { key, value } => {
                let entry = self.content.set(key, value.clone())?;
                Ok(format!("Updated '{}' ({})", entry.key, entry.kind))
            }
            CmsCommands::List { category } => {
                let mut entries = self.content.list()?;
                if let Some(category) = category {
                    entries.retain(|e| &e.category == category);
                }
                Ok(output::format_content_table(&entries))
            }
            CmsCommands::Export { output: target } => {
                let json = self.content.export()?;
                match target {
                    Some(path) => {
                        std::fs::write(path, &json).map_err(|e| {
                            EngineError::InvalidInput(format!(
                                "cannot write export to {:?}: {}",
                                path, e
                            ))
                        })?;
                        Ok(format!("Exported content to {:?}", path))
                    }
                    None => Ok(json),
                }
            }
            CmsCommands::Import { input } => {
                let raw = std::fs::read_to_string(input).map_err(|e| {
                    EngineError::InvalidInput(format!("cannot read {:?}: {}", input, e))
                })?;
                let count = self.content.import(&raw)?;
                Ok(format!("Imported {} content entries", count))
            }
            CmsCommands::Reset { key } => {
                let count = self.content.reset(key.as_deref())?;
                Ok(format!("Reset {} content entries", count))
            }
        }
    }

    async fn execute_booking(&self, command: &BookingCommands) -> Result<String, EngineError> {
        match command {
            BookingCommands::Submit {
                name,
                phone,
                date,
                time,
                store,
                coach,
                message,
            } => {
                let request = BookingRequest {
                    name: name.clone(),
                    phone: phone.clone(),
                    date: date.clone(),
                    time: time.clone(),
                    store_id: store.clone(),
                    coach_id: coach.clone(),
                    message: message.clone(),
                };
                let outcome = self.queue.submit(request).await?;
                if outcome.offline {
                    Ok(format!(
                        "Delivery unavailable; booking {} queued for sync.",
                        outcome.id
                    ))
                } else {
                    Ok(format!("Booking {} delivered.", outcome.id))
                }
            }
            BookingCommands::Sync => {
                let report = self.queue.sync().await?;
                Ok(output::format_sync_report(&report, &self.perf.report()))
            }
            BookingCommands::Pending => {
                let pending = self.queue.pending()?;
                Ok(output::format_pending_table(&pending))
            }
        }
    }
}
