use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use announcer::core::{Config, Settings};
use announcer::features::calendar::{Classifier, EventSource, GoogleCalendarSource};
use announcer::features::get_bot_version;
use announcer::features::notify::{Announcer, ChannelDirectory, DiscordSink};
use announcer::features::reminders::{EventStore, Reconciler, ReminderPolicy, ReminderScheduler};

struct Handler {
    config: Config,
    settings: Settings,
    source: Arc<dyn EventSource>,
    reconciler_started: AtomicBool,
}

impl Handler {
    fn new(config: Config, settings: Settings, source: Arc<dyn EventSource>) -> Self {
        Handler {
            config,
            settings,
            source,
            reconciler_started: AtomicBool::new(false),
        }
    }

    /// Wire the reminder pipeline onto the connected client's HTTP handle
    fn start_reconciler(&self, ctx: &Context) {
        let directory = ChannelDirectory::new(self.settings.channels.clone());
        if directory.is_empty() {
            error!("❌ No channels configured in {}, announcements will be skipped", self.config.settings_path);
        }

        let sink = Arc::new(DiscordSink::new(ctx.http.clone(), directory));
        let lead_time = self.config.lead_time();
        let announcer = Arc::new(Announcer::new(sink, lead_time, &self.settings));

        let store = EventStore::shared();
        let scheduler = ReminderScheduler::new(store.clone(), announcer, lead_time);
        let policy = ReminderPolicy::new(lead_time, self.config.reconcile_interval());
        let reconciler = Reconciler::new(self.source.clone(), store, scheduler, policy);

        tokio::spawn(reconciler.run());
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        // Gateway reconnects fire ready again; only the first one starts the loop
        if self.reconciler_started.swap(true, Ordering::SeqCst) {
            info!("Reconnected, calendar reconciler already running");
            return;
        }
        self.start_reconciler(&ctx);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting announcer v{}...", get_bot_version());

    let settings = Settings::load(&config.settings_path).map_err(|e| {
        error!("❌ Failed to load settings from {}: {e}", config.settings_path);
        e
    })?;
    info!(
        "📄 {} channels, {} classification rules, {} reference zones",
        settings.channels.len(),
        settings.classifications.len(),
        settings.reference_zones.len()
    );

    let classifier = Classifier::new(settings.classifications.clone());
    let source: Arc<dyn EventSource> = Arc::new(GoogleCalendarSource::new(
        &config.calendar_id,
        &config.google_api_key,
        config.max_results,
        config.fetch_timeout(),
        classifier,
    )?);

    let intents = GatewayIntents::GUILDS;
    let token = config.discord_token.clone();
    let handler = Handler::new(config, settings, source);

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
