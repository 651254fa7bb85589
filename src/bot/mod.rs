pub mod commands;
pub mod dispatch;
pub mod handlers;

use crate::calendar::{Calendar, CalendarSource};
use crate::config::Config;
use anyhow::Result;
use dispatch::ReplySettings;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[derive(Clone)]
pub struct Data {
    pub calendar: Arc<dyn CalendarSource>,
    pub settings: ReplySettings,
}

impl Data {
    pub fn new(calendar: Arc<dyn CalendarSource>, config: &Config) -> Self {
        Self {
            calendar,
            settings: ReplySettings {
                time_style: config.time_style,
                season_label: config.season_label.clone(),
            },
        }
    }
}

pub async fn create_bot(config: Config) -> Result<serenity::Client> {
    let calendar = Calendar::load(&config.races_file, config.source_offset)?;
    let data = Data::new(Arc::new(calendar), &config);

    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(handlers::on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    tracing::info!(
                        "Received /{} from {}",
                        ctx.command().qualified_name,
                        ctx.author().name
                    );
                })
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                // Registration failure leaves the commands unregistered but keeps the bot online.
                tracing::info!("Registering commands...");
                match poise::builtins::register_globally(ctx, &framework.options().commands).await {
                    Ok(()) => tracing::info!("Commands registered"),
                    Err(e) => tracing::error!("Failed to register commands: {:?}", e),
                }
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    if let Some(client_id) = config.client_id {
        client
            .http
            .set_application_id(serenity::ApplicationId::new(client_id));
    }

    Ok(client)
}
