use crate::model::ShardManagerContainer;
use serenity::builder::{CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("ping").description("Checks the bot's heartbeat latency.")
}

async fn latency_text(ctx: &Context) -> String {
    let data = ctx.data.read().await;
    let latency = match data.get::<ShardManagerContainer>() {
        Some(shard_manager) => {
            let runners = shard_manager.runners.lock().await;
            runners
                .get(&ctx.shard_id)
                .and_then(|runner| runner.latency)
                .map(|latency| format!("{} ms", latency.as_millis()))
        }
        None => None,
    };
    format!(
        "Pong! Heartbeat Latency: `{}`",
        latency.unwrap_or_else(|| "N/A".to_string())
    )
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let content = latency_text(ctx).await;
    let response =
        CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content));
    interaction.create_response(&ctx.http, response).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let content = latency_text(ctx).await;
    if let Err(why) = msg.channel_id.say(&ctx.http, content).await {
        tracing::warn!(target = "command", command = "ping", error = ?why, "reply failed");
    }
}
