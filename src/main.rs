mod cache;
mod command;
mod commands;
mod config;
mod context;
mod error;
mod guild_config;
mod handler;
mod logging;
mod resolve;
mod router;
mod store;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let global = crate::config::GlobalConfig::load().await?;
    let token = global.discord_token.clone();

    let store = crate::store::FileStore::new(global.guild_data_dir()?);
    let cache = crate::cache::ConfigCache::new(Box::new(store));
    let registry =
        crate::command::CommandRegistry::new(commands::commands(), &global.excluded_commands);
    let handler = handler::Handler::new(global, cache, registry);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start_autosharded()
        .await
        .map_err(Into::into)
}
