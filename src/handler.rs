use crate::{
    cache::ConfigCache,
    command::CommandRegistry,
    config::GlobalConfig,
    context::Context,
    error::CoreError,
    log_event, log_internal,
    logging::PrintColor,
    router::{self, MessageEvent, Outcome, RejectReason},
};
use serenity::all::{Guild, Message, Ready};

/// Discord event handler: owns the process-wide state and translates gateway
/// callbacks into router invocations.
pub struct Handler {
    global: GlobalConfig,
    cache: ConfigCache,
    registry: CommandRegistry,
}

impl Handler {
    pub fn new(global: GlobalConfig, cache: ConfigCache, registry: CommandRegistry) -> Self {
        Self {
            global,
            cache,
            registry,
        }
    }

    fn ctx(&self) -> Context<'_> {
        Context {
            global: &self.global,
            cache: &self.cache,
            registry: &self.registry,
        }
    }

    /// Send a reply, logging rather than propagating a send failure.
    async fn reply_best_effort(&self, discord_ctx: &serenity::all::Context, msg: &Message, text: &str) {
        if let Err(err) = msg.reply(discord_ctx, text).await {
            log_internal!(
                "Could not reply in {}: {}",
                msg.channel_id.color(),
                err,
            );
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, _discord_ctx: serenity::all::Context, ready: Ready) {
        log_event!(
            "Connected as {} to {} guild(s)",
            ready.user.name,
            ready.guilds.len(),
        );
    }

    async fn guild_create(
        &self,
        _discord_ctx: serenity::all::Context,
        guild: Guild,
        _is_new: Option<bool>,
    ) {
        // Warm the cache as guilds come into view so the first command in a
        // guild does not pay the fetch.
        match self.ctx().cache.get(guild.id).await {
            Ok(_) => log_internal!("Loaded configuration for {}", guild.id.color()),
            Err(err) => log_internal!(
                "Could not load configuration for {}: {}",
                guild.id.color(),
                err,
            ),
        }
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        let event = MessageEvent {
            author: msg.author.id,
            author_is_bot: msg.author.bot,
            guild_id: msg.guild_id,
            channel_id: msg.channel_id,
            content: msg.content.clone(),
        };

        match router::handle_message(&self.ctx(), &event).await {
            Outcome::Rejected(RejectReason::AccessDenied) => {
                // No reply: a notice would reveal blacklist membership.
                log_internal!(
                    "Dropped message from {}: {}",
                    msg.author.id.color(),
                    CoreError::AccessDenied,
                );
            }
            // Ordinary chat, bots, unreachable store: nothing to send.  The
            // router already logged the store outage.
            Outcome::Rejected(_) => {}
            Outcome::Unmatched { name } => {
                let notice = CoreError::CommandNotFound(name).to_string();
                self.reply_best_effort(&discord_ctx, &msg, &notice).await;
            }
            Outcome::Dispatched { reply, .. } => {
                if let Some(reply) = reply {
                    self.reply_best_effort(&discord_ctx, &msg, &reply).await;
                }
            }
            Outcome::Failed { name, error } => {
                let failure = CoreError::CommandExecutionFailed {
                    name: name.to_string(),
                    cause: error,
                };
                log_internal!("{}", failure);
                self.reply_best_effort(&discord_ctx, &msg, &failure.to_string())
                    .await;
            }
        }
    }
}
