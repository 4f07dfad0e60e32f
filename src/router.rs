use crate::command::ParsedCommand;
use crate::context::Context;
use crate::error::CoreError;
use crate::logging::{Glue, PrintColor};
use crate::resolve::PrefixResolver;
use crate::{log_event, log_internal};
use serenity::all::{ChannelId, GuildId, UserId};

/// Inbound message event, decoupled from the gateway transport's own message
/// type.  One router invocation per event; events from different shards are
/// independent invocations.
#[derive(Clone, Debug)]
pub struct MessageEvent {
    pub author: UserId,
    pub author_is_bot: bool,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub content: String,
}

/// Why a message terminated without reaching dispatch.
#[derive(Debug)]
pub enum RejectReason {
    /// Messages from other bots are never commands.
    BotAuthor,
    /// Blacklisted author.  Silent: no reply reveals blacklist membership.
    AccessDenied,
    /// Ordinary chat; the message does not start with the effective prefix.
    NotACommand,
    /// The guild's configuration could not be loaded, so the message is
    /// treated as non-actionable.
    Persistence(CoreError),
}

/// Terminal state of the per-message dispatch machine.
#[derive(Debug)]
pub enum Outcome {
    Rejected(RejectReason),
    /// Prefixed message naming no registered command.
    Unmatched { name: String },
    /// Exactly one handler ran to completion.
    Dispatched {
        name: &'static str,
        reply: Option<String>,
    },
    /// The handler returned an error; caught here, never propagated.
    Failed {
        name: &'static str,
        error: anyhow::Error,
    },
}

/// Drive one message through access check, prefix resolution, tokenization,
/// registry match, and dispatch.  At most one command is invoked, at most
/// once, whatever the outcome.
pub async fn handle_message(ctx: &Context<'_>, event: &MessageEvent) -> Outcome {
    if event.author_is_bot {
        return Outcome::Rejected(RejectReason::BotAuthor);
    }
    if ctx.global.is_blacklisted(event.author) {
        return Outcome::Rejected(RejectReason::AccessDenied);
    }

    let resolver = PrefixResolver::new(ctx.global, ctx.cache);
    let prefix = match resolver.resolve(event.guild_id).await {
        Ok(prefix) => prefix,
        Err(err) => {
            log_internal!(
                "Ignoring message from {} in {}: {}",
                event.author.color(),
                event.guild_id.color(),
                err,
            );
            return Outcome::Rejected(RejectReason::Persistence(err));
        }
    };

    let Some(rest) = event.content.strip_prefix(prefix.as_str()) else {
        return Outcome::Rejected(RejectReason::NotACommand);
    };

    let mut tokens = rest.split_whitespace();
    // A bare prefix with no command token is ordinary chat.
    let Some(name) = tokens.next() else {
        return Outcome::Rejected(RejectReason::NotACommand);
    };
    let args: Vec<String> = tokens.map(str::to_string).collect();

    let Some(command) = ctx.registry.find(name) else {
        return Outcome::Unmatched {
            name: name.to_string(),
        };
    };

    let parsed = ParsedCommand {
        author: event.author,
        guild_id: event.guild_id,
        channel_id: event.channel_id,
        prefix,
        name: name.to_string(),
        args,
        is_admin: ctx.global.is_admin(event.author),
    };

    log_event!(
        "{}{}{}{}{} invoked `{}`",
        event.guild_id.color(),
        Glue.color(),
        event.channel_id.color(),
        Glue.color(),
        event.author.color(),
        parsed.name,
    );

    match command.invoke(ctx, &parsed).await {
        Ok(reply) => Outcome::Dispatched {
            name: command.name(),
            reply,
        },
        Err(error) => Outcome::Failed {
            name: command.name(),
            error,
        },
    }
}
