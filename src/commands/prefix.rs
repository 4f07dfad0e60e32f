use crate::command::{Command, ParsedCommand};
use crate::context::Context;
use crate::error::CoreError;
use crate::log_internal;
use crate::logging::PrintColor;
use anyhow::Result;

/// Show or change a guild's command prefix override.
pub struct Prefix;

#[serenity::async_trait]
impl Command for Prefix {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn usage(&self, prefix: &str) -> Option<String> {
        Some(format!(
            "{}{} [new|reset] - show or change this server's command prefix (changing is bot-admin only)",
            prefix,
            self.name()
        ))
    }

    async fn invoke(&self, ctx: &Context<'_>, cmd: &ParsedCommand) -> Result<Option<String>> {
        let Some(guild_id) = cmd.guild_id else {
            return Ok(Some("This command only works in a server.".to_string()));
        };

        let Some(requested) = cmd.args.first() else {
            return Ok(Some(format!("The command prefix here is `{}`", cmd.prefix)));
        };

        if !cmd.is_admin {
            return Ok(Some(
                "Only a bot admin can change the prefix.".to_string(),
            ));
        }

        let current = ctx.cache.get(guild_id).await?;
        let mut updated = (*current).clone();
        updated.prefix = if requested.as_str() == "reset" {
            String::new()
        } else {
            requested.clone()
        };

        match ctx.cache.save(updated).await {
            Ok(saved) => Ok(Some(match saved.prefix_override() {
                Some(prefix) => format!("Prefix set to `{}`", prefix),
                None => format!(
                    "Prefix reset to the default `{}`",
                    ctx.global.default_prefix
                ),
            })),
            // The cache already holds the new prefix; it applies for the
            // rest of this session even though the store rejected it.
            Err(err @ CoreError::PersistenceUnavailable(_)) => {
                log_internal!(
                    "Could not persist prefix for {}: {}",
                    guild_id.color(),
                    err,
                );
                Ok(Some(
                    "Prefix changed, but could not be persisted; it may revert after a restart."
                        .to_string(),
                ))
            }
            Err(err) => Err(err.into()),
        }
    }
}
