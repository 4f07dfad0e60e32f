use crate::context::Context;
use anyhow::Result;
use serenity::all::{ChannelId, GuildId, UserId};
use std::collections::HashSet;

/// A fully-resolved command invocation, built once per message and discarded
/// after dispatch.
#[derive(Clone, Debug)]
pub struct ParsedCommand {
    pub author: UserId,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    /// The prefix the message actually matched.
    pub prefix: String,
    pub name: String,
    pub args: Vec<String>,
    /// Whether the author holds the bot-admin tier.
    pub is_admin: bool,
}

/// A registered command capability.
#[serenity::async_trait]
pub trait Command: Send + Sync {
    /// Name matched against the token following the prefix.  Unique within
    /// the registry.
    fn name(&self) -> &'static str;

    /// Help message line.  None if no help message
    fn usage(&self, prefix: &str) -> Option<String>;

    /// Execute the command.  Returns the reply body to send, if any; the
    /// gateway edge owns actually sending it.
    async fn invoke(&self, ctx: &Context<'_>, cmd: &ParsedCommand) -> Result<Option<String>>;
}

/// Ordered collection of commands, built once at startup and immutable
/// afterwards.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Keep the given commands in order, minus any name on the exclusion
    /// list.
    pub fn new(commands: Vec<Box<dyn Command>>, excluded: &HashSet<String>) -> Self {
        let commands = commands
            .into_iter()
            .filter(|c| !excluded.contains(c.name()))
            .collect();
        Self { commands }
    }

    /// Case-sensitive exact-name lookup.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub(&'static str);

    #[serenity::async_trait]
    impl Command for Stub {
        fn name(&self) -> &'static str {
            self.0
        }

        fn usage(&self, _prefix: &str) -> Option<String> {
            None
        }

        async fn invoke(
            &self,
            _ctx: &Context<'_>,
            _cmd: &ParsedCommand,
        ) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn registry(excluded: &[&str]) -> CommandRegistry {
        let excluded: HashSet<String> = excluded.iter().map(|s| s.to_string()).collect();
        CommandRegistry::new(
            vec![Box::new(Stub("ping")), Box::new(Stub("help"))],
            &excluded,
        )
    }

    #[test]
    fn finds_registered_commands_by_exact_name() {
        let registry = registry(&[]);
        assert!(registry.find("ping").is_some());
        assert!(registry.find("help").is_some());
        assert!(registry.find("frobnicate").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = registry(&[]);
        assert!(registry.find("Ping").is_none());
        assert!(registry.find("PING").is_none());
    }

    #[test]
    fn excluded_commands_are_not_registered() {
        let registry = registry(&["ping"]);
        assert!(registry.find("ping").is_none());
        assert!(registry.find("help").is_some());
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = registry(&[]);
        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["ping", "help"]);
    }
}
