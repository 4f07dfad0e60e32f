use crate::command::{Command, ParsedCommand};
use crate::context::Context;
use anyhow::Result;

pub struct Help;

#[serenity::async_trait]
impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self, prefix: &str) -> Option<String> {
        Some(format!(
            "{}{} - show this help message",
            prefix,
            self.name()
        ))
    }

    async fn invoke(&self, ctx: &Context<'_>, cmd: &ParsedCommand) -> Result<Option<String>> {
        // Usage lines carry the prefix the message actually matched, so a
        // guild with an override sees its own prefix here.
        let mut reply = String::new();
        reply.push_str("```\n");
        reply.push_str("Commands:\n");
        for command in ctx.registry.iter() {
            if let Some(usage) = command.usage(&cmd.prefix) {
                reply.push_str(&usage);
                reply.push('\n');
            }
        }
        reply.push_str("```\n");

        Ok(Some(reply))
    }
}
