use crate::command::{Command, ParsedCommand};
use crate::context::Context;
use anyhow::Result;

pub struct Ping;

#[serenity::async_trait]
impl Command for Ping {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn usage(&self, prefix: &str) -> Option<String> {
        Some(format!("{}{} - check the bot is alive", prefix, self.name()))
    }

    async fn invoke(&self, _ctx: &Context<'_>, _cmd: &ParsedCommand) -> Result<Option<String>> {
        Ok(Some("Pong!".to_string()))
    }
}
