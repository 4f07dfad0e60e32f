use crate::{cache::ConfigCache, command::CommandRegistry, config::GlobalConfig};

/// Collection of data that is shared across events.
///
/// Constructed by the gateway handler from state it owns; the router and
/// command handlers only ever borrow it, so every piece of shared state is
/// visible at the call site.
pub struct Context<'a> {
    pub global: &'a GlobalConfig,
    pub cache: &'a ConfigCache,
    pub registry: &'a CommandRegistry,
}
