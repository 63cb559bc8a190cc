use std::{path::Path, sync::mpsc};

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain, infra,
    relay::{self, RelayConnection},
    ui::{self, ChannelRelayEventSource, CrosstermEventSource, ShellEventSource},
    usecases::{self, bootstrap, shell::DefaultShellOrchestrator},
};

use crate::domain::session::SessionContext;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => run_messenger(cli.config.as_deref()),
    }
}

fn run_messenger(config_path: Option<&Path>) -> Result<()> {
    let context = bootstrap::bootstrap(config_path)?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        relay = relay::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let (events_tx, events_rx) = mpsc::channel();
    let mut relay_connection = RelayConnection::new(context.config.relay.endpoint.clone());
    relay_connection.open(events_tx)?;

    let session = SessionContext::new(context.config.relay.access_key.clone());
    let mut orchestrator = DefaultShellOrchestrator::new(session, relay_connection);
    let mut event_source = ShellEventSource::new(
        CrosstermEventSource::default(),
        ChannelRelayEventSource::new(events_rx),
    );

    ui::shell::start(&mut event_source, &mut orchestrator)
}
