//! The `alttext providers` command.

use alttext_core::{AltTextClient, ClientFactory, Config, ProviderKind};
use clap::Args;
use serde::Serialize;

/// Arguments for the `providers` command.
#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

/// One provider as shown to the user.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProviderRow {
    pub key: &'static str,
    pub name: &'static str,
    pub model: String,
    pub configured: bool,
}

/// Execute the providers command.
pub fn execute(args: ProvidersArgs, config: Config) -> anyhow::Result<()> {
    let factory = ClientFactory::new(config)?;
    let rows = provider_rows(&factory);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let state = if row.configured {
            "configured"
        } else {
            "not configured"
        };
        println!("{:<12} {:<18} {:<28} {}", row.key, row.name, row.model, state);
    }
    Ok(())
}

/// All providers in fallback order with their configured state.
pub fn provider_rows(factory: &ClientFactory) -> Vec<ProviderRow> {
    ProviderKind::ALL
        .iter()
        .map(|&kind| ProviderRow {
            key: kind.key(),
            name: kind.display_name(),
            model: factory.settings_for(kind).model,
            configured: factory.create(kind).is_available(),
        })
        .collect()
}
