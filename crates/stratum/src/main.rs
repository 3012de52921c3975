use std::process;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use resource_actions::ResourceActionsPlugin;
use stratum_core::host::{Bootstrap, BootstrapReport, ExtensionHost};
use stratum_core::plugin::manifest::HostManifest;
use stratum_core::registry::key::ExtensionKey;
use stratum_core::slots::{
    self, EditorWidget, Entrypoint, PanelContribution, ResourceAction,
};
use webmap::WebmapPlugin;

/// Plugin manifest shipped with the binary.
const PLUGIN_MANIFEST: &str = include_str!("../stratum-plugins.toml");

/// Stratum: extension-registry host for the GIS web stack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List installed slots with cardinality and entry counts
    Slots,
    /// Print the entries of a slot in query order
    Query {
        /// Slot name, e.g. "webmap.panel"
        slot: String,
    },
    /// Resolve one entry's payload and print it
    Load {
        /// Slot name, e.g. "resource.editor-widget"
        slot: String,
        /// Entry key in "component/identity" form
        key: String,
    },
    /// Print the bootstrap report
    Plugins,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let manifest = HostManifest::from_toml_str(PLUGIN_MANIFEST)?;
    debug!("manifest lists plugins: {:?}", manifest.plugin_ids());

    let mut host = slots::standard_host()?;
    let report = Bootstrap::new(manifest)?
        .add_plugin(Arc::new(WebmapPlugin))
        .add_plugin(Arc::new(ResourceActionsPlugin))
        .run(&mut host)?;

    match args.command {
        Commands::Slots => print_slots(&host),
        Commands::Query { slot } => print_query(&host, &slot)?,
        Commands::Load { slot, key } => print_load(&host, &slot, &key).await?,
        Commands::Plugins => print_report(&report),
    }

    Ok(())
}

fn print_slots(host: &ExtensionHost) {
    for slot in host.overview() {
        println!("{} ({}) {} entries", slot.name, slot.cardinality, slot.entries);
    }
}

fn print_query(host: &ExtensionHost, slot: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rows = match slot {
        slots::WEBMAP_PANEL => query_rows::<PanelContribution>(host, slot),
        slots::RESOURCE_ACTION => query_rows::<ResourceAction>(host, slot),
        slots::RESOURCE_EDITOR_WIDGET => query_rows::<EditorWidget>(host, slot),
        slots::JSREALM_ENTRYPOINT => query_rows::<Entrypoint>(host, slot),
        other => return Err(format!("unknown slot '{}'", other).into()),
    };
    for (order, key, label) in rows {
        println!("{:>6}  {}  {}", order, key, label.unwrap_or_default());
    }
    Ok(())
}

fn query_rows<V: Send + Sync + 'static>(
    host: &ExtensionHost,
    slot: &str,
) -> Vec<(i64, String, Option<String>)> {
    host.slot::<V>(slot)
        .map(|registry| {
            registry
                .snapshot()
                .iter()
                .map(|e| {
                    (
                        e.order(),
                        e.key().to_string(),
                        e.label().map(|l| l.to_string()),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

async fn print_load(
    host: &ExtensionHost,
    slot: &str,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = ExtensionKey::from_str(key)?;
    let payload = match slot {
        slots::WEBMAP_PANEL => load_json::<PanelContribution>(host, slot, &key).await?,
        slots::RESOURCE_ACTION => load_json::<ResourceAction>(host, slot, &key).await?,
        slots::RESOURCE_EDITOR_WIDGET => load_json::<EditorWidget>(host, slot, &key).await?,
        slots::JSREALM_ENTRYPOINT => load_json::<Entrypoint>(host, slot, &key).await?,
        other => return Err(format!("unknown slot '{}'", other).into()),
    };
    println!("{}", payload);
    Ok(())
}

async fn load_json<V: Serialize + Send + Sync + 'static>(
    host: &ExtensionHost,
    slot: &str,
    key: &ExtensionKey,
) -> Result<String, Box<dyn std::error::Error>> {
    let registry = host
        .slot::<V>(slot)
        .ok_or_else(|| format!("slot '{}' is not installed", slot))?;
    let value = registry
        .load(|e| e.key() == key)
        .await?
        .ok_or_else(|| format!("no entry '{}' in slot '{}'", key, slot))?;
    Ok(serde_json::to_string_pretty(&*value)?)
}

fn print_report(report: &BootstrapReport) {
    println!("registered plugins:");
    for id in &report.plugins {
        println!("  - {}", id);
    }
    if !report.skipped.is_empty() {
        println!("skipped (linked but not in manifest):");
        for id in &report.skipped {
            println!("  - {}", id);
        }
    }
    println!("slots:");
    for slot in &report.slots {
        println!("  {} ({}) {} entries", slot.name, slot.cardinality, slot.entries);
    }
}
