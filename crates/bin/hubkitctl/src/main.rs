//! # hubkitctl: device schema tool
//!
//! Composition root that builds the schema registry and drives the state
//! store from the command line.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize structured logging on stderr
//! - Register the enabled device schemas
//! - Print descriptors, or apply a command or event to an entity read from
//!   disk and print the resulting entity on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod cli;
mod config;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use hubkit_app::registry::SchemaRegistry;
use hubkit_app::services::device_service::DeviceService;
use hubkit_domain::devices::{self, Light, Switch, light, switch};
use hubkit_domain::entity::Entity;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Inbound};
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = match cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}\n\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    let registry = build_registry(&config.schemas.enabled);

    match cli {
        Cli::Help => println!("{}", cli::USAGE),
        Cli::Describe { domain } => describe(&registry, domain.as_deref(), &config)?,
        Cli::Apply {
            inbound,
            entity,
            payload,
        } => apply(&registry, inbound, &entity, &payload, &config)?,
    }

    Ok(())
}

fn build_registry(enabled: &[String]) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for domain in enabled {
        match devices::schema(domain) {
            Some(schema) => {
                registry.register_schema(schema);
            }
            None => tracing::warn!(%domain, "unknown schema in configuration, skipping"),
        }
    }
    tracing::info!(
        domains = ?registry.domains().collect::<Vec<_>>(),
        "schema registry ready"
    );
    registry
}

fn describe(
    registry: &SchemaRegistry,
    domain: Option<&str>,
    config: &Config,
) -> anyhow::Result<()> {
    match domain {
        Some(domain) => {
            let descriptor = registry
                .get(domain)
                .with_context(|| format!("no schema registered for domain `{domain}`"))?;
            print_json(descriptor, config)
        }
        None => print_json(&registry.descriptors().collect::<Vec<_>>(), config),
    }
}

fn apply(
    registry: &SchemaRegistry,
    inbound: Inbound,
    entity_path: &Path,
    payload: &str,
    config: &Config,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(entity_path)
        .with_context(|| format!("failed to read entity file {}", entity_path.display()))?;
    let mut entity: Entity = serde_json::from_str(&content).context("failed to parse entity")?;
    entity.validate()?;

    if !registry.contains(&entity.domain) {
        bail!("no schema registered for domain `{}`", entity.domain);
    }

    let payload = if payload == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        payload.to_string()
    };

    let domain = entity.domain.clone();
    match (domain.as_str(), inbound) {
        (switch::DOMAIN, Inbound::Command) => {
            DeviceService::<Switch>::new().handle_command(&mut entity, payload.as_bytes())?;
        }
        (switch::DOMAIN, Inbound::Event) => {
            DeviceService::<Switch>::new().handle_event(&mut entity, payload.as_bytes())?;
        }
        (light::DOMAIN, Inbound::Command) => {
            DeviceService::<Light>::new().handle_command(&mut entity, payload.as_bytes())?;
        }
        (light::DOMAIN, Inbound::Event) => {
            DeviceService::<Light>::new().handle_event(&mut entity, payload.as_bytes())?;
        }
        (domain, _) => bail!("no device type handles domain `{domain}`"),
    }

    print_json(&entity, config)
}

fn print_json<T: Serialize + ?Sized>(value: &T, config: &Config) -> anyhow::Result<()> {
    let json = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
