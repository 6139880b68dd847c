use anyhow::bail;
use clap::{Parser, Subcommand};
use flyweight::config::settings::Setting;
use flyweight::config::storage::JsonStorageAdapter;
use flyweight::config::{ConfigStore, StorageAdapter};
use flyweight::shared::types::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Inspects and edits the settings file read by `flyweight-demo --config`
#[derive(Debug, Parser)]
#[clap(name = "flyweight-config", version = "0.1.0")]
struct Cli {
    /// Settings file holding the overrides
    #[clap(short = 'f', long = "file", global = true, default_value = "flyweight.json")]
    file: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show value, default and description of one setting
    Show { key: String },
    /// List settings, optionally only those matching a wildcard pattern (ie: "scene.*")
    List {
        #[clap(default_value = "*")]
        pattern: String,
    },
    /// Override a setting. Values carry their type: u:800, s:black, m:line,oval_filled
    Set { key: String, value: String },
    /// Drop an override so the default applies again
    Reset { key: String },
}

/// Lets the store and this binary share one json adapter, so edits can be flushed afterwards
struct SharedJson(Arc<JsonStorageAdapter>);

impl StorageAdapter for SharedJson {
    fn get(&self, key: &str) -> Option<Setting> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: Setting) {
        self.0.set(key, value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        self.0.all()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(LevelFilter::Warn).init()?;

    let storage = Arc::new(JsonStorageAdapter::open(&cli.file)?);
    let store = ConfigStore::with_storage(Box::new(SharedJson(Arc::clone(&storage))))?;

    match cli.command {
        Command::Show { key } => {
            let Some(info) = store.get_info(&key) else {
                bail!("unknown setting: {key}");
            };
            let source = if storage.get(&key).is_some() { "file" } else { "default" };

            let value = store.get(&key).unwrap_or_else(|| info.default.clone());

            println!("{key}");
            println!("  value       : {value} ({source})");
            println!("  default     : {}", info.default);
            println!("  description : {}", info.description);
        }
        Command::List { pattern } => {
            for key in store.find(&pattern) {
                let marker = if storage.get(&key).is_some() { "*" } else { " " };
                if let Some(value) = store.get(&key) {
                    println!("{marker} {key:24} {value}");
                }
            }
        }
        Command::Set { key, value } => {
            let Some(info) = store.get_info(&key) else {
                bail!("unknown setting: {key}");
            };

            let value = Setting::from_str(&value)?;
            if std::mem::discriminant(&value) != std::mem::discriminant(&info.default) {
                bail!("{key} expects a value like {}", info.default);
            }

            store.set(&key, value);
            storage.flush()?;
        }
        Command::Reset { key } => {
            if !store.has(&key) {
                bail!("unknown setting: {key}");
            }

            if storage.remove(&key).is_some() {
                storage.flush()?;
            } else {
                println!("{key} was not overridden");
            }
        }
    }

    Ok(())
}
