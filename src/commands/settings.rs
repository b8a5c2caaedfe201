//! Settings subcommands

use anyhow::{Result, bail};
use colored::Colorize;
use settings::{SettingText, SettingValue, SettingsStore};

use crate::Context;
use crate::cli::{SettingsCommand, ValueKind};
use crate::ui;

pub fn run(ctx: &Context, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Get {
            parent,
            child,
            default,
            kind,
        } => {
            let store = ctx.open_settings()?;
            let value = get(&store, &parent, &child, default.as_deref(), kind)?;
            println!("{value}");
        }
        SettingsCommand::Set {
            parent,
            child,
            value,
            kind,
        } => {
            let mut store = ctx.open_settings()?;
            let stored = set(&mut store, &parent, &child, &value, kind)?;
            store.save()?;
            if !ctx.quiet {
                ui::success(&format!("{parent}/{child} = {stored}"));
            }
        }
        SettingsCommand::Unset { parent, child } => {
            let mut store = ctx.open_settings()?;
            if store.remove(&parent, &child) {
                store.save()?;
                if !ctx.quiet {
                    ui::success(&format!("Removed {parent}/{child}"));
                }
            } else {
                ui::warn(&format!("{parent}/{child} is not set"));
            }
        }
        SettingsCommand::List => {
            let store = ctx.open_settings()?;
            if ctx.verbose > 0 {
                ui::kv("File", &store.path().display().to_string());
            }
            list(&store);
        }
        SettingsCommand::Path => {
            println!("{}", ctx.settings_path()?.display());
        }
    }
    Ok(())
}

/// Read `(parent, child)` as `kind` and render it back as text.
fn get(
    store: &SettingsStore,
    parent: &str,
    child: &str,
    default: Option<&str>,
    kind: ValueKind,
) -> Result<String> {
    match kind {
        ValueKind::String => Ok(store.read_str(parent, child, default.unwrap_or(""))),
        ValueKind::Bool => read_as::<bool>(store, parent, child, default, "bool"),
        ValueKind::Int => read_as::<i64>(store, parent, child, default, "int"),
        ValueKind::Double => read_as::<f64>(store, parent, child, default, "double"),
    }
}

fn read_as<T: SettingValue + Default>(
    store: &SettingsStore,
    parent: &str,
    child: &str,
    default: Option<&str>,
    label: &str,
) -> Result<String> {
    let default = match default {
        Some(text) => match T::parse_setting(text) {
            Some(v) => v,
            None => bail!("Default '{text}' is not a valid {label}"),
        },
        None => T::default(),
    };
    Ok(store.read(parent, child, default).to_setting_text())
}

/// Validate `value` as `kind` and store its canonical text.
fn set(
    store: &mut SettingsStore,
    parent: &str,
    child: &str,
    value: &str,
    kind: ValueKind,
) -> Result<String> {
    let text = match kind {
        ValueKind::String => value.to_string(),
        ValueKind::Bool => parse_as::<bool>(value, "bool")?,
        ValueKind::Int => parse_as::<i64>(value, "int")?,
        ValueKind::Double => parse_as::<f64>(value, "double")?,
    };
    store.write(parent, child, text.as_str())?;
    Ok(text)
}

fn parse_as<T: SettingValue>(value: &str, label: &str) -> Result<String> {
    match T::parse_setting(value) {
        Some(v) => Ok(v.to_setting_text()),
        None => bail!("'{value}' is not a valid {label}"),
    }
}

fn list(store: &SettingsStore) {
    let entries = store.entries();
    if entries.is_empty() {
        ui::dim("No settings stored");
        return;
    }

    let mut current: Option<&str> = None;
    for entry in &entries {
        if current != Some(entry.parent.as_str()) {
            println!("{}", entry.parent.bold());
            current = Some(entry.parent.as_str());
        }
        let value = if entry.value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            entry.value.clone()
        };
        println!("  {} = {}", entry.child.cyan(), value);
    }
}
