//! Command-line front end for the shopping list core.
//!
//! # Responsibility
//! - Translate subcommands into explicit list service calls.
//! - Re-render the list whenever the service reports a change.

mod cli;
mod view;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use log::{info, warn};
use shoplist_core::db::open_db;
use shoplist_core::{
    default_log_level, filter_catalog, find_essential, init_logging, report_text, write_report,
    ItemId, ItemOrigin, ListService, ListStore, SqliteListStore,
};
use std::cell::Cell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

const DB_FILE_NAME: &str = "shoplist.sqlite3";
const DATA_DIR_NAME: &str = "shoplist";

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let db_path = resolve_db_path(cli.db)?;
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open list database `{}`", db_path.display()))?;
    let mut service = ListService::open(SqliteListStore::new(&conn));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut service, cli.command, &mut out)?;

    if service.persistence_degraded() {
        warn!("event=cli_exit module=cli status=degraded reason=save_failed");
        eprintln!("note: changes could not be saved and will be lost when this run ends");
    }
    Ok(())
}

/// Runs one command, re-rendering the list when it changed.
fn run<S: ListStore>(
    service: &mut ListService<S>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    let name = command.name();
    info!("event=cli_command module=cli status=start command={name}");

    let changed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&changed);
    let subscription = service.subscribe(move |_| flag.set(true));
    let outcome = dispatch(service, command, &mut *out);
    service.unsubscribe(subscription);
    outcome?;

    info!(
        "event=cli_command module=cli status=ok command={name} changed={}",
        changed.get()
    );
    if changed.get() {
        view::render_list(out, service.snapshot())?;
    }
    Ok(())
}

fn dispatch<S: ListStore>(
    service: &mut ListService<S>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Catalog { filter } => {
            let groups = filter_catalog(filter.as_deref().unwrap_or(""));
            view::render_catalog(out, &groups, |name| service.contains(name))?;
        }
        Commands::List => view::render_list(out, service.snapshot())?,
        Commands::Add { name } => {
            let name = name.join(" ");
            if service.add(&name, ItemOrigin::Custom).is_none() {
                writeln!(out, "Nothing added: name is blank or already on the list.")?;
            }
        }
        Commands::Check { name } => {
            let name = name.join(" ");
            let Some(entry) = find_essential(&name) else {
                bail!("`{name}` is not in the essentials catalog; use `add` for custom items");
            };
            if !service.toggle_essential(entry.name, entry.group, true) {
                writeln!(out, "`{}` is already on the list.", entry.name)?;
            }
        }
        Commands::Uncheck { name } => {
            let name = name.join(" ");
            if !service.remove_by_name(&name) {
                writeln!(out, "`{name}` is not on the list.")?;
            }
        }
        Commands::Remove { id } => {
            let exact = ItemId::from(id.trim());
            let prefix = id.trim().to_lowercase();
            if prefix.is_empty() {
                bail!("item ID cannot be empty");
            }
            let matches: Vec<ItemId> = if service.get(&exact).is_some() {
                vec![exact]
            } else {
                service
                    .snapshot()
                    .iter()
                    .filter(|item| item.id.as_str().to_lowercase().starts_with(&prefix))
                    .map(|item| item.id.clone())
                    .collect()
            };
            match matches.as_slice() {
                [] => writeln!(out, "No item with ID `{id}`.")?,
                [target] => {
                    service.remove_by_id(target);
                }
                _ => bail!("ID prefix `{id}` matches {} items", matches.len()),
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to clear the entire list without --yes");
            }
            service.clear();
        }
        Commands::Export { out: path, stdout } => {
            let generated_at = Local::now().naive_local();
            if stdout {
                writeln!(out, "{}", report_text(service.snapshot(), generated_at))?;
            } else {
                write_report(&path, service.snapshot(), generated_at)
                    .with_context(|| format!("failed to write `{}`", path.display()))?;
                writeln!(out, "Wrote {}", path.display())?;
            }
        }
    }
    Ok(())
}

fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let Some(data_dir) = dirs::data_dir() else {
        return Ok(PathBuf::from(DB_FILE_NAME));
    };
    let dir = data_dir.join(DATA_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory `{}`", dir.display()))?;
    Ok(dir.join(DB_FILE_NAME))
}
