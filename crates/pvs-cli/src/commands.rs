use std::fs;

use anyhow::Context;
use colored::Colorize;
use pvs_core::{SaveOptions, VersionStore};
use pvs_types::FileMap;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = VersionStore::open(&cli.root)?;
    match cli.command {
        Command::Init(args) => cmd_init(&store, args),
        Command::List => cmd_list(&store),
        Command::Save(args) => cmd_save(&store, args),
        Command::Log(args) => cmd_log(&store, args),
        Command::Diff(args) => cmd_diff(&store, args),
        Command::Restore(args) => cmd_restore(&store, args),
        Command::Backups(args) => cmd_backups(&store, args),
    }
}

fn cmd_init(store: &VersionStore, args: InitArgs) -> anyhow::Result<()> {
    store.create_project(&args.name, &args.description)?;
    println!(
        "{} Created project {} at {}",
        "✓".green().bold(),
        args.name.bold(),
        store.root().join(&args.name).display()
    );
    Ok(())
}

fn cmd_list(store: &VersionStore) -> anyhow::Result<()> {
    let projects = store.list_projects()?;
    if projects.is_empty() {
        println!("No projects under {}", store.root().display());
        return Ok(());
    }
    for project in projects {
        println!(
            "{}  {}  {} versions  {}",
            project.name.bold(),
            project.current_version.as_str().yellow(),
            project.versions.len(),
            project.description.dimmed()
        );
    }
    Ok(())
}

fn cmd_save(store: &VersionStore, args: SaveArgs) -> anyhow::Result<()> {
    let mut files = FileMap::new();
    for path in &args.files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .to_str()
            .with_context(|| format!("non-UTF-8 path: {}", path.display()))?;
        files.insert(name.to_string(), content);
    }

    let outcome = store.save_version_with(
        &args.project,
        &files,
        &args.message,
        args.tag.as_deref(),
        SaveOptions {
            overwrite: args.overwrite,
        },
    )?;
    println!(
        "{} Saved {} as {} ({})",
        "✓".green().bold(),
        args.project.bold(),
        outcome.version.as_str().yellow(),
        outcome.hash.to_hex().dimmed()
    );
    Ok(())
}

fn cmd_log(store: &VersionStore, args: LogArgs) -> anyhow::Result<()> {
    let history = store.version_history(&args.project)?;
    if history.is_empty() {
        println!("No versions saved yet.");
        return Ok(());
    }
    for record in history.iter().rev() {
        let tag = if record.version.is_backup() {
            record.version.as_str().cyan()
        } else {
            record.version.as_str().yellow().bold()
        };
        println!(
            "{}  {}  {}",
            tag,
            record.hash.to_hex().dimmed(),
            record.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        println!("  {}", record.commit_message);
        println!("  {} file(s)", record.files.len());
    }
    Ok(())
}

fn cmd_diff(store: &VersionStore, args: DiffArgs) -> anyhow::Result<()> {
    let diff = store.diff_versions(&args.project, &args.tag_a, &args.tag_b)?;
    if diff.is_empty() {
        println!("No changes between {} and {}.", args.tag_a, args.tag_b);
        return Ok(());
    }
    for path in &diff.added {
        println!("{} {}", "A".green().bold(), path);
    }
    for path in &diff.deleted {
        println!("{} {}", "D".red().bold(), path);
    }
    for path in &diff.modified {
        let stats = &diff.changes[path];
        println!(
            "{} {}  ({:+} lines, {} chars)",
            "M".yellow().bold(),
            path,
            stats.lines_added,
            stats.chars_changed
        );
    }
    Ok(())
}

fn cmd_restore(store: &VersionStore, args: RestoreArgs) -> anyhow::Result<()> {
    let outcome = store.restore_version(&args.project, &args.tag)?;
    println!(
        "{} Restored {} to {}",
        "✓".green().bold(),
        args.project.bold(),
        outcome.restored.as_str().yellow()
    );
    if let Some(backup) = outcome.backup {
        println!("  previous working set kept as {}", backup.as_str().cyan());
    }
    Ok(())
}

fn cmd_backups(store: &VersionStore, args: BackupsArgs) -> anyhow::Result<()> {
    let backups = store.list_backups(&args.project)?;
    if backups.is_empty() {
        println!("No backups.");
        return Ok(());
    }
    for record in backups.iter().rev() {
        println!(
            "{}  {}  {}",
            record.version.as_str().cyan(),
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.commit_message.dimmed()
        );
    }
    Ok(())
}
