use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pvs",
    about = "Project Version Store — snapshot, diff, and restore project file sets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Projects root directory
    #[arg(long, global = true, default_value = "./projects")]
    pub root: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new project
    Init(InitArgs),
    /// List known projects
    List,
    /// Save files as a new version
    Save(SaveArgs),
    /// Show a project's version history
    Log(LogArgs),
    /// Compare two archived versions
    Diff(DiffArgs),
    /// Restore the working set to an archived version
    Restore(RestoreArgs),
    /// List restore-created backups
    Backups(BackupsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name
    pub name: String,
    /// Free-text description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct SaveArgs {
    /// Project name
    pub project: String,
    /// Files to read from disk and include in the snapshot
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Commit message
    #[arg(short, long, default_value = "")]
    pub message: String,
    /// Explicit version tag (otherwise the patch component is bumped)
    #[arg(long)]
    pub tag: Option<String>,
    /// Replace an existing version under the same tag
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Args)]
pub struct LogArgs {
    /// Project name
    pub project: String,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Project name
    pub project: String,
    /// Old version tag
    pub tag_a: String,
    /// New version tag
    pub tag_b: String,
}

#[derive(Args)]
pub struct RestoreArgs {
    /// Project name
    pub project: String,
    /// Version tag to restore
    pub tag: String,
}

#[derive(Args)]
pub struct BackupsArgs {
    /// Project name
    pub project: String,
}
