use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("simpletodo v", env!("CARGO_PKG_VERSION"), " - grouped task lists"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different save file
    #[arg(long = "data-file", global = true)]
    pub data_file: Option<PathBuf>,

    /// Use a different config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List groups and their tasks (default)
    List,
    /// Append a new group
    AddGroup(AddGroupArgs),
    /// Remove a group and all of its tasks
    RmGroup(GroupArgs),
    /// Rename a group
    Rename(RenameArgs),
    /// Append a new task to a group
    AddTask(AddTaskArgs),
    /// Remove a task
    RmTask(TaskArgs),
    /// Mark a task done
    Done(TaskArgs),
    /// Mark a task not done
    Undone(TaskArgs),
    /// Change a task's text
    Edit(EditArgs),
    /// Drag a group onto another group's position
    MvGroup(MvGroupArgs),
    /// Drag a task onto another task's position within its group
    MvTask(MvTaskArgs),
    /// Move a task to the end of another group
    Reparent(ReparentArgs),
    /// Validate the save file's structure
    Check,
    /// Print the save file path
    Path,
    /// Show or edit configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Group args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddGroupArgs {
    /// Group name (default from config, "New Group")
    pub name: Option<String>,
}

#[derive(Args)]
pub struct GroupArgs {
    /// Group position (1-based)
    pub group: usize,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Group position (1-based)
    pub group: usize,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct MvGroupArgs {
    /// Group to drag (1-based position)
    pub group: usize,
    /// Group position to drop on (omit to drop below the last group)
    pub target: Option<usize>,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddTaskArgs {
    /// Group position (1-based)
    pub group: usize,
    /// Task text (default from config, "New Task")
    pub text: Option<String>,
}

#[derive(Args)]
pub struct TaskArgs {
    /// Group position (1-based)
    pub group: usize,
    /// Task position within the group (1-based)
    pub task: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// Group position (1-based)
    pub group: usize,
    /// Task position within the group (1-based)
    pub task: usize,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct MvTaskArgs {
    /// Group position (1-based)
    pub group: usize,
    /// Task to drag (1-based position)
    pub task: usize,
    /// Task position to drop on (omit to drop below the last task)
    pub target: Option<usize>,
}

#[derive(Args)]
pub struct ReparentArgs {
    /// Group position (1-based)
    pub group: usize,
    /// Task position within the group (1-based)
    pub task: usize,
    /// Destination group position (1-based)
    pub to: usize,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set a value, e.g. `config set drag.min_vertical 6`
    Set {
        /// Key as table.field
        key: String,
        /// New value
        value: String,
    },
}
