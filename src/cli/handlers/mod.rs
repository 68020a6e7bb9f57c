use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::gesture::{DragController, DragThreshold, DropRequest, Point, StackLayout};
use crate::io::config_io;
use crate::io::paths;
use crate::io::store_io::{self, LoadOutcome};
use crate::model::collection::{Collection, Entry};
use crate::model::config::AppConfig;
use crate::model::group::GroupId;
use crate::model::task::TaskId;
use crate::ops::reorder::Pinned;
use crate::ops::{StoreError, group_ops, task_ops};

/// Row height of the simulated list used to replay drags
const ROW_HEIGHT: f64 = 24.0;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config_path = cli.config.clone().unwrap_or_else(paths::config_path);

    // Config commands work even when the config file is broken
    if let Some(Commands::Config(cmd)) = cli.command {
        return cmd_config(cmd, &config_path, json);
    }

    let config = config_io::read_config(&config_path)?;
    let data_path = cli
        .data_file
        .clone()
        .or_else(|| config.storage.data_file.clone())
        .unwrap_or_else(paths::default_data_path);

    if let Some(Commands::Path) = cli.command {
        println!("{}", data_path.display());
        return Ok(());
    }

    let mut session = Session::open(data_path, &config)?;
    let result = match cli.command.unwrap_or(Commands::List) {
        Commands::List => cmd_list(&session, json),
        Commands::Check => cmd_check(&session, json),

        Commands::AddGroup(args) => cmd_add_group(&mut session, args),
        Commands::RmGroup(args) => cmd_rm_group(&mut session, args),
        Commands::Rename(args) => cmd_rename(&mut session, args),
        Commands::AddTask(args) => cmd_add_task(&mut session, args),
        Commands::RmTask(args) => cmd_rm_task(&mut session, args),
        Commands::Done(args) => cmd_set_done(&mut session, args, true),
        Commands::Undone(args) => cmd_set_done(&mut session, args, false),
        Commands::Edit(args) => cmd_edit(&mut session, args),
        Commands::MvGroup(args) => cmd_mv_group(&mut session, args, json),
        Commands::MvTask(args) => cmd_mv_task(&mut session, args, json),
        Commands::Reparent(args) => cmd_reparent(&mut session, args),

        Commands::Path | Commands::Config(_) => Ok(()),
    };
    result?;

    // Orderly shutdown: write the save file exactly once
    session.close()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One run of the app: the collection loaded from the save file, written
/// back on close.
struct Session {
    data_path: PathBuf,
    coll: Collection,
    threshold: DragThreshold,
}

impl Session {
    fn open(data_path: PathBuf, config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut coll = Collection::with_defaults(config.defaults.clone());
        if store_io::load(&data_path, &mut coll)? == LoadOutcome::Malformed {
            backup_unreadable(&data_path);
        }
        Ok(Session {
            data_path,
            coll,
            threshold: config.drag.threshold(),
        })
    }

    fn close(self) -> Result<(), Box<dyn std::error::Error>> {
        store_io::save(&self.data_path, &self.coll)?;
        Ok(())
    }

    fn group(&self, position: usize) -> Result<GroupId, StoreError> {
        position
            .checked_sub(1)
            .and_then(|n| self.coll.group_at(n))
            .ok_or_else(|| StoreError::InvalidPosition(format!("no group at position {}", position)))
    }

    fn task(&self, group_position: usize, position: usize) -> Result<(GroupId, TaskId), StoreError> {
        let group = self.group(group_position)?;
        let task = position
            .checked_sub(1)
            .and_then(|n| self.coll.group(group)?.tasks().get(n).copied())
            .ok_or_else(|| {
                StoreError::InvalidPosition(format!(
                    "no task at position {} in group {}",
                    position, group_position
                ))
            })?;
        Ok((group, task))
    }
}

/// Keep a copy of a save file we could not parse, since closing the
/// session overwrites it.
fn backup_unreadable(path: &Path) {
    let bak = path.with_extension("json.bak");
    match fs::copy(path, &bak) {
        Ok(_) => eprintln!(
            "warning: could not parse {} (backed up as {})",
            path.display(),
            bak.display()
        ),
        Err(e) => log::warn!("could not back up {}: {}", path.display(), e),
    }
}

/// Replay a press → move → drop gesture over a simulated list, pressing on
/// row `source` and releasing over row `target` (or below the last row).
fn replay_drag<T: Clone + PartialEq>(
    items: Vec<T>,
    pinned: Pinned,
    threshold: DragThreshold,
    source: usize,
    target: Option<usize>,
) -> Option<DropRequest<T>> {
    let layout = StackLayout::new(items, ROW_HEIGHT);
    let mut controller = DragController::new(threshold, pinned);

    let press = layout.row_center(source);
    controller.begin_drag(press);
    let nudge = Point::new(press.x + threshold.min_horizontal.abs(), press.y);
    controller.update_drag(nudge, &layout, layout.hit_test(nudge))?;

    let release = match target {
        Some(row) => layout.row_center(row),
        None => Point::new(0.0, (layout.items().len() as f64 + 1.0) * ROW_HEIGHT),
    };
    controller.take_drop(release, &layout, layout.hit_test(release), layout.items())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(session: &Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&groups_to_json(&session.coll))?);
    } else {
        print!("{}", format_collection(&session.coll));
    }
    Ok(())
}

fn cmd_check(session: &Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let violations = session.coll.check_invariants();
    if json {
        let messages: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&messages)?);
    } else if violations.is_empty() {
        println!("ok");
    } else {
        for v in &violations {
            println!("{}", v);
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(format!("{} problem(s) found", violations.len()).into())
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add_group(session: &mut Session, args: AddGroupArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.name {
        Some(name) => group_ops::add_named_group(&mut session.coll, name),
        None => group_ops::add_group(&mut session.coll),
    };
    println!("{}", session.coll.group_count());
    Ok(())
}

fn cmd_rm_group(session: &mut Session, args: GroupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let group = session.group(args.group)?;
    group_ops::remove_group(&mut session.coll, group);
    Ok(())
}

fn cmd_rename(session: &mut Session, args: RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let group = session.group(args.group)?;
    group_ops::rename_group(&mut session.coll, group, args.name)?;
    Ok(())
}

fn cmd_add_task(session: &mut Session, args: AddTaskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let group = session.group(args.group)?;
    let task = match args.text {
        Some(text) => task_ops::add_task_with_text(&mut session.coll, group, text),
        None => task_ops::add_task(&mut session.coll, group),
    }
    .ok_or(StoreError::GroupNotFound(group))?;
    let position = session
        .coll
        .group(group)
        .and_then(|g| g.position_of(task))
        .map_or(0, |i| i + 1);
    println!("{}.{}", args.group, position);
    Ok(())
}

fn cmd_rm_task(session: &mut Session, args: TaskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, task) = session.task(args.group, args.task)?;
    task_ops::remove_task(&mut session.coll, task);
    Ok(())
}

fn cmd_set_done(
    session: &mut Session,
    args: TaskArgs,
    is_done: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, task) = session.task(args.group, args.task)?;
    task_ops::set_task_done(&mut session.coll, task, is_done)?;
    Ok(())
}

fn cmd_edit(session: &mut Session, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, task) = session.task(args.group, args.task)?;
    task_ops::set_task_text(&mut session.coll, task, args.text)?;
    Ok(())
}

fn cmd_reparent(session: &mut Session, args: ReparentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, task) = session.task(args.group, args.task)?;
    let to = session.group(args.to)?;
    task_ops::move_task_to_group(&mut session.coll, task, to)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Drag commands
// ---------------------------------------------------------------------------

fn cmd_mv_group(
    session: &mut Session,
    args: MvGroupArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let group = session.group(args.group)?;
    if let Some(target) = args.target {
        session.group(target)?;
    }
    let source_row = session
        .coll
        .entry_index(group)
        .ok_or(StoreError::GroupNotFound(group))?;

    // Top-level rows: placeholder is row 0, group n is row n
    let request = replay_drag(
        session.coll.entries().to_vec(),
        Pinned::GROUPS,
        session.threshold,
        source_row,
        args.target,
    );
    let moved = match request {
        Some(DropRequest {
            item: Entry::Group(dragged),
            target,
        }) => group_ops::reorder_groups(&mut session.coll, dragged, target),
        _ => None,
    };
    print_move(moved, json)
}

fn cmd_mv_task(
    session: &mut Session,
    args: MvTaskArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (group, _) = session.task(args.group, args.task)?;
    if let Some(target) = args.target {
        session.task(args.group, target)?;
    }
    let tasks = session
        .coll
        .group(group)
        .map(|g| g.tasks().to_vec())
        .unwrap_or_default();

    let request = replay_drag(
        tasks,
        Pinned::NONE,
        session.threshold,
        args.task - 1,
        args.target.map(|t| t - 1),
    );
    let moved = request
        .and_then(|r| task_ops::reorder_tasks(&mut session.coll, group, r.item, r.target))
        .map(|(from, to)| (from + 1, to + 1));
    print_move(moved, json)
}

fn print_move(moved: Option<(usize, usize)>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let out = MoveJson {
            moved: moved.is_some(),
            from: moved.map(|(from, _)| from),
            to: moved.map(|(_, to)| to),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_move(moved));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(cmd: ConfigCmd, config_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = config_io::read_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", format_config(&config)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut doc = config_io::read_document(config_path)?;
            config_io::set_value(&mut doc, &key, &value)?;
            config_io::write_document(config_path, &doc)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
