use serde::Serialize;

use crate::model::collection::Collection;
use crate::model::config::AppConfig;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct GroupJson {
    pub position: usize,
    pub name: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub position: usize,
    pub text: String,
    #[serde(rename = "isDone")]
    pub is_done: bool,
}

#[derive(Serialize)]
pub struct MoveJson {
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
}

pub fn groups_to_json(coll: &Collection) -> Vec<GroupJson> {
    coll.groups()
        .enumerate()
        .map(|(gi, group)| GroupJson {
            position: gi + 1,
            name: group.name().to_string(),
            tasks: coll
                .tasks_of(group.id())
                .enumerate()
                .map(|(ti, task)| TaskJson {
                    position: ti + 1,
                    text: task.text().to_string(),
                    is_done: task.is_done(),
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Render the collection as an indented, numbered list
pub fn format_collection(coll: &Collection) -> String {
    if coll.is_empty() {
        return "(no groups)\n".to_string();
    }
    let mut out = String::new();
    for (gi, group) in coll.groups().enumerate() {
        out.push_str(&format!("{}. {}\n", gi + 1, group.name()));
        for (ti, task) in coll.tasks_of(group.id()).enumerate() {
            let mark = if task.is_done() { 'x' } else { ' ' };
            out.push_str(&format!("   {}. [{}] {}\n", ti + 1, mark, task.text()));
        }
    }
    out
}

/// Render the effective configuration as TOML
pub fn format_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

/// Describe a reorder result using 1-based positions
pub fn format_move(moved: Option<(usize, usize)>) -> String {
    match moved {
        Some((from, to)) => format!("moved {} → {}", from, to),
        None => "unchanged".to_string(),
    }
}
