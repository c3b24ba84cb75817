use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// Marker prepended to tasks added through [`TodoList::add`]
pub const BULLET: &str = "• ";

/// Ordered task lines. Lines read from disk are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<String>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `task` behind a bullet. Blank input adds nothing.
    pub fn add(&mut self, task: &str) -> bool {
        let task = task.trim();
        if task.is_empty() {
            return false;
        }
        self.items.push(format!("{BULLET}{task}"));
        debug!("event=todo_add count={}", self.items.len());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        debug!("event=todo_remove index={index} count={}", self.items.len());
        Some(removed)
    }
}

pub trait TodoStore {
    fn load(&self) -> TodoList;
    fn save(&self, list: &TodoList) -> std::io::Result<()>;
}

/// One task per line; the whole file is rewritten on every save
#[derive(Debug, Clone)]
pub struct FileTodoStore {
    path: PathBuf,
}

impl FileTodoStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::todo_path().unwrap_or_else(|| PathBuf::from("tasks.txt"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for FileTodoStore {
    fn load(&self) -> TodoList {
        match fs::read_to_string(&self.path) {
            Ok(text) => TodoList::from_lines(text.lines()),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        "event=todo_load status=error path={} err={err}",
                        self.path.display()
                    );
                }
                TodoList::new()
            }
        }
    }

    fn save(&self, list: &TodoList) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut data = String::new();
        for item in list.items() {
            data.push_str(item);
            data.push('\n');
        }
        fs::write(&self.path, data)
    }
}
