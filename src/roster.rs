//! Employee Roster
//!
//! A list of employees persisted as a pretty-printed JSON array. Every
//! successful write is saved to disk before returning.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default roster file, relative to the working directory.
pub const DEFAULT_ROSTER_FILE: &str = "employees.json";

/// An employee record. Ids are chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("roster file error: {0}")]
    Io(#[from] io::Error),

    #[error("roster file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("employee {0} already exists")]
    DuplicateId(i64),
}

pub type RosterResult<T> = std::result::Result<T, RosterError>;

// == Employee Roster ==
/// In-memory employee list bound to its backing file.
#[derive(Debug)]
pub struct EmployeeRoster {
    path: PathBuf,
    employees: Vec<Employee>,
}

impl EmployeeRoster {
    /// Loads the roster at `path`. A missing or empty file is an empty roster.
    pub fn open(path: impl Into<PathBuf>) -> RosterResult<Self> {
        let path = path.into();
        let employees = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Vec::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        debug!("Loaded {} employees from {}", employees.len(), path.display());
        Ok(Self { path, employees })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an employee and saves. Ids must be unique.
    pub fn add(&mut self, employee: Employee) -> RosterResult<()> {
        if self.get(employee.id).is_some() {
            return Err(RosterError::DuplicateId(employee.id));
        }
        self.employees.push(employee);
        self.save()
    }

    pub fn get(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == id)
    }

    /// Replaces the employee with the same id and saves.
    ///
    /// Returns `false`, leaving the file untouched, when no such employee exists.
    pub fn update(&mut self, updated: Employee) -> RosterResult<bool> {
        let Some(slot) = self.employees.iter_mut().find(|emp| emp.id == updated.id) else {
            return Ok(false);
        };
        *slot = updated;
        self.save()?;
        Ok(true)
    }

    /// Removes the employee with `id` and saves. Returns `false` when absent.
    pub fn delete(&mut self, id: i64) -> RosterResult<bool> {
        let Some(index) = self.employees.iter().position(|emp| emp.id == id) else {
            return Ok(false);
        };
        self.employees.remove(index);
        self.save()?;
        Ok(true)
    }

    /// All employees in insertion order.
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    fn save(&self) -> RosterResult<()> {
        let mut file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(&mut file, &self.employees)?;
        writeln!(file)?;
        file.sync_all()?;
        Ok(())
    }
}
