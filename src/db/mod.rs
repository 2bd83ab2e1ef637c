//! Store access layer: the sole owner of persisted records.
//!
//! All reads and writes go through [`Database`]; callers only ever hold
//! records by value. Multi-statement mutations run inside an explicit
//! transaction so a failed write is never partially visible.

pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::models::{
    CreateNoteInput, CreateProjectInput, Project, ProjectNote, UpdateNoteInput,
    UpdateProjectInput, DEFAULT_PRIORITY, DEFAULT_STATUS,
};

const PROJECT_COLUMNS: &str = "id, project_id, name, description, status, priority, domain, \
                               next_steps, deadline, project_type, tooling, created_at, updated_at";

const NOTE_COLUMNS: &str = "id, project_id, content, created_at, updated_at";

/// Handle to the single backing SQLite store.
///
/// Cheap to clone; every operation serializes on the shared connection, which
/// is what makes the cascade and the export snapshot atomic with respect to
/// concurrent requests.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the store at `path` and enable foreign keys.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Apply the schema. Idempotent; safe to call on every boot.
    pub fn migrate(&self) -> Result<()> {
        self.conn().execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    /// Name of the backing file, used as the export download filename.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "projects.db".into())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("connection mutex poisoned")
    }

    // --- projects ---

    pub fn create_project(&self, input: CreateProjectInput) -> Result<Project> {
        let project_id = required(input.project_id, "project_id")?;
        let name = required(input.name, "name")?;
        let status = input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        let priority = input
            .priority
            .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());
        let now = Utc::now();

        let conn = self.conn();
        conn.execute(
            "INSERT INTO projects (project_id, name, description, status, priority, domain, \
             next_steps, deadline, project_type, tooling, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                project_id,
                name,
                input.description,
                status,
                priority,
                input.domain,
                input.next_steps,
                input.deadline,
                input.project_type,
                input.tooling,
                now,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, project_id, "project created");

        Ok(Project {
            id,
            project_id,
            name,
            description: input.description,
            status,
            priority,
            domain: input.domain,
            next_steps: input.next_steps,
            deadline: input.deadline,
            project_type: input.project_type,
            tooling: input.tooling,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"))?;
        let projects = stmt
            .query_map([], row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn get_project(&self, id: i64) -> Result<Project> {
        self.conn()
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
                row_to_project,
            )
            .optional()?
            .ok_or(Error::NotFound {
                entity: "Project",
                id,
            })
    }

    /// Merge the supplied fields into the stored record and refresh
    /// `updated_at`. `id`, `project_id` and `created_at` are never altered.
    pub fn update_project(&self, id: i64, update: UpdateProjectInput) -> Result<Project> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let mut project = tx
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
                row_to_project,
            )
            .optional()?
            .ok_or(Error::NotFound {
                entity: "Project",
                id,
            })?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = Some(description);
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(priority) = update.priority {
            project.priority = priority;
        }
        if let Some(domain) = update.domain {
            project.domain = Some(domain);
        }
        if let Some(next_steps) = update.next_steps {
            project.next_steps = Some(next_steps);
        }
        if let Some(deadline) = update.deadline {
            project.deadline = Some(deadline);
        }
        if let Some(project_type) = update.project_type {
            project.project_type = Some(project_type);
        }
        if let Some(tooling) = update.tooling {
            project.tooling = Some(tooling);
        }
        project.updated_at = Utc::now();

        tx.execute(
            "UPDATE projects SET name = ?1, description = ?2, status = ?3, priority = ?4, \
             domain = ?5, next_steps = ?6, deadline = ?7, project_type = ?8, tooling = ?9, \
             updated_at = ?10 WHERE id = ?11",
            params![
                project.name,
                project.description,
                project.status,
                project.priority,
                project.domain,
                project.next_steps,
                project.deadline,
                project.project_type,
                project.tooling,
                project.updated_at,
                id,
            ],
        )?;
        tx.commit()?;

        Ok(project)
    }

    /// Remove the project and every note it owns in one transaction.
    pub fn delete_project(&self, id: i64) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM project_notes WHERE project_id = ?1", [id])?;
        let deleted = tx.execute("DELETE FROM projects WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::NotFound {
                entity: "Project",
                id,
            });
        }
        tx.commit()?;
        tracing::debug!(id, "project deleted");
        Ok(())
    }

    // --- notes ---

    /// Create a note under an existing project. A missing project is reported
    /// before the content is validated.
    pub fn create_note(&self, project_id: i64, input: CreateNoteInput) -> Result<ProjectNote> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        project_exists(&tx, project_id)?;
        let content = required(input.content, "content")?;
        let now = Utc::now();
        tx.execute(
            "INSERT INTO project_notes (project_id, content, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![project_id, content, now, now],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(ProjectNote {
            id,
            project_id,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// All notes owned by the project, oldest first. The project itself must
    /// exist; a project without notes yields an empty list.
    pub fn list_notes(&self, project_id: i64) -> Result<Vec<ProjectNote>> {
        let conn = self.conn();
        project_exists(&conn, project_id)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM project_notes WHERE project_id = ?1 ORDER BY id"
        ))?;
        let notes = stmt
            .query_map([project_id], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn get_note(&self, id: i64) -> Result<ProjectNote> {
        self.conn()
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM project_notes WHERE id = ?1"),
                [id],
                row_to_note,
            )
            .optional()?
            .ok_or(Error::NotFound { entity: "Note", id })
    }

    pub fn update_note(&self, id: i64, update: UpdateNoteInput) -> Result<ProjectNote> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let mut note = tx
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM project_notes WHERE id = ?1"),
                [id],
                row_to_note,
            )
            .optional()?
            .ok_or(Error::NotFound { entity: "Note", id })?;

        if let Some(content) = update.content {
            note.content = content;
        }
        note.updated_at = Utc::now();

        tx.execute(
            "UPDATE project_notes SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![note.content, note.updated_at, id],
        )?;
        tx.commit()?;

        Ok(note)
    }

    pub fn delete_note(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM project_notes WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::NotFound { entity: "Note", id });
        }
        Ok(())
    }

    // --- dataset lifecycle ---

    /// Serialize the entire store into a standalone SQLite image.
    ///
    /// Runs `VACUUM INTO` a scratch file while holding the connection lock;
    /// every write path shares that lock, so nothing can interleave
    /// mid-snapshot.
    pub fn export_bytes(&self) -> Result<Vec<u8>> {
        let conn = self.conn();
        let scratch = self.path.with_extension("export");
        if scratch.exists() {
            std::fs::remove_file(&scratch)?;
        }
        let scratch_str = scratch.to_string_lossy().into_owned();
        conn.execute("VACUUM INTO ?1", [scratch_str.as_str()])?;
        let bytes = std::fs::read(&scratch)?;
        std::fs::remove_file(&scratch)?;
        Ok(bytes)
    }

    /// Drop every record and recreate the empty schema in one transaction.
    ///
    /// Identity counters restart at 1 afterwards. Irreversible.
    pub fn purge(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS project_notes; DROP TABLE IF EXISTS projects;")?;
        tx.execute_batch(schema::SCHEMA)?;
        tx.commit()?;
        tracing::info!("store purged and reinitialized");
        Ok(())
    }
}

fn required(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

fn project_exists(conn: &Connection, id: i64) -> Result<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM projects WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;
    if found.is_none() {
        return Err(Error::NotFound {
            entity: "Project",
            id,
        });
    }
    Ok(())
}

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: row.get("status")?,
        priority: row.get("priority")?,
        domain: row.get("domain")?,
        next_steps: row.get("next_steps")?,
        deadline: row.get("deadline")?,
        project_type: row.get("project_type")?,
        tooling: row.get("tooling")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<ProjectNote> {
    Ok(ProjectNote {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
