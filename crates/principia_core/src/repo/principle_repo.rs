//! Principle/tactic repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the data access contract over `principles` and `tactics`.
//! - Assemble `PrincipleWithTactics` projections at read time.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Listings order by `"order"` ascending, ties by insertion (`rowid`).
//! - Deleting a principle removes its tactics in the same transaction.
//! - A tactic is only inserted under a principle that exists in the same
//!   transaction.
//! - Deleting an absent id is a successful no-op.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::principle::{
    NewPrinciple, Principle, PrincipleColor, PrincipleId, PrincipleWithTactics,
};
use crate::model::tactic::{NewTactic, Tactic, TacticId};
use crate::model::validation::ValidationErrors;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PRINCIPLE_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    color,
    \"order\"
FROM principles";

const TACTIC_SELECT_SQL: &str = "SELECT
    id,
    principle_id,
    title,
    description,
    is_effective,
    \"order\"
FROM tactics";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for principle/tactic persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationErrors),
    Db(DbError),
    /// Referenced parent principle does not exist.
    PrincipleNotFound(PrincipleId),
    InvalidData(String),
}

impl RepoError {
    /// Whether this error is caller input rather than a store fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::PrincipleNotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::PrincipleNotFound(id) => write!(f, "principle not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::PrincipleNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for principles and tactics.
pub trait PrincipleRepository {
    /// Lists every principle with its tactics; principles without tactics
    /// carry an empty list.
    fn list_principles_with_tactics(&self) -> RepoResult<Vec<PrincipleWithTactics>>;
    /// Returns `None` when no principle has this id.
    fn get_principle_with_tactics(&self, id: PrincipleId)
        -> RepoResult<Option<PrincipleWithTactics>>;
    fn create_principle(&self, input: &NewPrinciple) -> RepoResult<Principle>;
    /// Removes the principle and all of its tactics atomically.
    fn delete_principle(&self, id: PrincipleId) -> RepoResult<()>;
    /// Fails with `PrincipleNotFound` when the parent is absent.
    fn create_tactic(&self, input: &NewTactic) -> RepoResult<Tactic>;
    fn delete_tactic(&self, id: TacticId) -> RepoResult<()>;
}

/// SQLite-backed principle repository.
pub struct SqlitePrincipleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePrincipleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PrincipleRepository for SqlitePrincipleRepository<'_> {
    fn list_principles_with_tactics(&self) -> RepoResult<Vec<PrincipleWithTactics>> {
        // One read transaction so both selects see the same snapshot.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let principles = query_principles(&tx)?;
        let tactics = query_all_tactics(&tx)?;
        tx.commit()?;

        Ok(group_tactics(principles, tactics))
    }

    fn get_principle_with_tactics(
        &self,
        id: PrincipleId,
    ) -> RepoResult<Option<PrincipleWithTactics>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let Some(principle) = query_principle(&tx, id)? else {
            return Ok(None);
        };
        let tactics = query_tactics_for(&tx, id)?;
        tx.commit()?;

        Ok(Some(PrincipleWithTactics { principle, tactics }))
    }

    fn create_principle(&self, input: &NewPrinciple) -> RepoResult<Principle> {
        let principle = Principle::create(input.clone());
        insert_principle(self.conn, &principle)?;
        Ok(principle)
    }

    fn delete_principle(&self, id: PrincipleId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM tactics WHERE principle_id = ?1;",
            [id.to_string()],
        )?;
        tx.execute("DELETE FROM principles WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(())
    }

    fn create_tactic(&self, input: &NewTactic) -> RepoResult<Tactic> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !principle_exists(&tx, input.principle_id)? {
            return Err(RepoError::PrincipleNotFound(input.principle_id));
        }

        let tactic = Tactic::create(input.clone());
        insert_tactic(&tx, &tactic)?;
        tx.commit()?;
        Ok(tactic)
    }

    fn delete_tactic(&self, id: TacticId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tactics WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

pub(crate) fn insert_principle(conn: &Connection, principle: &Principle) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO principles (
            id,
            title,
            description,
            category,
            color,
            \"order\"
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            principle.id.to_string(),
            principle.title.as_str(),
            principle.description.as_str(),
            principle.category.as_str(),
            principle.color.as_str(),
            principle.order,
        ],
    )?;
    Ok(())
}

pub(crate) fn insert_tactic(conn: &Connection, tactic: &Tactic) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO tactics (
            id,
            principle_id,
            title,
            description,
            is_effective,
            \"order\"
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            tactic.id.to_string(),
            tactic.principle_id.to_string(),
            tactic.title.as_str(),
            tactic.description.as_deref(),
            bool_to_int(tactic.is_effective),
            tactic.order,
        ],
    )?;
    Ok(())
}

pub(crate) fn count_principles(conn: &Connection) -> RepoResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM principles;", [], |row| row.get(0))?;
    Ok(count)
}

fn group_tactics(
    principles: Vec<Principle>,
    tactics: Vec<Tactic>,
) -> Vec<PrincipleWithTactics> {
    let mut by_principle: HashMap<PrincipleId, Vec<Tactic>> = HashMap::new();
    for tactic in tactics {
        by_principle
            .entry(tactic.principle_id)
            .or_default()
            .push(tactic);
    }

    principles
        .into_iter()
        .map(|principle| {
            let tactics = by_principle.remove(&principle.id).unwrap_or_default();
            PrincipleWithTactics { principle, tactics }
        })
        .collect()
}

fn query_principles(conn: &Connection) -> RepoResult<Vec<Principle>> {
    let mut stmt = conn.prepare(&format!(
        "{PRINCIPLE_SELECT_SQL} ORDER BY \"order\" ASC, rowid ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut principles = Vec::new();
    while let Some(row) = rows.next()? {
        principles.push(parse_principle_row(row)?);
    }
    Ok(principles)
}

fn query_principle(conn: &Connection, id: PrincipleId) -> RepoResult<Option<Principle>> {
    let mut stmt = conn.prepare(&format!("{PRINCIPLE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_principle_row(row)?));
    }
    Ok(None)
}

fn query_all_tactics(conn: &Connection) -> RepoResult<Vec<Tactic>> {
    let mut stmt = conn.prepare(&format!(
        "{TACTIC_SELECT_SQL} ORDER BY \"order\" ASC, rowid ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut tactics = Vec::new();
    while let Some(row) = rows.next()? {
        tactics.push(parse_tactic_row(row)?);
    }
    Ok(tactics)
}

fn query_tactics_for(conn: &Connection, principle_id: PrincipleId) -> RepoResult<Vec<Tactic>> {
    let mut stmt = conn.prepare(&format!(
        "{TACTIC_SELECT_SQL}
         WHERE principle_id = ?1
         ORDER BY \"order\" ASC, rowid ASC;"
    ))?;
    let mut rows = stmt.query([principle_id.to_string()])?;
    let mut tactics = Vec::new();
    while let Some(row) = rows.next()? {
        tactics.push(parse_tactic_row(row)?);
    }
    Ok(tactics)
}

fn principle_exists(conn: &Connection, id: PrincipleId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM principles WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_principle_row(row: &Row<'_>) -> RepoResult<Principle> {
    let id = parse_uuid(row.get("id")?, "principles.id")?;

    let color_text: String = row.get("color")?;
    let color = PrincipleColor::parse(&color_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid color `{color_text}` in principles.color"))
    })?;

    Ok(Principle {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        color,
        order: row.get("order")?,
    })
}

fn parse_tactic_row(row: &Row<'_>) -> RepoResult<Tactic> {
    let id = parse_uuid(row.get("id")?, "tactics.id")?;
    let principle_id = parse_uuid(row.get("principle_id")?, "tactics.principle_id")?;

    let is_effective = match row.get::<_, i64>("is_effective")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_effective value `{other}` in tactics.is_effective"
            )));
        }
    };

    Ok(Tactic {
        id,
        principle_id,
        title: row.get("title")?,
        description: row.get("description")?,
        is_effective,
        order: row.get("order")?,
    })
}

fn parse_uuid(value: String, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(&value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
