use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, Connection as SqliteConn, OpenFlags};

use crate::db::{seed_people, Person, PEOPLE_TABLE};
use crate::logger::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub database: PathBuf,
    pub inserted: usize,
}

/// Open (or create) the database at `path` and insert the fixture people in
/// one transaction. The table must already exist; nothing is written if any
/// insert fails.
pub fn seed(path: &Path) -> Result<SeedReport> {
    debug(&format!("sqlite: opening {}", path.display()));
    let mut sc = SqliteConn::open(path)
        .with_context(|| format!("failed to open sqlite database at {}", path.display()))?;
    debug("sqlite: opened");

    let inserted = insert_people(&mut sc, &seed_people())?;

    sc.close()
        .map_err(|(_, err)| err)
        .with_context(|| format!("failed to close {}", path.display()))?;

    Ok(SeedReport {
        database: path.to_path_buf(),
        inserted,
    })
}

fn insert_people(sc: &mut SqliteConn, people: &[Person]) -> Result<usize> {
    // Dropping an uncommitted transaction rolls it back.
    let tx = sc.transaction().context("failed to begin transaction")?;
    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {} (name, age) VALUES (?1, ?2)",
                PEOPLE_TABLE
            ))
            .with_context(|| format!("failed to prepare insert into {}", PEOPLE_TABLE))?;
        for person in people {
            stmt.execute(params![person.name, person.age])
                .with_context(|| format!("failed to insert {} ({})", person.name, person.age))?;
            trace(&format!("sqlite: inserted {} ({})", person.name, person.age));
        }
    }
    tx.commit().context("failed to commit seed transaction")?;
    Ok(people.len())
}

/// Row count of the people table. Does not create the file.
pub fn count_people(path: &Path) -> Result<i64> {
    let sc = SqliteConn::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open sqlite database at {}", path.display()))?;
    let count = sc.query_row(&format!("SELECT COUNT(*) FROM {}", PEOPLE_TABLE), [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(count)
}
