use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 1;

pub fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id_document         INTEGER PRIMARY KEY AUTOINCREMENT,
            title               TEXT,
            abstract            TEXT,
            keywords            TEXT,
            author              TEXT,
            published_date      DATE,
            doi                 TEXT UNIQUE,
            eid                 TEXT UNIQUE,
            publication_name    TEXT,
            issn                TEXT,
            eissn               TEXT,
            type                TEXT,
            sub_type            TEXT,
            search_query        TEXT,
            source              TEXT,
            affiliation_country TEXT,
            citedby_count       INTEGER,
            openaccess          TEXT
        );

        CREATE TABLE IF NOT EXISTS issn_publisher (
            issn      TEXT NOT NULL PRIMARY KEY,
            publisher TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS eissn_publisher (
            eissn     TEXT NOT NULL PRIMARY KEY,
            publisher TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS issn_impact (
            issn                       TEXT NOT NULL PRIMARY KEY,
            citeScoreCurrentMetric     REAL NOT NULL,
            citeScoreCurrentMetricYear INTEGER NOT NULL,
            citeScoreTracker           REAL NOT NULL,
            citeScoreTrackerYear       INTEGER NOT NULL,
            sjrMetric                  REAL NOT NULL,
            sjrYear                    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS doi_eurl (
            doi  TEXT NOT NULL PRIMARY KEY,
            eurl TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS continents (
            affiliation_country TEXT NOT NULL PRIMARY KEY,
            continent           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS study_selection (
            id          INTEGER PRIMARY KEY,
            id_document INTEGER NOT NULL REFERENCES documents(id_document),
            status      INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_issn ON documents(issn);
        CREATE INDEX IF NOT EXISTS idx_documents_eissn ON documents(eissn);
        CREATE INDEX IF NOT EXISTS idx_documents_country ON documents(affiliation_country);
        CREATE INDEX IF NOT EXISTS idx_study_selection_document ON study_selection(id_document);
        ",
    )?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
