use crate::app_dirs::AppDirs;
use crate::clause::{Clause, KnowledgeGroup};
use crate::training::{TestType, TrainingCategory};
use chrono::{DateTime, Local};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-word, per-test-type training record
#[derive(Debug, Clone, PartialEq)]
pub struct WordStat {
    pub test_type: TestType,
    pub success_count: u32,
    pub fail_count: u32,
    pub last_training: DateTime<Local>,
}

impl WordStat {
    pub fn total_attempts(&self) -> u32 {
        self.success_count + self.fail_count
    }
}

/// Which categories an asterisk urgency marker applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteriskType {
    AllTypes,
    Meaning,
    Spelling,
    Listening,
}

impl AsteriskType {
    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(AsteriskType::AllTypes),
            1 => Some(AsteriskType::Meaning),
            2 => Some(AsteriskType::Spelling),
            3 => Some(AsteriskType::Listening),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    pub fn category(&self) -> Option<TrainingCategory> {
        match self {
            AsteriskType::AllTypes => None,
            AsteriskType::Meaning => Some(TrainingCategory::Meaning),
            AsteriskType::Spelling => Some(TrainingCategory::Spelling),
            AsteriskType::Listening => Some(TrainingCategory::Listening),
        }
    }
}

/// User- or system-set urgency flag forcing a word back into near-term
/// rotation, with per-category last-trained timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteriskMarker {
    pub marker_type: AsteriskType,
    pub meaning_last_train: Option<DateTime<Local>>,
    pub spelling_last_train: Option<DateTime<Local>>,
    pub listening_last_train: Option<DateTime<Local>>,
}

impl AsteriskMarker {
    pub fn new(marker_type: AsteriskType) -> Self {
        Self {
            marker_type,
            meaning_last_train: None,
            spelling_last_train: None,
            listening_last_train: None,
        }
    }

    pub fn last_train_for(&self, category: TrainingCategory) -> Option<DateTime<Local>> {
        match category {
            TrainingCategory::Meaning => self.meaning_last_train,
            TrainingCategory::Spelling => self.spelling_last_train,
            TrainingCategory::Listening => self.listening_last_train,
        }
    }
}

/// One word's aggregated training state as returned by the store
#[derive(Debug, Clone)]
pub struct WordTrainingData {
    pub id: i64,
    pub word: String,
    pub statistics: Vec<WordStat>,
    pub asterisk: Option<AsteriskMarker>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data-access surface the training engine depends on. Injected into the
/// session at construction; `StatsDb` is the production implementation.
pub trait WordStore {
    fn total_word_count(&self) -> StoreResult<usize>;

    /// Per-word statistics and asterisk data. An empty `test_types` slice
    /// means "all types". Words without any statistic are still returned.
    fn word_training_statistics(
        &self,
        test_types: &[TestType],
    ) -> StoreResult<Vec<WordTrainingData>>;

    fn clause_by_id(&self, id: i64) -> StoreResult<Option<Clause>>;

    /// `has_sound = Some(true)` restricts to words with a sound reference;
    /// `Some(false)` to words without one; `None` returns everything.
    fn clauses_by_filter(&self, has_sound: Option<bool>) -> StoreResult<Vec<Clause>>;

    fn add_or_update_statistic(
        &self,
        test_type: TestType,
        word_id: i64,
        success: bool,
    ) -> StoreResult<()>;

    /// Overwrite asterisk category timestamps. `None` leaves a column
    /// untouched; a timestamp is never unset by training activity.
    fn update_asterisk_timestamps(
        &self,
        word_id: i64,
        meaning: Option<DateTime<Local>>,
        spelling: Option<DateTime<Local>>,
        listening: Option<DateTime<Local>>,
    ) -> StoreResult<()>;

    /// Resolve a free-typed answer back to a word id, if any.
    fn clause_id_by_word(&self, word: &str) -> StoreResult<Option<i64>>;
}

/// SQLite-backed store for clauses, translations, training statistics and
/// asterisk markers
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Open the default database under the application state directory,
    /// creating tables if needed
    pub fn new() -> StoreResult<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("lexdrill.db"));
        Self::open(&db_path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS clauses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT NOT NULL,
                transcription TEXT NOT NULL DEFAULT '',
                context TEXT,
                sound TEXT,
                knowledge_group INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                clause_id INTEGER NOT NULL REFERENCES clauses(id) ON DELETE CASCADE,
                text TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS word_stats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                clause_id INTEGER NOT NULL REFERENCES clauses(id) ON DELETE CASCADE,
                test_type INTEGER NOT NULL,
                success_count INTEGER NOT NULL DEFAULT 0,
                fail_count INTEGER NOT NULL DEFAULT 0,
                last_training TEXT NOT NULL,
                UNIQUE(clause_id, test_type)
            );
            CREATE TABLE IF NOT EXISTS asterisks (
                clause_id INTEGER PRIMARY KEY REFERENCES clauses(id) ON DELETE CASCADE,
                marker_type INTEGER NOT NULL,
                meaning_last_train TEXT,
                spelling_last_train TEXT,
                listening_last_train TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_translations_clause ON translations(clause_id);
            CREATE INDEX IF NOT EXISTS idx_word_stats_clause ON word_stats(clause_id);
            CREATE INDEX IF NOT EXISTS idx_clauses_word ON clauses(word);
            "#,
        )?;
        Ok(StatsDb { conn })
    }

    /// Insert a new clause with its translations, returning its id
    pub fn add_clause(
        &mut self,
        word: &str,
        transcription: &str,
        translations: &[String],
        context: Option<&str>,
        sound: Option<&str>,
        group: KnowledgeGroup,
    ) -> StoreResult<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO clauses (word, transcription, context, sound, knowledge_group)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![word, transcription, context, sound, group.as_i64()],
        )?;
        let id = tx.last_insert_rowid();
        for t in translations {
            tx.execute(
                "INSERT INTO translations (clause_id, text) VALUES (?1, ?2)",
                params![id, t],
            )?;
        }
        tx.commit()?;
        Ok(id)
    }

    /// Delete a clause; statistics and asterisk rows go with it
    pub fn delete_clause(&self, id: i64) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM clauses WHERE id = ?1", params![id])?;
        // Explicit deletes rather than relying on foreign_keys being enabled
        self.conn
            .execute("DELETE FROM translations WHERE clause_id = ?1", params![id])?;
        self.conn
            .execute("DELETE FROM word_stats WHERE clause_id = ?1", params![id])?;
        self.conn
            .execute("DELETE FROM asterisks WHERE clause_id = ?1", params![id])?;
        Ok(())
    }

    /// Create or replace a word's asterisk marker (external editing surface)
    pub fn set_asterisk(&self, word_id: i64, marker_type: AsteriskType) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO asterisks (clause_id, marker_type)
            VALUES (?1, ?2)
            ON CONFLICT(clause_id) DO UPDATE SET marker_type = excluded.marker_type
            "#,
            params![word_id, marker_type.as_i64()],
        )?;
        Ok(())
    }

    /// Remove a word's asterisk marker (external editing surface)
    pub fn clear_asterisk(&self, word_id: i64) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM asterisks WHERE clause_id = ?1", params![word_id])?;
        Ok(())
    }

    fn translations_for(&self, clause_id: i64) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT text FROM translations WHERE clause_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map([clause_id], |row| row.get(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn clause_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Clause> {
        Ok(Clause {
            id: row.get(0)?,
            word: row.get(1)?,
            transcription: row.get(2)?,
            context: row.get(3)?,
            sound: row.get(4)?,
            group: KnowledgeGroup::from_i64(row.get(5)?),
            translations: Vec::new(),
        })
    }

    fn asterisks_by_clause(&self) -> StoreResult<HashMap<i64, AsteriskMarker>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT clause_id, marker_type, meaning_last_train, spelling_last_train, listening_last_train
            FROM asterisks
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let marker_type =
                AsteriskType::from_i64(row.get(1)?).unwrap_or(AsteriskType::AllTypes);
            Ok((
                id,
                AsteriskMarker {
                    marker_type,
                    meaning_last_train: parse_ts_opt(row.get::<_, Option<String>>(2)?),
                    spelling_last_train: parse_ts_opt(row.get::<_, Option<String>>(3)?),
                    listening_last_train: parse_ts_opt(row.get::<_, Option<String>>(4)?),
                },
            ))
        })?;
        let mut out = HashMap::new();
        for r in rows {
            let (id, marker) = r?;
            out.insert(id, marker);
        }
        Ok(out)
    }
}

impl WordStore for StatsDb {
    fn total_word_count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM clauses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn word_training_statistics(
        &self,
        test_types: &[TestType],
    ) -> StoreResult<Vec<WordTrainingData>> {
        let mut stats_by_clause: HashMap<i64, Vec<WordStat>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT clause_id, test_type, success_count, fail_count, last_training
                FROM word_stats
                "#,
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?;
            for r in rows {
                let (clause_id, raw_type, success_count, fail_count, last) = r?;
                let Some(test_type) = TestType::from_i64(raw_type) else {
                    continue;
                };
                if !test_types.is_empty() && !test_types.contains(&test_type) {
                    continue;
                }
                stats_by_clause.entry(clause_id).or_default().push(WordStat {
                    test_type,
                    success_count,
                    fail_count,
                    last_training: parse_ts(&last),
                });
            }
        }

        let mut asterisks = self.asterisks_by_clause()?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, word FROM clauses ORDER BY id")?;
        let rows =
            stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut out = Vec::new();
        for r in rows {
            let (id, word) = r?;
            out.push(WordTrainingData {
                id,
                word,
                statistics: stats_by_clause.remove(&id).unwrap_or_default(),
                asterisk: asterisks.remove(&id),
            });
        }
        Ok(out)
    }

    fn clause_by_id(&self, id: i64) -> StoreResult<Option<Clause>> {
        let clause = self
            .conn
            .query_row(
                r#"
                SELECT id, word, transcription, context, sound, knowledge_group
                FROM clauses WHERE id = ?1
                "#,
                params![id],
                Self::clause_from_row,
            )
            .optional()?;
        match clause {
            Some(mut c) => {
                c.translations = self.translations_for(c.id)?;
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    fn clauses_by_filter(&self, has_sound: Option<bool>) -> StoreResult<Vec<Clause>> {
        let sql = match has_sound {
            None => {
                "SELECT id, word, transcription, context, sound, knowledge_group \
                 FROM clauses ORDER BY id"
            }
            Some(true) => {
                "SELECT id, word, transcription, context, sound, knowledge_group \
                 FROM clauses WHERE sound IS NOT NULL AND sound != '' ORDER BY id"
            }
            Some(false) => {
                "SELECT id, word, transcription, context, sound, knowledge_group \
                 FROM clauses WHERE sound IS NULL OR sound = '' ORDER BY id"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], Self::clause_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            let mut c = r?;
            c.translations = self.translations_for(c.id)?;
            out.push(c);
        }
        Ok(out)
    }

    fn add_or_update_statistic(
        &self,
        test_type: TestType,
        word_id: i64,
        success: bool,
    ) -> StoreResult<()> {
        let now = Local::now().to_rfc3339();
        let (success_inc, fail_inc) = if success { (1, 0) } else { (0, 1) };
        self.conn.execute(
            r#"
            INSERT INTO word_stats (clause_id, test_type, success_count, fail_count, last_training)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(clause_id, test_type) DO UPDATE SET
                success_count = success_count + ?3,
                fail_count = fail_count + ?4,
                last_training = ?5
            "#,
            params![word_id, test_type.as_i64(), success_inc, fail_inc, now],
        )?;
        Ok(())
    }

    fn update_asterisk_timestamps(
        &self,
        word_id: i64,
        meaning: Option<DateTime<Local>>,
        spelling: Option<DateTime<Local>>,
        listening: Option<DateTime<Local>>,
    ) -> StoreResult<()> {
        // Only words that already carry a marker are touched; training
        // never creates or clears a marker
        self.conn.execute(
            r#"
            UPDATE asterisks SET
                meaning_last_train = COALESCE(?2, meaning_last_train),
                spelling_last_train = COALESCE(?3, spelling_last_train),
                listening_last_train = COALESCE(?4, listening_last_train)
            WHERE clause_id = ?1
            "#,
            params![
                word_id,
                meaning.map(|t| t.to_rfc3339()),
                spelling.map(|t| t.to_rfc3339()),
                listening.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    fn clause_id_by_word(&self, word: &str) -> StoreResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM clauses WHERE word = ?1 COLLATE NOCASE ORDER BY id LIMIT 1",
                params![word],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

fn parse_ts(s: &str) -> DateTime<Local> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Local))
        .unwrap_or_else(|e| {
            warn!("unparseable timestamp '{s}' in database, treating as now: {e}");
            Local::now()
        })
}

fn parse_ts_opt(s: Option<String>) -> Option<DateTime<Local>> {
    s.map(|s| parse_ts(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_word(db: &mut StatsDb, word: &str, translations: &[&str]) -> i64 {
        let translations: Vec<String> = translations.iter().map(|t| t.to_string()).collect();
        db.add_clause(word, "", &translations, None, None, KnowledgeGroup::New)
            .unwrap()
    }

    #[test]
    fn test_add_and_fetch_clause() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = db
            .add_clause(
                "hund",
                "[hʉn]",
                &["dog".to_string(), "hound".to_string()],
                Some("en stor hund"),
                Some("hund.mp3"),
                KnowledgeGroup::Learning,
            )
            .unwrap();

        let clause = db.clause_by_id(id).unwrap().unwrap();
        assert_eq!(clause.word, "hund");
        assert_eq!(clause.transcription, "[hʉn]");
        assert_eq!(clause.translations, vec!["dog", "hound"]);
        assert_eq!(clause.context.as_deref(), Some("en stor hund"));
        assert_eq!(clause.sound.as_deref(), Some("hund.mp3"));
        assert_eq!(clause.group, KnowledgeGroup::Learning);

        assert_eq!(db.clause_by_id(id + 1).unwrap(), None);
    }

    #[test]
    fn test_total_word_count() {
        let mut db = StatsDb::open_in_memory().unwrap();
        assert_eq!(db.total_word_count().unwrap(), 0);
        add_word(&mut db, "en", &["one"]);
        add_word(&mut db, "to", &["two"]);
        assert_eq!(db.total_word_count().unwrap(), 2);
    }

    #[test]
    fn test_statistic_accumulates() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "hund", &["dog"]);

        for _ in 0..3 {
            db.add_or_update_statistic(TestType::WordToTranslation, id, true)
                .unwrap();
        }
        for _ in 0..2 {
            db.add_or_update_statistic(TestType::WordToTranslation, id, false)
                .unwrap();
        }

        let data = db
            .word_training_statistics(&[TestType::WordToTranslation])
            .unwrap();
        let entry = data.iter().find(|d| d.id == id).unwrap();
        assert_eq!(entry.statistics.len(), 1);
        assert_eq!(entry.statistics[0].success_count, 3);
        assert_eq!(entry.statistics[0].fail_count, 2);
    }

    #[test]
    fn test_statistics_filtered_by_test_type() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "hund", &["dog"]);
        db.add_or_update_statistic(TestType::Listening, id, true)
            .unwrap();
        db.add_or_update_statistic(TestType::Sprint, id, false)
            .unwrap();

        let listening = db.word_training_statistics(&[TestType::Listening]).unwrap();
        let entry = listening.iter().find(|d| d.id == id).unwrap();
        assert_eq!(entry.statistics.len(), 1);
        assert_eq!(entry.statistics[0].test_type, TestType::Listening);

        // Empty filter means all types
        let all = db.word_training_statistics(&[]).unwrap();
        let entry = all.iter().find(|d| d.id == id).unwrap();
        assert_eq!(entry.statistics.len(), 2);
    }

    #[test]
    fn test_untested_words_still_listed() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "fersk", &["fresh"]);

        let data = db
            .word_training_statistics(&[TestType::WordToTranslation])
            .unwrap();
        let entry = data.iter().find(|d| d.id == id).unwrap();
        assert!(entry.statistics.is_empty());
        assert!(entry.asterisk.is_none());
    }

    #[test]
    fn test_asterisk_timestamps_update_only_existing_marker() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let marked = add_word(&mut db, "hund", &["dog"]);
        let unmarked = add_word(&mut db, "katt", &["cat"]);
        db.set_asterisk(marked, AsteriskType::Meaning).unwrap();

        let now = Local::now();
        db.update_asterisk_timestamps(marked, Some(now), None, None)
            .unwrap();
        db.update_asterisk_timestamps(unmarked, Some(now), None, None)
            .unwrap();

        let data = db.word_training_statistics(&[]).unwrap();
        let marked_entry = data.iter().find(|d| d.id == marked).unwrap();
        let marker = marked_entry.asterisk.as_ref().unwrap();
        assert_eq!(marker.marker_type, AsteriskType::Meaning);
        assert!(marker.meaning_last_train.is_some());
        assert!(marker.spelling_last_train.is_none());

        let unmarked_entry = data.iter().find(|d| d.id == unmarked).unwrap();
        assert!(unmarked_entry.asterisk.is_none());
    }

    #[test]
    fn test_asterisk_timestamp_never_unset_by_none() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "hund", &["dog"]);
        db.set_asterisk(id, AsteriskType::AllTypes).unwrap();

        let now = Local::now();
        db.update_asterisk_timestamps(id, Some(now), Some(now), None)
            .unwrap();
        db.update_asterisk_timestamps(id, None, Some(now), None)
            .unwrap();

        let data = db.word_training_statistics(&[]).unwrap();
        let marker = data
            .iter()
            .find(|d| d.id == id)
            .unwrap()
            .asterisk
            .clone()
            .unwrap();
        assert!(marker.meaning_last_train.is_some());
        assert!(marker.spelling_last_train.is_some());
        assert!(marker.listening_last_train.is_none());
    }

    #[test]
    fn test_clauses_by_sound_filter() {
        let mut db = StatsDb::open_in_memory().unwrap();
        db.add_clause(
            "hund",
            "",
            &["dog".to_string()],
            None,
            Some("hund.mp3"),
            KnowledgeGroup::New,
        )
        .unwrap();
        db.add_clause("katt", "", &["cat".to_string()], None, None, KnowledgeGroup::New)
            .unwrap();
        db.add_clause("mus", "", &["mouse".to_string()], None, Some(""), KnowledgeGroup::New)
            .unwrap();

        let with_sound = db.clauses_by_filter(Some(true)).unwrap();
        assert_eq!(with_sound.len(), 1);
        assert_eq!(with_sound[0].word, "hund");

        let without_sound = db.clauses_by_filter(Some(false)).unwrap();
        assert_eq!(without_sound.len(), 2);

        assert_eq!(db.clauses_by_filter(None).unwrap().len(), 3);
    }

    #[test]
    fn test_clause_id_by_word() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "Hund", &["dog"]);

        assert_eq!(db.clause_id_by_word("hund").unwrap(), Some(id));
        assert_eq!(db.clause_id_by_word("HUND").unwrap(), Some(id));
        assert_eq!(db.clause_id_by_word("katt").unwrap(), None);
    }

    #[test]
    fn test_delete_clause_cascades() {
        let mut db = StatsDb::open_in_memory().unwrap();
        let id = add_word(&mut db, "hund", &["dog"]);
        db.add_or_update_statistic(TestType::Sprint, id, true)
            .unwrap();
        db.set_asterisk(id, AsteriskType::AllTypes).unwrap();

        db.delete_clause(id).unwrap();

        assert_eq!(db.total_word_count().unwrap(), 0);
        assert!(db.word_training_statistics(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("lexdrill.db");

        {
            let mut db = StatsDb::open(&path).unwrap();
            add_word(&mut db, "hund", &["dog"]);
        }

        let db = StatsDb::open(&path).unwrap();
        assert_eq!(db.total_word_count().unwrap(), 1);
    }

    #[test]
    fn test_corrupt_timestamp_falls_back_to_now() {
        let now = Local::now();
        assert_eq!(parse_ts(&now.to_rfc3339()), now);

        let before = Local::now();
        let parsed = parse_ts("not-a-timestamp");
        assert!(parsed >= before && parsed <= Local::now());
    }
}
