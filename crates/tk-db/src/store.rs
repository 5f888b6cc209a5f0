//! Batched upsert store (C5): the Postgres-facing half of the pipeline.
//!
//! Every write method is idempotent (§4.5 — re-running a page is always
//! safe) and chunks at 1000 rows per `QueryBuilder` the way
//! `hearing_segment.rs`'s `create_batch` does, since a single `push_values`
//! call is bounded by Postgres's parameter count.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};

use tk_core::{Case, CaseActor, CaseDossier, Category, Decision, Dossier, Faction, Person, Vote};

use crate::DbError;

const CHUNK_SIZE: usize = 1000;

/// Connection pool wrapper around the nine persisted tables (§3's entity
/// set minus `Document`, which is reference-only).
#[derive(Clone)]
pub struct Store(PgPool);

impl Store {
    /// # Errors
    /// Returns `DbError` if the pool cannot be established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
        Ok(Self(pool))
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.0
    }

    /// Creates every table, the `pg_trgm` extension, its trigram indices, and
    /// the two reporting materialized views, all `IF NOT EXISTS` so startup
    /// is idempotent (§6).
    ///
    /// # Errors
    /// Returns `DbError` if any DDL statement fails.
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::raw_sql(
            r"
            CREATE EXTENSION IF NOT EXISTS pg_trgm;

            CREATE TABLE IF NOT EXISTS persons (
                id TEXT PRIMARY KEY,
                first_name TEXT,
                infix TEXT,
                last_name TEXT NOT NULL,
                initials TEXT,
                born_on TIMESTAMPTZ,
                died_on TIMESTAMPTZ,
                residence TEXT
            );

            CREATE TABLE IF NOT EXISTS factions (
                id TEXT PRIMARY KEY,
                number TEXT,
                abbreviation TEXT NOT NULL,
                name_nl TEXT NOT NULL,
                name_en TEXT,
                seats INTEGER,
                votes INTEGER,
                active_from TIMESTAMPTZ,
                active_to TIMESTAMPTZ,
                logo_bytes BYTEA
            );

            CREATE TABLE IF NOT EXISTS dossiers (
                id TEXT PRIMARY KEY,
                number TEXT NOT NULL,
                suffix TEXT,
                title TEXT,
                highest_sequence INTEGER NOT NULL DEFAULT 0,
                closed BOOLEAN NOT NULL DEFAULT FALSE,
                chamber TEXT
            );

            CREATE TABLE IF NOT EXISTS cases (
                id TEXT PRIMARY KEY,
                nummer TEXT NOT NULL,
                kind TEXT NOT NULL,
                subject TEXT,
                title TEXT,
                status TEXT,
                started_at TIMESTAMPTZ,
                session_year TEXT,
                organization TEXT,
                finished BOOLEAN NOT NULL DEFAULT FALSE,
                updated_at TIMESTAMPTZ NOT NULL,
                source_updated_at TIMESTAMPTZ,
                deleted BOOLEAN NOT NULL DEFAULT FALSE,
                bullet_points JSONB,
                source_document_url TEXT,
                source_document_key TEXT
            );

            CREATE TABLE IF NOT EXISTS case_dossiers (
                case_id TEXT NOT NULL REFERENCES cases(id),
                dossier_id TEXT NOT NULL REFERENCES dossiers(id),
                PRIMARY KEY (case_id, dossier_id)
            );

            CREATE TABLE IF NOT EXISTS case_actors (
                id TEXT PRIMARY KEY,
                case_id TEXT NOT NULL REFERENCES cases(id),
                person_id TEXT REFERENCES persons(id),
                faction_id TEXT REFERENCES factions(id),
                relation TEXT NOT NULL,
                actor_name TEXT
            );

            CREATE TABLE IF NOT EXISTS decisions (
                id TEXT PRIMARY KEY,
                case_id TEXT NOT NULL REFERENCES cases(id),
                vote_kind TEXT NOT NULL,
                decision_kind TEXT,
                decision_text TEXT,
                status TEXT,
                ordering_within_agenda INTEGER,
                updated_at TIMESTAMPTZ NOT NULL
            );

            CREATE TABLE IF NOT EXISTS votes (
                id TEXT PRIMARY KEY,
                decision_id TEXT NOT NULL REFERENCES decisions(id),
                person_id TEXT REFERENCES persons(id),
                faction_id TEXT REFERENCES factions(id),
                choice TEXT NOT NULL,
                faction_size INTEGER,
                actor_name TEXT,
                actor_faction_name TEXT,
                is_correction BOOLEAN NOT NULL DEFAULT FALSE
            );

            CREATE TABLE IF NOT EXISTS categories (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                kind TEXT,
                keywords JSONB NOT NULL
            );

            CREATE TABLE IF NOT EXISTS case_categories (
                case_id TEXT NOT NULL REFERENCES cases(id),
                category_id UUID NOT NULL REFERENCES categories(id),
                PRIMARY KEY (case_id, category_id)
            );

            CREATE INDEX IF NOT EXISTS idx_cases_subject_trgm ON cases USING GIN (subject gin_trgm_ops);
            CREATE INDEX IF NOT EXISTS idx_cases_nummer_trgm ON cases USING GIN (nummer gin_trgm_ops);
            CREATE INDEX IF NOT EXISTS idx_cases_title_trgm ON cases USING GIN (title gin_trgm_ops);

            CREATE MATERIALIZED VIEW IF NOT EXISTS majority_party_votes AS
            SELECT d.case_id,
                   v.faction_id,
                   mode() WITHIN GROUP (ORDER BY v.choice) AS majority_choice,
                   COUNT(*) AS vote_count
            FROM votes v
            JOIN decisions d ON d.id = v.decision_id
            WHERE v.faction_id IS NOT NULL
            GROUP BY d.case_id, v.faction_id;

            CREATE UNIQUE INDEX IF NOT EXISTS idx_majority_party_votes_case_faction
                ON majority_party_votes (case_id, faction_id);

            CREATE MATERIALIZED VIEW IF NOT EXISTS party_likeness_per_motion AS
            SELECT a.case_id,
                   a.faction_id AS faction_a_id,
                   b.faction_id AS faction_b_id,
                   (a.majority_choice = b.majority_choice) AS agrees
            FROM majority_party_votes a
            JOIN majority_party_votes b
              ON a.case_id = b.case_id AND a.faction_id < b.faction_id;

            CREATE UNIQUE INDEX IF NOT EXISTS idx_party_likeness_case_factions
                ON party_likeness_per_motion (case_id, faction_a_id, faction_b_id);
            ",
        )
        .execute(&self.0)
        .await?;
        Ok(())
    }

    /// Truncates every table (`--clean-db`, §6). Cascades so FK order doesn't
    /// matter.
    ///
    /// # Errors
    /// Returns `DbError` if the truncate fails.
    pub async fn clean(&self) -> Result<(), DbError> {
        sqlx::raw_sql(
            r"
            TRUNCATE TABLE
                case_categories, case_actors, case_dossiers, votes, decisions,
                cases, dossiers, factions, persons, categories
            CASCADE;
            ",
        )
        .execute(&self.0)
        .await?;
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_persons(&self, persons: &[Person]) -> Result<(), DbError> {
        for chunk in persons.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                "INSERT INTO persons (id, first_name, infix, last_name, initials, born_on, died_on, residence) ",
            );
            qb.push_values(chunk, |mut b, p| {
                b.push_bind(&p.id)
                    .push_bind(&p.first_name)
                    .push_bind(&p.infix)
                    .push_bind(&p.last_name)
                    .push_bind(&p.initials)
                    .push_bind(p.born_on)
                    .push_bind(p.died_on)
                    .push_bind(&p.residence);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    first_name = EXCLUDED.first_name,
                    infix = EXCLUDED.infix,
                    last_name = EXCLUDED.last_name,
                    initials = EXCLUDED.initials,
                    born_on = EXCLUDED.born_on,
                    died_on = EXCLUDED.died_on,
                    residence = EXCLUDED.residence
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_factions(&self, factions: &[Faction]) -> Result<(), DbError> {
        for chunk in factions.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                "INSERT INTO factions (id, number, abbreviation, name_nl, name_en, seats, votes, active_from, active_to, logo_bytes) ",
            );
            qb.push_values(chunk, |mut b, f| {
                b.push_bind(&f.id)
                    .push_bind(&f.number)
                    .push_bind(&f.abbreviation)
                    .push_bind(&f.name_nl)
                    .push_bind(&f.name_en)
                    .push_bind(f.seats)
                    .push_bind(f.votes)
                    .push_bind(f.active_from)
                    .push_bind(f.active_to)
                    .push_bind(&f.logo_bytes);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    number = EXCLUDED.number,
                    abbreviation = EXCLUDED.abbreviation,
                    name_nl = EXCLUDED.name_nl,
                    name_en = EXCLUDED.name_en,
                    seats = EXCLUDED.seats,
                    votes = EXCLUDED.votes,
                    active_from = EXCLUDED.active_from,
                    active_to = EXCLUDED.active_to,
                    logo_bytes = COALESCE(EXCLUDED.logo_bytes, factions.logo_bytes)
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_dossiers(&self, dossiers: &[Dossier]) -> Result<(), DbError> {
        for chunk in dossiers.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                "INSERT INTO dossiers (id, number, suffix, title, highest_sequence, closed, chamber) ",
            );
            qb.push_values(chunk, |mut b, d| {
                b.push_bind(&d.id)
                    .push_bind(&d.number)
                    .push_bind(&d.suffix)
                    .push_bind(&d.title)
                    .push_bind(d.highest_sequence)
                    .push_bind(d.closed)
                    .push_bind(&d.chamber);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    number = EXCLUDED.number,
                    suffix = EXCLUDED.suffix,
                    title = EXCLUDED.title,
                    highest_sequence = EXCLUDED.highest_sequence,
                    closed = EXCLUDED.closed,
                    chamber = EXCLUDED.chamber
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_cases(&self, cases: &[Case]) -> Result<(), DbError> {
        for chunk in cases.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                r"INSERT INTO cases (id, nummer, kind, subject, title, status, started_at,
                    session_year, organization, finished, updated_at, source_updated_at,
                    deleted, bullet_points, source_document_url, source_document_key) ",
            );
            qb.push_values(chunk, |mut b, c| {
                b.push_bind(&c.id)
                    .push_bind(&c.nummer)
                    .push_bind(c.kind().as_str())
                    .push_bind(&c.subject)
                    .push_bind(&c.title)
                    .push_bind(&c.status)
                    .push_bind(c.started_at)
                    .push_bind(&c.session_year)
                    .push_bind(&c.organization)
                    .push_bind(c.finished)
                    .push_bind(c.updated_at)
                    .push_bind(c.source_updated_at)
                    .push_bind(c.deleted)
                    .push_bind(c.bullet_points.clone())
                    .push_bind(&c.source_document_url)
                    .push_bind(&c.source_document_key);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    nummer = EXCLUDED.nummer,
                    kind = EXCLUDED.kind,
                    subject = EXCLUDED.subject,
                    title = EXCLUDED.title,
                    status = EXCLUDED.status,
                    started_at = EXCLUDED.started_at,
                    session_year = EXCLUDED.session_year,
                    organization = EXCLUDED.organization,
                    finished = EXCLUDED.finished,
                    updated_at = EXCLUDED.updated_at,
                    source_updated_at = EXCLUDED.source_updated_at,
                    deleted = EXCLUDED.deleted,
                    source_document_url = COALESCE(EXCLUDED.source_document_url, cases.source_document_url),
                    source_document_key = COALESCE(EXCLUDED.source_document_key, cases.source_document_key)
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_case_dossiers(&self, links: &[CaseDossier]) -> Result<(), DbError> {
        for chunk in links.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new("INSERT INTO case_dossiers (case_id, dossier_id) ");
            qb.push_values(chunk, |mut b, l| {
                b.push_bind(&l.case_id).push_bind(&l.dossier_id);
            });
            qb.push(" ON CONFLICT (case_id, dossier_id) DO NOTHING");
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_case_actors(&self, actors: &[CaseActor]) -> Result<(), DbError> {
        for chunk in actors.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                "INSERT INTO case_actors (id, case_id, person_id, faction_id, relation, actor_name) ",
            );
            qb.push_values(chunk, |mut b, a| {
                b.push_bind(&a.id)
                    .push_bind(&a.case_id)
                    .push_bind(&a.person_id)
                    .push_bind(&a.faction_id)
                    .push_bind(a.relation.0.as_str())
                    .push_bind(&a.actor_name);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    case_id = EXCLUDED.case_id,
                    person_id = EXCLUDED.person_id,
                    faction_id = EXCLUDED.faction_id,
                    relation = EXCLUDED.relation,
                    actor_name = EXCLUDED.actor_name
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_decisions(&self, decisions: &[Decision]) -> Result<(), DbError> {
        for chunk in decisions.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                r"INSERT INTO decisions (id, case_id, vote_kind, decision_kind, decision_text,
                    status, ordering_within_agenda, updated_at) ",
            );
            qb.push_values(chunk, |mut b, d| {
                b.push_bind(&d.id)
                    .push_bind(&d.case_id)
                    .push_bind(d.vote_kind().as_str())
                    .push_bind(&d.decision_kind)
                    .push_bind(&d.decision_text)
                    .push_bind(&d.status)
                    .push_bind(d.ordering_within_agenda)
                    .push_bind(d.updated_at);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    case_id = EXCLUDED.case_id,
                    vote_kind = EXCLUDED.vote_kind,
                    decision_kind = EXCLUDED.decision_kind,
                    decision_text = EXCLUDED.decision_text,
                    status = EXCLUDED.status,
                    ordering_within_agenda = EXCLUDED.ordering_within_agenda,
                    updated_at = EXCLUDED.updated_at
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_votes(&self, votes: &[Vote]) -> Result<(), DbError> {
        for chunk in votes.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new(
                r"INSERT INTO votes (id, decision_id, person_id, faction_id, choice,
                    faction_size, actor_name, actor_faction_name, is_correction) ",
            );
            qb.push_values(chunk, |mut b, v| {
                b.push_bind(&v.id)
                    .push_bind(&v.decision_id)
                    .push_bind(&v.person_id)
                    .push_bind(&v.faction_id)
                    .push_bind(v.choice().as_str())
                    .push_bind(v.faction_size)
                    .push_bind(&v.actor_name)
                    .push_bind(&v.actor_faction_name)
                    .push_bind(v.is_correction);
            });
            qb.push(
                r"
                ON CONFLICT (id) DO UPDATE SET
                    decision_id = EXCLUDED.decision_id,
                    person_id = EXCLUDED.person_id,
                    faction_id = EXCLUDED.faction_id,
                    choice = EXCLUDED.choice,
                    faction_size = EXCLUDED.faction_size,
                    actor_name = EXCLUDED.actor_name,
                    actor_faction_name = EXCLUDED.actor_faction_name,
                    is_correction = EXCLUDED.is_correction
                ",
            );
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// Seeds or updates the fixed category set (§4.6 E3). Small and
    /// config-driven, so no chunking.
    ///
    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_categories(&self, categories: &[Category]) -> Result<(), DbError> {
        if categories.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::new("INSERT INTO categories (id, name, kind, keywords) ");
        qb.push_values(categories, |mut b, c| {
            b.push_bind(c.id).push_bind(&c.name).push_bind(&c.kind).push_bind(c.keywords.clone());
        });
        qb.push(
            r"
            ON CONFLICT (name) DO UPDATE SET
                kind = EXCLUDED.kind,
                keywords = EXCLUDED.keywords
            ",
        );
        qb.build().execute(&self.0).await?;
        Ok(())
    }

    /// # Errors
    /// Returns `DbError` if the batch insert fails.
    pub async fn upsert_case_categories(&self, links: &[tk_core::CaseCategory]) -> Result<(), DbError> {
        for chunk in links.chunks(CHUNK_SIZE) {
            if chunk.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new("INSERT INTO case_categories (case_id, category_id) ");
            qb.push_values(chunk, |mut b, l| {
                b.push_bind(&l.case_id).push_bind(l.category_id);
            });
            qb.push(" ON CONFLICT (case_id, category_id) DO NOTHING");
            qb.build().execute(&self.0).await?;
        }
        Ok(())
    }

    /// Persists E1's extracted motion clauses and source-document URL.
    ///
    /// # Errors
    /// Returns `DbError` if the update fails.
    pub async fn update_case_bullet_points(
        &self,
        case_id: &str,
        bullet_points: &[String],
        source_document_url: &str,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE cases SET bullet_points = $1, source_document_url = $2 WHERE id = $3")
            .bind(sqlx::types::Json(bullet_points))
            .bind(source_document_url)
            .bind(case_id)
            .execute(&self.0)
            .await?;
        Ok(())
    }

    /// Cases the keyword matcher still needs to run against: motion kind,
    /// not deleted, a non-null title, and not yet linked to any category.
    ///
    /// # Errors
    /// Returns `DbError` if the query fails.
    pub async fn list_cases_needing_categorization(&self) -> Result<Vec<Case>, DbError> {
        let cases = sqlx::query_as::<_, Case>(
            r"
            SELECT c.* FROM cases c
            WHERE c.deleted = FALSE
              AND c.kind = 'Motion'
              AND c.title IS NOT NULL
              AND NOT EXISTS (SELECT 1 FROM case_categories cc WHERE cc.case_id = c.id)
            ",
        )
        .fetch_all(&self.0)
        .await?;
        Ok(cases)
    }

    /// Cases ready for the external simplification pass: not deleted,
    /// motion kind, resolved a source document, and bullet points already
    /// extracted.
    ///
    /// # Errors
    /// Returns `DbError` if the query fails.
    pub async fn list_cases_needing_simplification(&self, limit: i64) -> Result<Vec<Case>, DbError> {
        let cases = sqlx::query_as::<_, Case>(
            r"
            SELECT * FROM cases
            WHERE deleted = FALSE
              AND kind = 'Motion'
              AND source_document_key IS NOT NULL
              AND bullet_points IS NOT NULL
            ORDER BY updated_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.0)
        .await?;
        Ok(cases)
    }

    /// # Errors
    /// Returns `DbError` if the query fails.
    pub async fn get_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories").fetch_all(&self.0).await?;
        Ok(categories)
    }

    /// Refreshes both reporting views, logging and continuing past a
    /// failure on either rather than aborting the run over a best-effort
    /// reporting step.
    pub async fn refresh_materialized_views(&self) {
        for view in ["majority_party_votes", "party_likeness_per_motion"] {
            let sql = format!("REFRESH MATERIALIZED VIEW CONCURRENTLY {view}");
            if let Err(err) = sqlx::query(&sql).execute(&self.0).await {
                tracing::warn!(view, error = %err, "materialized view refresh failed");
            }
        }
    }
}
