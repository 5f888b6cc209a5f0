//! Process-scoped run accumulators and the per-page progress line (§4.8).

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tk_db::NormalizedPage;

/// How this page's row count compares to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Up => "\u{2191}",
            Self::Down => "\u{2193}",
            Self::Flat => "\u{2192}",
        };
        write!(f, "{symbol}")
    }
}

/// One page's progress summary, logged via `tracing::info!` (§4.8).
#[derive(Debug, Clone)]
pub struct ProgressLine {
    pub page: u64,
    pub rows_this_page: u64,
    pub cumulative_rows: u64,
    pub percentage: Option<f64>,
    pub eta_seconds: Option<f64>,
    pub trend: Trend,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} ({} rows, {} cumulative", self.page, self.rows_this_page, self.cumulative_rows)?;
        if let Some(pct) = self.percentage {
            write!(f, ", {pct:.1}%")?;
        }
        if let Some(eta) = self.eta_seconds {
            write!(f, ", ETA {eta:.0}s")?;
        }
        write!(f, ") {}", self.trend)
    }
}

/// Process-scoped counters for one run (§4.8).
#[derive(Debug)]
pub struct Stats {
    pub persons: u64,
    pub factions: u64,
    pub dossiers: u64,
    pub cases: u64,
    pub decisions: u64,
    pub votes: u64,
    pub case_kind_counts: HashMap<String, u64>,
    pub processing_errors: u64,
    pub error_details: Vec<String>,
    pub pages: u64,
    pub total_estimate: Option<i64>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    last_page_rows: u64,
}

impl Stats {
    #[must_use]
    pub fn new(total_estimate: Option<i64>) -> Self {
        Self {
            persons: 0,
            factions: 0,
            dossiers: 0,
            cases: 0,
            decisions: 0,
            votes: 0,
            case_kind_counts: HashMap::new(),
            processing_errors: 0,
            error_details: Vec::new(),
            pages: 0,
            total_estimate,
            start: Utc::now(),
            end: None,
            last_page_rows: 0,
        }
    }

    /// Folds one normalized page's entity counts and errors into the run
    /// totals, returning the page's progress line.
    pub fn record_page(&mut self, page: &NormalizedPage) -> ProgressLine {
        self.pages += 1;
        self.persons += page.persons.len() as u64;
        self.factions += page.factions.len() as u64;
        self.dossiers += page.dossiers.len() as u64;
        self.cases += page.cases.len() as u64;
        self.decisions += page.decisions.len() as u64;
        self.votes += page.votes.len() as u64;
        self.processing_errors += page.errors.len() as u64;
        self.error_details.extend(page.errors.iter().cloned());

        for case in &page.cases {
            *self.case_kind_counts.entry(case.kind().as_str().to_string()).or_insert(0) += 1;
        }

        let rows_this_page = page.cases.len() as u64;
        let cumulative_rows = self.cases;

        let percentage =
            self.total_estimate.and_then(|total| if total > 0 { Some(cumulative_rows as f64 / total as f64 * 100.0) } else { None });

        let eta_seconds = self.total_estimate.and_then(|total| {
            let remaining = (total as u64).saturating_sub(cumulative_rows);
            let elapsed = (Utc::now() - self.start).num_milliseconds().max(1) as f64 / 1000.0;
            let mean_per_row = elapsed / cumulative_rows.max(1) as f64;
            (remaining > 0).then_some(remaining as f64 * mean_per_row)
        });

        let trend = match rows_this_page.cmp(&self.last_page_rows) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Flat,
        };
        self.last_page_rows = rows_this_page;

        ProgressLine { page: self.pages, rows_this_page, cumulative_rows, percentage, eta_seconds, trend }
    }

    pub fn finalize(&mut self) {
        self.end = Some(Utc::now());
    }

    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        let end = self.end.unwrap_or_else(Utc::now);
        (end - self.start).num_milliseconds().max(0) as f64 / 1000.0
    }

    /// Renders the `=== Import Statistics ===` block (§7, §4.8).
    #[must_use]
    pub fn summary_block(&self) -> String {
        let mut out = String::from("=== Import Statistics ===\n");
        out.push_str(&format!("Pages:              {}\n", self.pages));
        out.push_str(&format!("Persons:             {}\n", self.persons));
        out.push_str(&format!("Factions:            {}\n", self.factions));
        out.push_str(&format!("Dossiers:            {}\n", self.dossiers));
        out.push_str(&format!("Cases:               {}\n", self.cases));
        out.push_str(&format!("Decisions:           {}\n", self.decisions));
        out.push_str(&format!("Votes:               {}\n", self.votes));
        for (kind, count) in &self.case_kind_counts {
            out.push_str(&format!("  Case[{kind}]:  {count}\n"));
        }
        out.push_str(&format!("Processing errors:   {}\n", self.processing_errors));
        out.push_str(&format!("Duration:            {:.1}s\n", self.duration_seconds()));
        out
    }
}
