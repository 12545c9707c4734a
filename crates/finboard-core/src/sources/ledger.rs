//! Local CSV ledger
//!
//! Format (header required, columns trimmed):
//!
//! ```text
//! kind,category,amount
//! income,Salario,2500.00
//! expense,Alimentación,85.20
//! expense,,12.00
//! ```
//!
//! The file is re-read on every request so edits show up on the next refresh.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Error, Result};

use super::{LedgerEntry, LedgerSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Income,
    #[serde(alias = "expenses")]
    Expense,
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    kind: EntryKind,
    category: Option<String>,
    amount: f64,
}

/// Ledger backed by a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Use the CSV file at `path`; fails if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidData(format!(
                "Ledger file not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and split the ledger into (income, expenses) on the blocking pool
    pub async fn load(&self) -> Result<(Vec<LedgerEntry>, Vec<LedgerEntry>)> {
        let path = self.path().to_path_buf();
        tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)?;
            parse_ledger(file)
        })
        .await
        .map_err(|e| Error::InvalidData(format!("Ledger read task failed: {}", e)))?
    }
}

/// Parse ledger CSV from any reader into (income, expenses)
pub fn parse_ledger<R: Read>(reader: R) -> Result<(Vec<LedgerEntry>, Vec<LedgerEntry>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut income = Vec::new();
    let mut expenses = Vec::new();

    for (index, row) in csv_reader.deserialize::<LedgerRow>().enumerate() {
        let row = row?;
        if !row.amount.is_finite() {
            // +2: header line and 1-based numbering
            return Err(Error::InvalidData(format!(
                "Ledger line {}: amount must be a finite number",
                index + 2
            )));
        }
        let entry = LedgerEntry {
            category: row.category.filter(|c| !c.is_empty()),
            amount: row.amount,
        };
        match row.kind {
            EntryKind::Income => income.push(entry),
            EntryKind::Expense => expenses.push(entry),
        }
    }

    tracing::debug!(
        income = income.len(),
        expenses = expenses.len(),
        "Parsed ledger"
    );
    Ok((income, expenses))
}

#[async_trait]
impl LedgerSource for CsvLedger {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn income_entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.load().await?.0)
    }

    async fn expense_entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.load().await?.1)
    }

    async fn entries(&self) -> Result<(Vec<LedgerEntry>, Vec<LedgerEntry>)> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{breakdown, summarize};
    use std::io::Write;

    const LEDGER: &str = "kind,category,amount
income,Salario,2500.00
income,,350.75
expense,Alimentación,85.20
expense, Transporte ,40
expense,,12.00
";

    #[test]
    fn test_parse_ledger() {
        let (income, expenses) = parse_ledger(LEDGER.as_bytes()).unwrap();
        assert_eq!(income.len(), 2);
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[1].category.as_deref(), Some("Transporte"));
        assert_eq!(expenses[2].category, None);

        let summary = summarize(&income, &expenses);
        assert_eq!(summary.total_income, 2850.75);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let result = parse_ledger("kind,category,amount\ntransfer,Savings,10\n".as_bytes());
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_non_numeric_amount_is_an_error() {
        let result = parse_ledger("kind,category,amount\nexpense,Food,abc\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CsvLedger::open(dir.path().join("missing.csv")).is_err());
    }

    #[tokio::test]
    async fn test_csv_ledger_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LEDGER.as_bytes()).unwrap();

        let ledger = CsvLedger::open(file.path()).unwrap();
        let expenses = ledger.expense_entries().await.unwrap();
        let rows = breakdown(&expenses);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category, "Alimentación");
        assert_eq!(rows[2].category, crate::sources::UNCATEGORIZED);
    }

    #[tokio::test]
    async fn test_entries_reads_file_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LEDGER.as_bytes()).unwrap();

        let ledger = CsvLedger::open(file.path()).unwrap();
        assert_eq!(ledger.path(), file.path());

        let (income, expenses) = ledger.entries().await.unwrap();
        assert_eq!(income.len(), 2);
        assert_eq!(expenses.len(), 3);

        // A later edit shows up on the next read
        std::fs::write(file.path(), "kind,category,amount\nincome,,10\n").unwrap();
        let (income, expenses) = ledger.entries().await.unwrap();
        assert_eq!(income.len(), 1);
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_entries_after_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(&path, LEDGER).unwrap();

        let ledger = CsvLedger::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(ledger.entries().await, Err(Error::Io(_))));
    }
}
