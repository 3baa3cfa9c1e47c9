use crate::domain::model::{Goal, Transaction, TransactionType};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const GOAL_BAR_CELLS: usize = 15;
pub const RECENT_LIMIT: usize = 5;
pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceData {
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
}

impl FinanceData {
    /// Lenient decode: missing keys reset everything, a non-list section resets
    /// only that section, and malformed entries are dropped.
    pub fn from_json_str(content: &str) -> Self {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("⚠️  Error loading data: {}. Starting with empty data.", e);
                return Self::default();
            }
        };
        let Some(obj) = value.as_object() else {
            tracing::warn!("⚠️  Data file is corrupted. Creating a new one.");
            return Self::default();
        };
        if !obj.contains_key("transactions") || !obj.contains_key("goals") {
            tracing::warn!("⚠️  Data file is corrupted. Creating a new one.");
            return Self::default();
        }

        Self {
            transactions: decode_list(&obj["transactions"], "transactions"),
            goals: decode_list(&obj["goals"], "goals"),
        }
    }
}

fn decode_list<T: serde::de::DeserializeOwned>(value: &Value, section: &str) -> Vec<T> {
    let Some(items) = value.as_array() else {
        tracing::warn!("Section '{}' is not a list, resetting it", section);
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Skipping malformed entry in '{}': {}", section, e);
                None
            }
        })
        .collect()
}

fn category_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\s]+$").expect("static regex"))
}

pub fn validate_category(category: &str) -> Result<String> {
    if !category_pattern().is_match(category) {
        return Err(ToolError::validation(
            "Category can only contain letters, numbers, and spaces.",
        ));
    }
    Ok(category.to_string())
}

pub fn validate_amount(input: &str) -> Result<f64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ToolError::validation("Please enter a valid number."))?;
    if !(amount > 0.0) || !amount.is_finite() {
        return Err(ToolError::validation("Amount must be greater than 0."));
    }
    Ok(amount)
}

pub fn validate_description(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ToolError::validation("Description cannot be empty."));
    }
    Ok(trimmed.to_string())
}

/// Blank input means `today`; dates after `today` are rejected.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ToolError::validation("Invalid date format. Please use YYYY-MM-DD."))?;
    if date > today {
        return Err(ToolError::validation("Future dates are not allowed."));
    }
    Ok(date)
}

pub fn validate_transaction(t: &Transaction, today: NaiveDate) -> Result<()> {
    if !(t.amount > 0.0) || !t.amount.is_finite() {
        return Err(ToolError::validation("Amount must be greater than 0."));
    }
    validate_description(&t.description)?;
    validate_category(&t.category)?;
    if t.date > today {
        return Err(ToolError::validation("Future dates are not allowed."));
    }
    Ok(())
}

pub fn validate_goal(goal: &Goal) -> Result<()> {
    if goal.name.trim().is_empty() {
        return Err(ToolError::validation("Goal name cannot be empty."));
    }
    if !(goal.target > 0.0) {
        return Err(ToolError::validation("Target must be greater than 0."));
    }
    if goal.current < 0.0 {
        return Err(ToolError::validation("Current amount cannot be negative."));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub by_category: Vec<CategoryTotal>,
    pub recent: Vec<Transaction>,
}

impl MonthlySummary {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

impl fmt::Display for MonthlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Summary ===", self.month.format("%B %Y"))?;
        writeln!(f, "Income:  ${:.2}", self.income)?;
        writeln!(f, "Expenses: ${:.2}", self.expenses)?;
        writeln!(f, "Net:     ${:.2}", self.net())?;
        writeln!(f)?;
        writeln!(f, "--- Expenses by Category ---")?;
        for c in &self.by_category {
            writeln!(f, "{}: ${:.2} ({:.0}%)", c.category, c.amount, c.percent)?;
        }
        writeln!(f)?;
        writeln!(f, "--- Recent Transactions ---")?;
        for t in &self.recent {
            writeln!(
                f,
                "{} {}${:.2} - {}",
                t.date.format("%Y-%m-%d"),
                t.kind.sign(),
                t.amount,
                t.description
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub name: String,
    pub percent: f64,
    pub bar: String,
    pub current: f64,
    pub target: f64,
}

impl GoalProgress {
    pub fn of(goal: &Goal) -> Self {
        let percent = if goal.target > 0.0 {
            goal.current / goal.target * 100.0
        } else {
            0.0
        };
        let filled = ((GOAL_BAR_CELLS as f64 * percent / 100.0) as usize).min(GOAL_BAR_CELLS);
        let bar = "█".repeat(filled) + &"░".repeat(GOAL_BAR_CELLS - filled);
        Self {
            name: goal.name.clone(),
            percent,
            bar,
            current: goal.current,
            target: goal.target,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.target - self.current
    }
}

impl fmt::Display for GoalProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "[{}] {:.0}% - ${:.0}/${:.0}",
            self.bar, self.percent, self.current, self.target
        )?;
        write!(f, "Remaining: ${:.0}", self.remaining())
    }
}

/// JSON-backed ledger. Every mutation saves immediately.
pub struct FinanceStore<S: Storage> {
    storage: S,
    path: PathBuf,
    data: FinanceData,
}

impl<S: Storage> FinanceStore<S> {
    /// A missing file gives empty data; an unreadable or corrupt one is reported and replaced on next save.
    pub fn open(storage: S, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match storage.read_to_string(&path) {
            Ok(Some(content)) => FinanceData::from_json_str(&content),
            Ok(None) => FinanceData::default(),
            Err(e) => {
                tracing::warn!("⚠️  Error loading data: {}. Starting with empty data.", e);
                FinanceData::default()
            }
        };
        tracing::debug!(
            "Loaded {} transactions and {} goals from {}",
            data.transactions.len(),
            data.goals.len(),
            path.display()
        );
        Self {
            storage,
            path,
            data,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &FinanceData {
        &self.data
    }

    /// Copies the current file to `.bak`, then atomically replaces it.
    fn write(&self, data: &FinanceData) -> Result<()> {
        if let Err(e) = self.storage.backup(&self.path) {
            tracing::warn!("⚠️  Could not create backup: {}", e);
        }
        let json = serde_json::to_string_pretty(data)?;
        self.storage.write_atomic(&self.path, json.as_bytes())
    }

    /// Applies `change` to a copy; the copy replaces the live data only once it is on disk.
    fn commit<F>(&mut self, change: F) -> Result<String>
    where
        F: FnOnce(&mut FinanceData) -> String,
    {
        let mut next = self.data.clone();
        let message = change(&mut next);
        self.write(&next)?;
        self.data = next;
        Ok(message)
    }

    pub fn add_transaction(&mut self, transaction: Transaction, today: NaiveDate) -> Result<String> {
        validate_transaction(&transaction, today)?;
        self.commit(|data| {
            let message = format!("Added {}: ${:.2}", transaction.kind, transaction.amount);
            data.transactions.push(transaction);
            message
        })
    }

    /// Replaces the target and current amount of a same-named goal, else appends.
    pub fn upsert_goal(&mut self, goal: Goal) -> Result<String> {
        validate_goal(&goal)?;
        self.commit(|data| match data.goals.iter_mut().find(|g| g.name == goal.name) {
            Some(existing) => {
                existing.target = goal.target;
                existing.current = goal.current;
                format!("Updated goal: {}", goal.name)
            }
            None => {
                let message = format!("Added goal: {}", goal.name);
                data.goals.push(goal);
                message
            }
        })
    }

    pub fn monthly_summary(&self, month: NaiveDate) -> Option<MonthlySummary> {
        if self.data.transactions.is_empty() {
            return None;
        }
        let month = month.with_day(1).unwrap_or(month);
        let in_month = |t: &&Transaction| t.date.year() == month.year() && t.date.month() == month.month();

        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for t in self.data.transactions.iter().filter(in_month) {
            match t.kind {
                TransactionType::Income => income += t.amount,
                TransactionType::Expense => {
                    expenses += t.amount;
                    *totals.entry(t.category.as_str()).or_insert(0.0) += t.amount;
                }
            }
        }

        let mut by_category: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount,
                percent: if expenses > 0.0 {
                    amount / expenses * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut recent = self.data.transactions.clone();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_LIMIT);

        Some(MonthlySummary {
            month,
            income,
            expenses,
            by_category,
            recent,
        })
    }

    pub fn goal_progress(&self) -> Vec<GoalProgress> {
        self.data.goals.iter().map(GoalProgress::of).collect()
    }

    /// Writes `finance_YYYYMMDD.csv` into `dir` and returns its path.
    pub fn export_csv(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(format!("finance_{}.csv", today.format("%Y%m%d")));
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for t in &self.data.transactions {
            writer.write_record([
                t.date.format("%Y-%m-%d").to_string(),
                t.kind.to_string(),
                t.category.clone(),
                t.description.clone(),
                t.amount.to_string(),
            ])?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        self.storage.write_atomic(&path, &bytes)?;
        tracing::info!("Exported {} transactions to {}", self.data.transactions.len(), path.display());
        Ok(path)
    }
}
