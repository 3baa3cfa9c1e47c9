use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DONE_PREFIX: &str = "[x] ";
pub const TODO_PREFIX: &str = "[ ] ";

/// A parsed to-do line. Lines without a status prefix parse as not done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub text: String,
    pub done: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    pub fn parse(line: &str) -> Self {
        if let Some(text) = line.strip_prefix(DONE_PREFIX) {
            Self {
                text: text.to_string(),
                done: true,
            }
        } else if let Some(text) = line.strip_prefix(TODO_PREFIX) {
            Self {
                text: text.to_string(),
                done: false,
            }
        } else {
            Self {
                text: line.to_string(),
                done: false,
            }
        }
    }

    pub fn to_line(&self) -> String {
        let prefix = if self.done { DONE_PREFIX } else { TODO_PREFIX };
        format!("{}{}", prefix, self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!(
                "Invalid type '{}'. Please enter 'income' or 'expense'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Solid => "Solid",
            Phase::Liquid => "Liquid",
            Phase::Gas => "Gas",
        };
        f.write_str(name)
    }
}

/// One periodic-table row. The table itself is a process-wide constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    pub symbol: &'static str,
    pub number: u32,
    pub weight: f64,
    pub name: &'static str,
    pub group: u32,
    pub phase: Phase,
}

/// Busy and free ports of one sweep, both ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    pub busy: Vec<u16>,
    pub free: Vec<u16>,
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn total(&self) -> usize {
        self.busy.len() + self.free.len()
    }

    pub fn ports_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total() as f64 / secs
        } else {
            self.total() as f64
        }
    }
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
