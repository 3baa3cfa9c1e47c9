use crate::adapters::LocalStorage;
use crate::app::prompt::{Prompter, StdPrompter};
use crate::app::tools::report;
use crate::config::ToolshedConfig;
use crate::core::finance::{
    parse_date, validate_amount, validate_category, validate_description, FinanceStore,
};
use crate::domain::model::{Goal, Transaction, TransactionType};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MENU: &str = "
=== Personal Finance Tracker ===
1. Add income
2. Add expense
3. Monthly summary
4. Set savings goal
5. View goals
6. Export to CSV
7. Exit";

/// Per-session settings taken from `[finance]`.
pub struct Session {
    pub today: NaiveDate,
    pub export_dir: PathBuf,
    pub max_attempts: usize,
}

pub fn run(config: &ToolshedConfig) -> Result<()> {
    let mut store = FinanceStore::open(LocalStorage::default(), config.finance_path());
    let session = Session {
        today: chrono::Local::now().date_naive(),
        export_dir: PathBuf::from(&config.finance.export_dir),
        max_attempts: config.finance.max_attempts,
    };
    interactive(&mut store, &mut StdPrompter::stdio(), &session)
}

pub fn interactive<S: Storage, R: BufRead, W: Write>(
    store: &mut FinanceStore<S>,
    prompter: &mut Prompter<R, W>,
    session: &Session,
) -> Result<()> {
    loop {
        prompter.say(MENU)?;
        let Some(choice) = prompter.ask("Choose an option: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let outcome = add_transaction(store, prompter, session, TransactionType::Income);
                report(prompter, outcome)?;
            }
            "2" => {
                let outcome = add_transaction(store, prompter, session, TransactionType::Expense);
                report(prompter, outcome)?;
            }
            "3" => show_summary(store, prompter, session.today)?,
            "4" => {
                let outcome = set_goal(store, prompter, session.max_attempts);
                report(prompter, outcome)?;
            }
            "5" => show_goals(store, prompter)?,
            "6" => {
                let outcome = store
                    .export_csv(&session.export_dir, session.today)
                    .map(|path| format!("Exported to {}", path.display()));
                report(prompter, outcome)?;
            }
            "7" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            _ => prompter.say("❌ Invalid choice. Please select 1-7.")?,
        }
    }
}

fn add_transaction<S: Storage, R: BufRead, W: Write>(
    store: &mut FinanceStore<S>,
    prompter: &mut Prompter<R, W>,
    session: &Session,
    kind: TransactionType,
) -> Result<String> {
    let amount = prompter.ask_bounded("Amount: $", session.max_attempts, validate_amount)?;
    let description = prompter.ask_until("Description: ", validate_description)?;
    let category = prompter.ask_until("Category: ", validate_category)?;
    let date = prompter.ask_until("Date (YYYY-MM-DD, blank for today): ", |input| {
        parse_date(input, session.today)
    })?;

    store.add_transaction(
        Transaction {
            kind,
            amount,
            description,
            category,
            date,
        },
        session.today,
    )
}

fn parse_month(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map_err(|_| ToolError::validation("Invalid month. Please use YYYY-MM."))
}

fn show_summary<S: Storage, R: BufRead, W: Write>(
    store: &FinanceStore<S>,
    prompter: &mut Prompter<R, W>,
    today: NaiveDate,
) -> Result<()> {
    let month = prompter.ask_until("Month (YYYY-MM, blank for current): ", |input| {
        parse_month(input, today)
    })?;
    match store.monthly_summary(month) {
        Some(summary) => prompter.say(summary),
        None => prompter.say("No transactions recorded yet."),
    }
}

fn set_goal<S: Storage, R: BufRead, W: Write>(
    store: &mut FinanceStore<S>,
    prompter: &mut Prompter<R, W>,
    max_attempts: usize,
) -> Result<String> {
    let name = prompter.ask_until("Goal name: ", |input| {
        if input.is_empty() {
            Err(ToolError::validation("Goal name cannot be empty."))
        } else {
            Ok(input.to_string())
        }
    })?;
    let target = prompter.ask_bounded("Target amount: $", max_attempts, validate_amount)?;
    let current = prompter.ask_bounded("Current amount: $", max_attempts, |input| {
        let value: f64 = input
            .parse()
            .map_err(|_| ToolError::validation("Please enter a valid number."))?;
        if value < 0.0 || !value.is_finite() {
            return Err(ToolError::validation("Current amount cannot be negative."));
        }
        Ok(value)
    })?;
    store.upsert_goal(Goal {
        name,
        target,
        current,
    })
}

fn show_goals<S: Storage, R: BufRead, W: Write>(
    store: &FinanceStore<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let progress = store.goal_progress();
    if progress.is_empty() {
        return prompter.say("No savings goals yet.");
    }
    prompter.say("\n=== Savings Goals ===")?;
    for goal in progress {
        prompter.say(format!("{}\n", goal))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prompt::scripted;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            export_dir: PathBuf::from("exports"),
            max_attempts: 3,
        }
    }

    fn run_script(dir: &TempDir, script: &str) -> String {
        let mut store = FinanceStore::open(LocalStorage::new(dir.path()), "finance.json");
        let mut p = scripted(script);
        interactive(&mut store, &mut p, &session()).unwrap();
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_add_income_with_reprompts() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "1\nabc\n1500\n\nSalary\nWork!\nWork\n2030-01-01\n2024-03-01\n7\n",
        );
        assert!(out.contains("❌ Please enter a valid number. (Attempt 1/3)"));
        assert!(out.contains("❌ Description cannot be empty."));
        assert!(out.contains("❌ Category can only contain letters"));
        assert!(out.contains("❌ Future dates are not allowed."));
        assert!(out.contains("✅ Added income: $1500.00"));

        let saved = std::fs::read_to_string(dir.path().join("finance.json")).unwrap();
        assert!(saved.contains("\"type\": \"income\""));
        assert!(saved.contains("\"date\": \"2024-03-01\""));
    }

    #[test]
    fn test_amount_attempts_exhausted_returns_to_menu() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "2\nx\n-1\n0\n3\n\n7\n");
        assert!(out.contains("(Attempt 3/3)"));
        assert!(out.contains("❌ Maximum attempts reached for input: Amount: $"));
        assert!(out.contains("No transactions recorded yet."));
    }

    #[test]
    fn test_summary_goals_and_export() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "2\n40\nGroceries\nFood\n\n4\nBike\n500\n125\n5\n3\n2024-03\n6\n7\n",
        );
        assert!(out.contains("✅ Added expense: $40.00"));
        assert!(out.contains("✅ Added goal: Bike"));
        assert!(out.contains("[███░░░░░░░░░░░░] 25% - $125/$500"));
        assert!(out.contains("=== March 2024 Summary ==="));
        assert!(out.contains("Food: $40.00 (100%)"));
        assert!(out.contains("✅ Exported to"));

        let csv = std::fs::read_to_string(dir.path().join("exports/finance_20240315.csv")).unwrap();
        assert!(csv.starts_with("Date,Type,Category,Description,Amount\n"));
        assert!(csv.contains("2024-03-15,expense,Food,Groceries,40"));
    }

    #[test]
    fn test_parse_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_month("", today).unwrap(), today);
        assert_eq!(
            parse_month("2023-11", today).unwrap(),
            NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()
        );
        assert!(parse_month("November", today).is_err());
    }
}
