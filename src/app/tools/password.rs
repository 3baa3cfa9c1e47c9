use crate::app::prompt::{Prompter, StdPrompter};
use crate::config::cli::{PasswordArgs, PolicyArg};
use crate::core::password::{
    check_password_strength, generate_password, Criteria, Strength, StrengthPolicy, STRONG_LENGTH,
};
use crate::utils::error::Result;
use colored::*;
use std::io::{BufRead, Write};

impl From<PolicyArg> for StrengthPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Classic => StrengthPolicy::Classic,
            PolicyArg::Extended => StrengthPolicy::Extended,
        }
    }
}

pub fn run(args: &PasswordArgs) -> Result<()> {
    let policy = StrengthPolicy::from(args.policy);
    let mut prompter = StdPrompter::stdio();
    if args.generate {
        return generate(&mut prompter);
    }
    match &args.password {
        Some(password) => {
            let strength = check_password_strength(password, policy)?;
            describe(&mut prompter, password, strength, policy)
        }
        None => check_interactively(&mut prompter, policy),
    }
}

fn generate<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let password = generate_password();
    prompter.say(format!("🔐 Generated password: {}", password.bold()))?;
    let strength = check_password_strength(&password, StrengthPolicy::Extended)?;
    prompter.say(format!("Password strength: {}", paint(strength)))
}

pub fn check_interactively<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    policy: StrengthPolicy,
) -> Result<()> {
    let (password, strength) = prompter.ask_until("Enter a password to check: ", |input| {
        check_password_strength(input, policy).map(|s| (input.to_string(), s))
    })?;
    describe(prompter, &password, strength, policy)
}

fn paint(strength: Strength) -> ColoredString {
    let label = strength.to_string();
    match strength {
        Strength::Weak => label.red().bold(),
        Strength::Medium => label.yellow().bold(),
        Strength::Strong => label.green().bold(),
    }
}

fn describe<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    password: &str,
    strength: Strength,
    policy: StrengthPolicy,
) -> Result<()> {
    prompter.say(format!("Password strength: {}", paint(strength)))?;
    if strength == Strength::Strong {
        return Ok(());
    }

    let criteria = Criteria::evaluate(password);
    let mut tips = Vec::new();
    if !criteria.long_enough {
        tips.push(format!("Use at least {} characters", STRONG_LENGTH));
    }
    if !criteria.has_upper {
        tips.push("Add an uppercase letter".to_string());
    }
    if !criteria.has_lower {
        tips.push("Add a lowercase letter".to_string());
    }
    if !criteria.has_digit {
        tips.push("Add a digit".to_string());
    }
    if policy == StrengthPolicy::Extended && !criteria.has_symbol {
        tips.push("Add a symbol such as ! or #".to_string());
    }
    for tip in tips {
        prompter.say(format!("  💡 {}", tip))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prompt::scripted;

    #[test]
    fn test_interactive_check_reprompts_until_valid() {
        colored::control::set_override(false);
        let mut p = scripted("\n   \nab\nPassword\n");
        check_interactively(&mut p, StrengthPolicy::Classic).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("❌").count(), 3);
        assert!(out.contains("Password strength: Medium"));
        assert!(out.contains("Add a digit"));
        assert!(!out.contains("symbol"));
    }

    #[test]
    fn test_extended_policy_tips() {
        colored::control::set_override(false);
        let mut p = scripted("Password1\n");
        check_interactively(&mut p, StrengthPolicy::Extended).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Password strength: Medium"));
        assert!(out.contains("Add a symbol"));
    }

    #[test]
    fn test_generated_password_is_strong() {
        colored::control::set_override(false);
        let mut p = scripted("");
        generate(&mut p).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Password strength: Strong"));
    }
}
