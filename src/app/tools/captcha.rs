use crate::app::prompt::{Prompter, StdPrompter};
use crate::config::cli::{CaptchaArgs, DifficultyArg};
use crate::core::captcha::{clamp_length, Captcha, Difficulty};
use crate::utils::error::Result;
use colored::*;
use std::io::{BufRead, Write};

const MENU: &str = "
=== CAPTCHA Generator ===
1. Easy (numbers)
2. Medium (letters and numbers)
3. Hard (mixed case)
4. Custom length
5. Exit";

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

pub fn run(args: &CaptchaArgs) -> Result<()> {
    let mut prompter = StdPrompter::stdio();
    match args.difficulty {
        Some(difficulty) => {
            let captcha = Captcha::generate(difficulty.into(), args.length.map(clamp_length));
            challenge(&mut prompter, &captcha).map(|_| ())
        }
        None => interactive(&mut prompter),
    }
}

/// Shows the puzzle and checks one answer. Returns whether it was solved.
pub fn challenge<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, captcha: &Captcha) -> Result<bool> {
    prompter.say(format!("\nDifficulty: {}", captcha.difficulty))?;
    prompter.say(format!("CAPTCHA:  {}", captcha.display.bold()))?;
    prompter.say(format!("Hint: {}", captcha.hint()))?;

    let answer = prompter.ask("Your answer: ")?.unwrap_or_default();
    let solved = captcha.verify(&answer);
    if solved {
        prompter.say("✓ Correct!".green().bold())?;
    } else {
        prompter.say(format!(
            "{} The answer was: {}",
            "✗ Incorrect.".red().bold(),
            captcha.text
        ))?;
    }
    Ok(solved)
}

pub fn interactive<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    loop {
        prompter.say(MENU)?;
        let Some(choice) = prompter.ask("Choose an option: ")? else {
            return Ok(());
        };
        let captcha = match choice.as_str() {
            "1" => Captcha::generate(Difficulty::Easy, None),
            "2" => Captcha::generate(Difficulty::Medium, None),
            "3" => Captcha::generate(Difficulty::Hard, None),
            "4" => {
                let length = prompter.ask_until("Length (4-10): ", |input| Ok(input.parse::<i64>()?))?;
                let difficulty = prompter.ask_until("Difficulty (easy/medium/hard): ", |input| input.parse())?;
                Captcha::generate(difficulty, Some(clamp_length(length)))
            }
            "5" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            _ => {
                prompter.say("❌ Invalid choice. Please select 1-5.")?;
                continue;
            }
        };
        challenge(prompter, &captcha)?;
    }
}
