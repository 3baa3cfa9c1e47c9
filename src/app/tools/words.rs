use crate::app::prompt::{Prompter, StdPrompter};
use crate::config::cli::WordsArgs;
use crate::core::words::count_words;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub fn run(args: &WordsArgs) -> Result<()> {
    let mut prompter = StdPrompter::stdio();
    let text = match &args.text {
        Some(text) => text.clone(),
        None => prompter.ask_required("Enter your text: ")?,
    };
    print_counts(&mut prompter, &text)
}

fn print_counts<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, text: &str) -> Result<()> {
    let (words, chars) = count_words(text);
    prompter.say(format!("Words: {}", words))?;
    prompter.say(format!("Characters (including spaces): {}", chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prompt::scripted;

    #[test]
    fn test_print_counts() {
        let mut p = scripted("");
        print_counts(&mut p, "one two  three").unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out, "Words: 3\nCharacters (including spaces): 14\n");
    }
}
