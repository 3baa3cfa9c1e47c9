use crate::app::prompt::{Prompter, StdPrompter};
use crate::config::cli::MandelbrotArgs;
use crate::core::mandelbrot::{Viewport, DEFAULT_PALETTE};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::Validate;
use std::io::{BufRead, Write};

const DEFAULT_ZOOM_FACTOR: f64 = 2.0;
const COMMANDS: &str = "[i] zoom in  [o] zoom out  [m] move  [r] resolution  [s] reset  [q] quit";

pub fn run(args: &MandelbrotArgs) -> Result<()> {
    let viewport = Viewport {
        width: args.width,
        height: args.height,
        max_iter: args.max_iter,
        ..Viewport::default()
    };
    viewport.validate()?;

    let mut prompter = StdPrompter::stdio();
    if args.once {
        return draw(&mut prompter, &viewport);
    }
    explore(viewport, &mut prompter)
}

fn draw<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, viewport: &Viewport) -> Result<()> {
    prompter.say(viewport.title())?;
    prompter.say(viewport.render(DEFAULT_PALETTE))
}

fn parse_factor(input: &str) -> Result<f64> {
    if input.is_empty() {
        return Ok(DEFAULT_ZOOM_FACTOR);
    }
    let factor: f64 = input.parse()?;
    if !(factor > 0.0) {
        return Err(ToolError::validation("Zoom factor must be greater than 0"));
    }
    Ok(factor)
}

fn parse_point(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [re, im] => Ok((re.parse()?, im.parse()?)),
        _ => Err(ToolError::validation("Enter the real and imaginary parts, e.g. -0.5 0.6")),
    }
}

fn parse_resolution(input: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [w, h, n] => Ok((w.parse()?, h.parse()?, n.parse()?)),
        _ => Err(ToolError::validation("Enter width, height and max iterations, e.g. 120 50 200")),
    }
}

/// Redraws after every command until `q` or end of input.
pub fn explore<R: BufRead, W: Write>(mut viewport: Viewport, prompter: &mut Prompter<R, W>) -> Result<()> {
    draw(prompter, &viewport)?;
    loop {
        prompter.say(COMMANDS)?;
        let Some(command) = prompter.ask("> ")? else {
            return Ok(());
        };
        match command.to_lowercase().as_str() {
            "i" => {
                let factor = prompter.ask_until("Zoom factor [2]: ", parse_factor)?;
                viewport.zoom_in(factor)?;
            }
            "o" => {
                let factor = prompter.ask_until("Zoom factor [2]: ", parse_factor)?;
                viewport.zoom_out(factor)?;
            }
            "m" => {
                let (re, im) = prompter.ask_until("New center (re im): ", parse_point)?;
                viewport.move_to(re, im);
            }
            "r" => {
                let (w, h, n) = prompter.ask_until("Width height max_iter: ", |input| {
                    let (w, h, n) = parse_resolution(input)?;
                    let mut next = viewport.clone();
                    next.resize(w, h, n)?;
                    Ok((w, h, n))
                })?;
                viewport.resize(w, h, n)?;
            }
            "s" => viewport.reset(),
            "q" => return Ok(()),
            _ => {
                prompter.say("❌ Unknown command")?;
                continue;
            }
        }
        draw(prompter, &viewport)?;
    }
}
