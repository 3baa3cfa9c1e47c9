use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "toolshed")]
#[command(about = "A box of small command-line utilities", version)]
pub struct Cli {
    /// Debug logging on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Configuration file (defaults to ./toolshed.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check which localhost ports in a range are in use
    Ports(PortsArgs),
    /// Manage a plain-text to-do list
    Todo(TodoArgs),
    /// Check password strength or generate one
    Password(PasswordArgs),
    /// Chemistry calculators
    Chem(ChemArgs),
    /// Personal finance tracker
    Finance,
    /// Explore the Mandelbrot set as ASCII art
    Mandelbrot(MandelbrotArgs),
    /// Pomodoro kanban board
    Pomoban(PomobanArgs),
    /// Count words and characters
    Words(WordsArgs),
    /// Validate barcode data
    Barcode(BarcodeArgs),
    /// Generate and verify text CAPTCHAs
    Captcha(CaptchaArgs),
}

/// Help is handled by the tool itself (`--help`, `--manual`, `--examples`).
#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
pub struct PortsArgs {
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    #[arg(short = 'e', long, allow_negative_numbers = true)]
    pub end: Option<i64>,

    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub port: Option<i64>,

    #[arg(short = 'f', long = "show-free")]
    pub show_free: bool,

    #[arg(short = 'a', long = "show-all")]
    pub show_all: bool,

    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub timeout: Option<f64>,

    #[arg(short = 'h', long)]
    pub help: bool,

    #[arg(long)]
    pub manual: bool,

    #[arg(long)]
    pub examples: bool,
}

#[derive(Debug, Args)]
pub struct TodoArgs {
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub action: Option<TodoAction>,
}

#[derive(Debug, Subcommand)]
pub enum TodoAction {
    /// Show all tasks
    List,
    /// Add a task
    Add { text: Vec<String> },
    /// Mark task NUMBER done
    Done {
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Mark task NUMBER not done
    Undone {
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Delete task NUMBER
    Delete {
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Classic,
    Extended,
}

#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password to check; prompts when omitted
    pub password: Option<String>,

    #[arg(long, value_enum, default_value = "classic")]
    pub policy: PolicyArg,

    /// Generate a strong password instead of checking one
    #[arg(short, long)]
    pub generate: bool,
}

#[derive(Debug, Args)]
pub struct ChemArgs {
    #[command(subcommand)]
    pub action: ChemAction,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GasUnitArg {
    LAtm,
    J,
    LKpa,
    Cal,
}

#[derive(Debug, Subcommand)]
pub enum ChemAction {
    /// Look up an element by symbol, atomic number or name
    Element { query: String },
    /// Molar mass of a formula such as Ca(OH)2
    Molar { formula: String },
    /// Ideal gas law PV = nRT; give exactly three
    Gas {
        #[arg(short = 'P', long)]
        pressure: Option<f64>,
        #[arg(short = 'V', long)]
        volume: Option<f64>,
        #[arg(short = 'n', long)]
        moles: Option<f64>,
        #[arg(short = 'T', long)]
        temperature: Option<f64>,
        #[arg(long, value_enum, default_value = "l-atm")]
        r_unit: GasUnitArg,
    },
    /// Dilution C1V1 = C2V2; give exactly three
    Dilution {
        #[arg(long)]
        c1: Option<f64>,
        #[arg(long)]
        v1: Option<f64>,
        #[arg(long)]
        c2: Option<f64>,
        #[arg(long)]
        v2: Option<f64>,
    },
    /// Molarity M = mol/L; give exactly two, or mass with molar mass for moles
    Molarity {
        #[arg(long)]
        moles: Option<f64>,
        #[arg(long)]
        volume: Option<f64>,
        #[arg(long)]
        molarity: Option<f64>,
        #[arg(long)]
        mass: Option<f64>,
        #[arg(long)]
        molar_mass: Option<f64>,
    },
    /// pH from one of [H+], pH, pOH or [OH-]
    Ph {
        #[arg(long = "h-conc")]
        h_concentration: Option<f64>,
        #[arg(long)]
        ph: Option<f64>,
        #[arg(long)]
        poh: Option<f64>,
        #[arg(long = "oh-conc")]
        oh_concentration: Option<f64>,
    },
    /// Convert between mol, g and particles
    Convert {
        value: f64,
        from: String,
        to: String,
        #[arg(long)]
        molar_mass: Option<f64>,
    },
    /// Print the periodic table
    Table,
    /// Equation balancing guide
    Balance,
}

#[derive(Debug, Args)]
pub struct MandelbrotArgs {
    /// Render once and exit instead of the interactive explorer
    #[arg(long)]
    pub once: bool,

    #[arg(long, default_value_t = 80)]
    pub width: usize,

    #[arg(long, default_value_t = 40)]
    pub height: usize,

    #[arg(long, default_value_t = 100)]
    pub max_iter: usize,
}

#[derive(Debug, Args)]
pub struct PomobanArgs {
    /// Print today's pomodoro summary and exit
    #[arg(long)]
    pub stats: bool,
}

#[derive(Debug, Args)]
pub struct WordsArgs {
    /// Text to count; prompts when omitted
    pub text: Option<String>,
}

#[derive(Debug, Args)]
pub struct BarcodeArgs {
    /// Barcode type such as EAN13 or CODE128
    pub barcode_type: Option<String>,

    /// Data to validate
    pub data: Option<String>,

    #[arg(long)]
    pub list_formats: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Args)]
pub struct CaptchaArgs {
    /// Generate one CAPTCHA non-interactively
    #[arg(short, long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Custom length, clamped to 4-10
    #[arg(short, long, allow_negative_numbers = true)]
    pub length: Option<i64>,
}
