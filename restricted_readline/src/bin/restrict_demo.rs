// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Try out every reader from a real terminal. A few examples:
//!
//! ```text
//! restrict_demo --allowed 0123456789 --min 3 --max 5 --parse-as int
//! restrict_demo --mode password --mask '#' --min 8
//! restrict_demo --mode pattern --pattern '[a-f0-9]' --ignore-case --timeout-ms 5
//! restrict_demo --mode any-of --tokens yes,no --fg dark_green --commit-key tab
//! restrict_demo --config reader.json --log-file /tmp/restrict_demo.log
//! ```
//!
//! `Ctrl+C` cancels a read.

use std::{io::Write as _,
          path::PathBuf,
          time::Duration};

use clap::{Parser, ValueEnum};
use miette::IntoDiagnostic as _;
use restricted_readline::{AcceptancePolicy, CrosstermKeyPressReader, InputRestrictor, Key,
                          KeyPress, KeyPressReader, PasswordRestrictor, PatternOptions,
                          PatternRestrictor, RawModeGuard, ReaderColor, ReaderConfig,
                          ReaderConfigDraft, RestrictError, TTYResult, TracingConfig,
                          coerce_committed_text, is_stdin_interactive,
                          try_initialize_logging_global};
use tracing_core::LevelFilter;

#[derive(Debug, Parser)]
#[command(bin_name = "restrict_demo")]
#[command(about = "Read one line from the terminal, restricted to what you allow")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(long, value_enum, default_value_t = Mode::Plain, help = "Which reader to run")]
    pub mode: Mode,

    #[arg(
        long,
        value_name = "CHARS",
        help = "Characters that are accepted (plain and password modes). Any printable character if left out"
    )]
    pub allowed: Option<String>,

    #[arg(
        long,
        value_name = "TOKEN",
        value_delimiter = ',',
        help = "Tokens whose characters are accepted (any-of mode), comma separated"
    )]
    pub tokens: Vec<String>,

    #[arg(
        long,
        value_name = "REGEX",
        help = "Pattern each character must match on its own (pattern mode)"
    )]
    pub pattern: Option<String>,

    #[arg(long, help = "Match the pattern case insensitively")]
    pub ignore_case: bool,

    #[arg(long, value_name = "MS", help = "Time budget for matching one key press")]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "Minimum length enforced when committing")]
    pub min: Option<usize>,

    #[arg(long, help = "Maximum length, extra characters are dropped")]
    pub max: Option<usize>,

    #[arg(
        long,
        value_name = "KEY",
        help = "Key that commits the line, eg: `enter`, `tab`, `f5`, or a single character"
    )]
    pub commit_key: Option<Key>,

    #[arg(long, help = "Ignore the delete key")]
    pub no_delete: bool,

    #[arg(long, help = "Don't echo accepted characters")]
    pub hidden: bool,

    #[arg(long, value_name = "COLOR", help = "Foreground color, eg: `red` or `#FFA500`")]
    pub fg: Option<ReaderColor>,

    #[arg(long, value_name = "COLOR", help = "Background color, eg: `dark_blue` or `#223`")]
    pub bg: Option<ReaderColor>,

    #[arg(long, value_name = "CHAR", help = "Mask character (password mode)")]
    pub mask: Option<char>,

    #[arg(long, value_enum, default_value_t = ParseAs::Text, help = "Parse the committed line")]
    pub parse_as: ParseAs,

    #[arg(
        long,
        value_name = "PATH",
        help = "JSON reader config. Flags given on the command line override it"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Write debug logs to this file")]
    pub log_file: Option<String>,

    #[arg(long, default_value = "> ", help = "Prompt shown before reading")]
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[clap(help = "Accept the characters given with --allowed")]
    Plain,
    #[clap(help = "Accept any character found in one of the --tokens")]
    AnyOf,
    #[clap(help = "Like plain, but echo a mask character")]
    Password,
    #[clap(help = "Accept characters matching --pattern")]
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParseAs {
    Text,
    Int,
    Float,
    Bool,
}

/// A reader that is fully set up before the terminal goes into raw mode, so that bad
/// flags are reported in cooked mode.
enum Demo {
    Input(InputRestrictor, AcceptancePolicy),
    Password(PasswordRestrictor, AcceptancePolicy),
    Pattern(PatternRestrictor),
}

/// Ends the input on `Ctrl+C`, since raw mode turns off the terminal's own handling.
struct CancellableKeyPressReader<R>(R);

impl<R: KeyPressReader> KeyPressReader for CancellableKeyPressReader<R> {
    fn read_key_press(&mut self) -> Option<KeyPress> {
        let key_press = self.0.read_key_press()?;
        (key_press.key_char != CTRL_C).then_some(key_press)
    }
}

const CTRL_C: char = '\u{3}';

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if let Some(log_file) = &cli_arg.log_file {
        try_initialize_logging_global(TracingConfig::new_file(
            Some(log_file.clone()),
            LevelFilter::DEBUG,
        ))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", mode = ?cli_arg.mode);
    }

    if is_stdin_interactive() == TTYResult::IsNotInteractive {
        return Err(miette::miette!(
            help = "Run it from a terminal, without piping anything into it",
            "restrict_demo reads key presses, so stdin must be a terminal"
        ));
    }

    let config = try_build_config(&cli_arg)?;
    let demo = try_build_demo(&cli_arg, config)?;
    let is_password = matches!(demo, Demo::Password(..));

    print!("{}", cli_arg.prompt);
    std::io::stdout().flush().into_diagnostic()?;

    let result = {
        let _raw_mode = RawModeGuard::try_new().into_diagnostic()?;
        read(&demo)
    };
    println!();

    let text = match result {
        Ok(text) => text,
        Err(RestrictError::InputClosed) => {
            println!("Cancelled.");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    report(cli_arg.parse_as, &text, is_password)?;

    tracing::debug!(message = "Stop logging...");
    Ok(())
}

fn read(demo: &Demo) -> Result<String, RestrictError> {
    let mut key_press_reader = CancellableKeyPressReader(CrosstermKeyPressReader);
    match demo {
        Demo::Input(restrictor, policy) => {
            restrictor.read(policy.clone(), &mut key_press_reader)
        }
        Demo::Password(restrictor, policy) => {
            restrictor.read(policy.clone(), &mut key_press_reader)
        }
        Demo::Pattern(restrictor) => restrictor.read(&mut key_press_reader),
    }
}

/// Start from the config file, if any, then apply the flags.
fn try_build_config(cli_arg: &CLIArg) -> miette::Result<ReaderConfig> {
    let mut draft = match &cli_arg.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).into_diagnostic()?;
            serde_json::from_str::<ReaderConfigDraft>(&json).map_err(RestrictError::from)?
        }
        None => ReaderConfigDraft::default(),
    };

    if let Some(min) = cli_arg.min {
        draft.min_len = min;
    }
    if let Some(max) = cli_arg.max {
        draft.max_len = max;
    }
    if let Some(commit_key) = cli_arg.commit_key {
        draft.commit_key = commit_key;
    }
    if cli_arg.no_delete {
        draft.delete_enabled = false;
    }
    if cli_arg.hidden {
        draft.visible = false;
    }
    if cli_arg.fg.is_some() {
        draft.foreground = cli_arg.fg;
    }
    if cli_arg.bg.is_some() {
        draft.background = cli_arg.bg;
    }

    Ok(ReaderConfig::try_from(draft)?)
}

fn try_build_demo(cli_arg: &CLIArg, config: ReaderConfig) -> miette::Result<Demo> {
    let allowed = || {
        cli_arg
            .allowed
            .as_deref()
            .map_or(AcceptancePolicy::Unrestricted, AcceptancePolicy::from)
    };

    Ok(match cli_arg.mode {
        Mode::Plain => Demo::Input(InputRestrictor::new(config), allowed()),
        Mode::AnyOf => {
            if cli_arg.tokens.is_empty() {
                miette::bail!("--mode any-of needs --tokens");
            }
            Demo::Input(
                InputRestrictor::new(config),
                AcceptancePolicy::from(cli_arg.tokens.clone()),
            )
        }
        Mode::Password => {
            let mut restrictor = PasswordRestrictor::new(config);
            if let Some(mask) = cli_arg.mask {
                restrictor = restrictor.with_mask(mask);
            }
            Demo::Password(restrictor, allowed())
        }
        Mode::Pattern => {
            let Some(pattern) = &cli_arg.pattern else {
                miette::bail!("--mode pattern needs --pattern");
            };
            let options = PatternOptions {
                case_insensitive: cli_arg.ignore_case,
                ..Default::default()
            };
            let timeout = cli_arg.timeout_ms.map(Duration::from_millis);
            Demo::Pattern(PatternRestrictor::try_new(config, pattern, options, timeout)?)
        }
    })
}

fn report(parse_as: ParseAs, text: &str, is_password: bool) -> miette::Result<()> {
    match parse_as {
        ParseAs::Text if is_password => {
            println!("Read a password of {} characters.", text.chars().count());
        }
        ParseAs::Text => println!("Text: {text:?}"),
        ParseAs::Int => println!("Int: {}", coerce_committed_text::<i64>(text)?),
        ParseAs::Float => println!("Float: {}", coerce_committed_text::<f64>(text)?),
        ParseAs::Bool => println!("Bool: {}", coerce_committed_text::<bool>(text)?),
    }
    Ok(())
}
