use anyhow::{Context, Result};
use clap::Parser;
use padcalc::calculator::{Calculator, Key, parse_script};
use padcalc::config::Config;
use padcalc::keypad::{COLUMNS, Keypad, Point};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless host for the keypad calculator.
///
/// Keys are applied in this order: positional KEYS, then --script, then
/// --tap. With none of them, every stdin line is read as a key script.
#[derive(Parser, Debug)]
#[command(name = "padcalc", version, about)]
struct Cli {
    /// Key labels to press, e.g. `2 + 2 =`
    #[arg(allow_hyphen_values = true)]
    keys: Vec<Key>,

    /// Compact key script, e.g. "√9)="
    #[arg(short, long)]
    script: Option<String>,

    /// Press and release the pointer at window coordinates
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    tap: Vec<Point>,

    /// Print the state after every key
    #[arg(long)]
    trace: bool,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Print the keypad layout and exit
    #[arg(long)]
    layout: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let mut keypad = Keypad::new(config.window.width, config.window.height, config.window.line)
        .context("Failed to lay out keypad")?;

    if cli.layout {
        print_layout(&keypad);
        return Ok(());
    }

    let mut calc = Calculator::new(config.texts());
    let mut host = Host {
        trace: cli.trace,
        calc: &mut calc,
    };

    let mut keys = cli.keys.clone();
    if let Some(script) = &cli.script {
        keys.extend(parse_script(script).context("Invalid key script")?);
    }
    for &point in &cli.tap {
        match keypad.tap(point) {
            Some(key) => keys.push(key),
            None => warn!(x = point.x, y = point.y, "tap hit no button"),
        }
    }

    if keys.is_empty() && cli.tap.is_empty() && cli.script.is_none() {
        info!("reading key scripts from stdin");
        host.run_stdin()?;
    } else {
        host.press_all(keys);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&calc.snapshot())?);
    } else {
        print_state(&calc);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Feeds keys into the calculator, optionally echoing every step.
struct Host<'a> {
    trace: bool,
    calc: &'a mut Calculator,
}

impl Host<'_> {
    fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.calc.press(key);
            if self.trace {
                println!(
                    "{:>3}  {:<32} | {}",
                    key.label(),
                    self.calc.expression(),
                    self.calc.result_line()
                );
            }
        }
    }

    fn run_stdin(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            match parse_script(&line) {
                Ok(keys) => self.press_all(keys),
                Err(e) => {
                    warn!(%e, "skipping line");
                    continue;
                }
            }
            if !self.trace {
                print_state(self.calc);
            }
            stdout.flush()?;
        }

        Ok(())
    }
}

fn print_state(calc: &Calculator) {
    println!("{}", calc.result_line());
    println!("{}", calc.expression());
}

fn print_layout(keypad: &Keypad) {
    let layout = keypad.layout();
    let (width, height) = layout.window_size();
    let desk = layout.desk();

    println!("window {width}x{height}");
    println!(
        "desk   {}x{} at ({}, {})",
        desk.width, desk.height, desk.x, desk.y
    );

    for row in layout.buttons().chunks(COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|(key, rect)| format!("{:>2} @ {:>3},{:<3}", key.label(), rect.x, rect.y))
            .collect();
        println!("{}", cells.join("  "));
    }
}
