//! Standalone CLI tool for the four inputmex operations.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use inputmex_core::recording::RecordingBackend;
use inputmex_core::{InputBackend, InputFacade, KeyAction, MouseAction, Point};

#[derive(Parser)]
#[command(
    name = "inputmex",
    about = "Read/move the cursor and send key or mouse button events"
)]
struct Args {
    /// Record events in memory and print them instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cursor position
    Pos,
    /// Send a key transition
    Key {
        /// Virtual key code (hex, e.g. 0x0D for Enter)
        #[arg(value_parser = parse_hex_or_dec)]
        vk_code: u8,
        /// down, up, press (or 1, 2, 3)
        #[arg(default_value = "press")]
        action: KeyAction,
    },
    /// Send a mouse button action at the cursor
    Mouse {
        /// left-down, left-up, right-down, right-up, middle-down, middle-up,
        /// left-click, right-click, middle-click, double-left-click (or 1-10)
        action: MouseAction,
    },
    /// Move the cursor to absolute screen coordinates
    Move {
        /// X coordinate
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Y coordinate
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
}

fn parse_hex_or_dec(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u8>().map_err(|e| e.to_string())
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run<B: InputBackend>(args: &Args, facade: &InputFacade<B>) {
    match &args.command {
        Command::Pos => {
            let p = facade.cursor();
            if args.json {
                println!("{}", serde_json::json!({ "x": p.x, "y": p.y }));
            } else {
                println!("{} {}", p.x, p.y);
            }
        }
        Command::Key { vk_code, action } => {
            let count = facade.key(*vk_code, *action);
            report(
                args.json,
                count,
                &format!("key 0x{vk_code:02X} {}", action.name()),
            );
        }
        Command::Mouse { action } => {
            let count = facade.mouse(*action);
            report(args.json, count, &format!("mouse {}", action.name()));
        }
        Command::Move { x, y } => {
            let to = Point::new(*x, *y);
            facade.move_to(to);
            report(args.json, 1, &format!("moved cursor to {to}"));
        }
    }
}

fn report(json: bool, count: u32, what: &str) {
    if json {
        println!("{}", serde_json::json!({ "action": what, "events": count }));
    } else {
        println!("Sent {count} events ({what})");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.dry_run {
        let recorder = RecordingBackend::new();
        run(&args, &InputFacade::new(&recorder));
        for event in recorder.events() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("dry-run: {line}"),
                Err(e) => log::warn!("cannot serialize {event:?}: {e}"),
            }
        }
        return ExitCode::SUCCESS;
    }

    match inputmex_core::system_backend() {
        Ok(backend) => {
            run(&args, &InputFacade::new(backend));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("inputmex: {e}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
