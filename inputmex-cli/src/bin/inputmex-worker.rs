//! JSON-RPC IPC worker for hosts that drive inputmex out of process.
//!
//! Reads line-delimited JSON requests from stdin, dispatches them to the
//! input facade, writes JSON responses to stdout.
//!
//! Request:  `{"id": 1, "method": "Keyboard", "args": [65, 3], "nargout": 0}`
//! Response: `{"id": 1, "result": []}` or
//!           `{"id": 1, "error": "...", "identifier": "inputmex:nrhs"}`
//!
//! Each element of `args` is a number or an array of numbers (a row).

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use inputmex_core::recording::RecordingBackend;
use inputmex_core::{InputBackend, InputFacade, Matrix};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "inputmex-worker", about = "inputmex IPC worker process")]
struct Args {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Record events in memory instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Deserialize)]
struct Request {
    id: u64,
    method: String,
    #[serde(default)]
    args: Vec<serde_json::Value>,
    #[serde(default)]
    nargout: usize,
}

#[derive(Serialize)]
struct Response {
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'static str>,
}

impl Response {
    fn ok(id: u64, result: serde_json::Value) -> Self {
        Response {
            id,
            result: Some(result),
            error: None,
            identifier: None,
        }
    }

    fn err(id: u64, error: String, identifier: &'static str) -> Self {
        Response {
            id,
            result: None,
            error: Some(error),
            identifier: Some(identifier),
        }
    }
}

/// Convert one JSON argument into a host matrix.
fn json_matrix(position: usize, val: &serde_json::Value) -> Result<Matrix, String> {
    match val {
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Matrix::scalar)
            .ok_or_else(|| format!("argument {position}: not representable as f64")),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| format!("argument {position}: array must hold numbers"))
            })
            .collect::<Result<Vec<f64>, String>>()
            .map(Matrix::row),
        other => Err(format!("argument {position}: expected number or array, got {other}")),
    }
}

fn dispatch<B: InputBackend>(facade: &InputFacade<B>, req: &Request) -> Response {
    if req.method == "ping" {
        return Response::ok(req.id, serde_json::Value::String("pong".to_owned()));
    }

    let args = match req
        .args
        .iter()
        .enumerate()
        .map(|(i, v)| json_matrix(i + 1, v))
        .collect::<Result<Vec<Matrix>, String>>()
    {
        Ok(args) => args,
        Err(e) => return Response::err(req.id, e, "inputmex:type"),
    };

    match facade.call(&req.method, req.nargout, &args) {
        None => Response::err(
            req.id,
            format!("unknown method: {}", req.method),
            "inputmex:unknown",
        ),
        Some(Err(e)) => Response::err(req.id, e.to_string(), e.identifier()),
        Some(Ok(outputs)) => {
            let rows: Vec<Vec<f64>> = outputs.iter().map(|m| m.data().to_vec()).collect();
            Response::ok(req.id, serde_json::Value::from(rows))
        }
    }
}

fn handle_line<B: InputBackend>(facade: &InputFacade<B>, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(req) => dispatch(facade, &req),
        // Parse error -- use id=0 since we can't extract it.
        Err(e) => Response::err(0, format!("invalid JSON: {e}"), "inputmex:json"),
    }
}

fn write_response(out: &mut impl Write, resp: &Response) -> io::Result<()> {
    match serde_json::to_string(resp) {
        Ok(json) => writeln!(out, "{json}")?,
        Err(e) => {
            log::error!("inputmex-worker: response serialization failed: {e}");
            writeln!(
                out,
                r#"{{"id":{},"error":"response serialization failed"}}"#,
                resp.id
            )?;
        }
    }
    out.flush()
}

/// Answer requests from `input` until EOF or until `out` stops accepting
/// writes; a host that closed its end gets no further side effects.
fn serve<B: InputBackend>(facade: &InputFacade<B>, input: impl BufRead, mut out: impl Write) {
    log::info!("inputmex-worker: ready");

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("inputmex-worker: stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let resp = handle_line(facade, &line);
        if let Err(e) = write_response(&mut out, &resp) {
            log::error!("inputmex-worker: stdout write error: {e}");
            break;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();

    if args.dry_run {
        serve(
            &InputFacade::new(RecordingBackend::new()),
            io::stdin().lock(),
            io::stdout(),
        );
        return ExitCode::SUCCESS;
    }

    match inputmex_core::system_backend() {
        Ok(backend) => {
            serve(&InputFacade::new(backend), io::stdin().lock(), io::stdout());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("inputmex-worker: {e}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
