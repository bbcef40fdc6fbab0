use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use transblast::diagnostics::TracingMessages;
use transblast::driver::run_script_or_exit;
use transblast::EncoderConfig;

fn print_help() {
    println!("transblast - bit-blast transition systems over a bounded unrolling");
    println!();
    println!("USAGE:");
    println!("    transblast [OPTIONS] [FILE]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help, -help           Print this help message");
    println!("    --timeframes <N>            Number of timeframes to allocate (default: 2)");
    println!("    --solve                     Check satisfiability instead of printing CNF");
    println!("    --dimacs                    Print DIMACS CNF (default)");
    println!();
    println!("ENCODING OPTIONS:");
    println!("    --no-opts                   Disable all gate-level optimizations");
    println!("    --no-const-prop             Disable constant folding in gates");
    println!("    --no-gate-sharing           Disable structural hashing of gates");
    println!();
    println!("ARGS:");
    println!("    <FILE>                      Input script (reads from stdin if not specified)");
    println!();
    println!("EXAMPLES:");
    println!("    transblast counter.tb                       # Print CNF for two timeframes");
    println!("    transblast --timeframes 8 --solve c.tb      # Unroll eight timeframes and solve");
    println!("    cat counter.tb | transblast --no-opts       # Read from stdin, no folding");
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so that CNF on stdout stays clean. Respect RUST_LOG if set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .try_init();

    debug!("starting transblast");
    let args: Vec<String> = env::args().collect();

    let mut config = EncoderConfig::default();
    let mut file_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" | "-help" => {
                print_help();
                return Ok(());
            }
            "--timeframes" => {
                i += 1;
                let Some(n) = args.get(i) else {
                    bail!("--timeframes expects a number");
                };
                config.timeframes = n
                    .parse()
                    .with_context(|| format!("invalid timeframe count `{}'", n))?;
            }
            "--solve" => {
                config.solve = true;
            }
            "--dimacs" => {
                config.solve = false;
            }
            "--no-opts" => {
                config.enable_const_prop = false;
                config.enable_gate_sharing = false;
            }
            "--no-const-prop" => {
                config.enable_const_prop = false;
            }
            "--no-gate-sharing" => {
                config.enable_gate_sharing = false;
            }
            _ => {
                if arg.starts_with('-') {
                    eprintln!("Unknown option: {}", arg);
                    print_help();
                    return Ok(());
                }
                file_path = Some(arg.clone());
            }
        }
        i += 1;
    }

    let input = if let Some(path) = file_path {
        fs::read_to_string(&path).context("failed to read input file")?
    } else {
        let mut s = String::new();
        io::stdin()
            .read_to_string(&mut s)
            .context("failed to read stdin")?;
        s
    };

    let mut messages = TracingMessages;
    let out = run_script_or_exit(&input, &config, &mut messages)
        .context("failed to process script")?;
    print!("{}", out);
    Ok(())
}
