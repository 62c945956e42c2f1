//! Tendril CLI entry point.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rhizome_tendril_ir::Node;
use rhizome_tendril_runtime::{LogTracer, NoTrace, Runtime, RuntimeConfig, TraceHook};
use rhizome_tendril_runtime_interp::Value;
use rhizome_tendril_syntax_sexpr::parse;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tendril")]
#[command(about = "Compile and run Tendril programs")]
struct Cli {
    /// Library to compile against (defaults to the configured one)
    #[arg(short, long, global = true)]
    library: Option<String>,

    /// Runtime configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every stage of the run
    #[arg(long, global = true)]
    trace: bool,

    /// Print values as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program file
    Run {
        /// Source file, JSON node file, or - for stdin
        file: String,
    },

    /// Run a program given on the command line
    Eval {
        /// Program source
        source: String,
    },

    /// Print the node tree of a program as JSON
    Parse {
        /// Source file or - for stdin
        file: String,
    },

    /// Print the compiled form of a program
    Compile {
        /// Source file, JSON node file, or - for stdin
        file: String,
    },

    /// List registered libraries and their functions
    Libraries,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rhizome_tendril=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };
    let runtime = Runtime::from_config(&config)?;
    let library = cli
        .library
        .clone()
        .unwrap_or_else(|| runtime.default_library().to_string());
    debug!(library = %library, "using library");

    let mut tracer: Box<dyn TraceHook> = if cli.trace {
        Box::new(LogTracer)
    } else {
        Box::new(NoTrace)
    };

    match cli.command {
        Commands::Run { file } => {
            let input = read_input(&file)?;
            let value = if is_json(&file) {
                runtime.run_nodes(&json_nodes(&input)?, &library, tracer.as_mut())?
            } else {
                runtime.run(&input, &library, tracer.as_mut())?
            };
            print_value(&value, cli.json)?;
        }

        Commands::Eval { source } => {
            let value = runtime.run(&source, &library, tracer.as_mut())?;
            print_value(&value, cli.json)?;
        }

        Commands::Parse { file } => {
            let nodes = parse(&read_input(&file)?)?;
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }

        Commands::Compile { file } => {
            let input = read_input(&file)?;
            let units = if is_json(&file) {
                runtime.compile_nodes(&json_nodes(&input)?, &library)?
            } else {
                runtime.compile(&input, &library)?
            };
            for unit in units {
                println!("{:#?}", unit);
            }
        }

        Commands::Libraries => {
            let registry = runtime.registry();
            for name in registry.names() {
                match registry.resolve(name) {
                    Ok(resolved) => println!("{}: {}", name, resolved.functions().join(" ")),
                    Err(err) => println!("{}: <{}>", name, err),
                }
            }
        }
    }

    Ok(())
}

fn read_input(file: &str) -> std::io::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
    }
}

fn is_json(file: &str) -> bool {
    file.ends_with(".json")
}

/// Accepts either one node or an array of nodes.
fn json_nodes(input: &str) -> Result<Vec<Node>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|node| vec![node])
    }
}

fn print_value(value: &Value, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
