//! Command-line interface for nova
//! Converts pseudocode files to Java and optionally compiles and runs the result.
//!
//! Usage:
//!   nova convert `<path>` [--format `<format>`]  - Print the generated Java
//!   nova emit `<path>` --out `<dir>`             - Write one .java file per class
//!   nova run `<path>`                            - Convert, compile and run
//!   nova list-rules                            - List the loaded conversion rules
//!
//! Configuration layers, last wins: built-in defaults, `./nova.toml` if present,
//! then `--config <file>`. `--rules <file>` overrides `rules.path`.

use clap::{Arg, ArgMatches, Command};
use nova::nova::config::{Loader, NovaConfig, PROJECT_FILE};
use nova::nova::pipeline::{emit_units, Conversion, Transpiler};
use nova::nova::rules::Substitution;
use nova::nova::runner::{self, JavacRunner, LaunchOutcome, OutputLine};
use std::io::BufRead;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("nova")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts pseudocode into Java source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .short('r')
                .global(true)
                .help("Rule file (JSON, or YAML by extension) replacing the built-in rules"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a pseudocode file and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the pseudocode file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: 'java', 'units' or 'model'")
                        .value_parser(["java", "units", "model"])
                        .default_value("java"),
                ),
        )
        .subcommand(
            Command::new("emit")
                .about("Convert a pseudocode file and write one .java file per class")
                .arg(
                    Arg::new("path")
                        .help("Path to the pseudocode file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output directory")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Convert, compile and run a pseudocode file")
                .arg(
                    Arg::new("path")
                        .help("Path to the pseudocode file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-rules").about("List the loaded conversion rules in order"))
        .get_matches();

    let config = load_config(&matches);
    let transpiler = Transpiler::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let path = convert_matches.get_one::<String>("path").unwrap();
            let format = convert_matches.get_one::<String>("format").unwrap();
            handle_convert_command(&transpiler, path, format);
        }
        Some(("emit", emit_matches)) => {
            let path = emit_matches.get_one::<String>("path").unwrap();
            let out = emit_matches.get_one::<String>("out").unwrap();
            handle_emit_command(&transpiler, path, out);
        }
        Some(("run", run_matches)) => {
            let path = run_matches.get_one::<String>("path").unwrap();
            handle_run_command(&transpiler, &config, path);
        }
        Some(("list-rules", _)) => {
            handle_list_rules_command(&transpiler);
        }
        _ => unreachable!(),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `nova=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nova=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> NovaConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(path) = matches.get_one::<String>("rules") {
        loader = loader
            .set_override("rules.path", path.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

fn convert_or_exit(transpiler: &Transpiler, path: &str) -> Conversion {
    transpiler.convert_file(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(transpiler: &Transpiler, path: &str, format: &str) {
    let conversion = convert_or_exit(transpiler, path);
    match format {
        "units" => {
            for unit in &conversion.program.units {
                println!("// ===== {} =====", unit.file_name);
                print!("{}", unit.source);
            }
        }
        "model" => {
            let json = serde_json::to_string_pretty(&conversion.model).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        _ => print!("{}", conversion.program.display()),
    }
}

/// Handle the emit command
fn handle_emit_command(transpiler: &Transpiler, path: &str, out: &str) {
    let conversion = convert_or_exit(transpiler, path);
    let written = emit_units(&conversion.program, out).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    for path in written {
        println!("{}", path.display());
    }
}

/// Handle the run command
fn handle_run_command(transpiler: &Transpiler, config: &NovaConfig, path: &str) {
    let conversion = convert_or_exit(transpiler, path);
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let code = runtime.block_on(async {
        let javac = JavacRunner::from_config(&config.build);
        let outcome = runner::launch(&javac, &config.build.work_dir, &conversion.program).await;
        let mut program = match outcome {
            Ok(LaunchOutcome::Running(program)) => program,
            Ok(LaunchOutcome::BuildFailed { diagnostics }) => {
                eprint!("{}", diagnostics);
                return 1;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        };

        let input = program.input();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if input.send(line).is_err() {
                    break;
                }
            }
        });

        while let Some(line) = program.next_output().await {
            match line {
                OutputLine::Stdout(text) => println!("{}", text),
                OutputLine::Stderr(text) => eprintln!("{}", text),
            }
        }
        program.wait().await.unwrap_or(1)
    });

    // the stdin thread may still be blocked on a read
    std::process::exit(code);
}

/// Handle the list-rules command
fn handle_list_rules_command(transpiler: &Transpiler) {
    println!("Loaded conversion rules (first match wins):\n");
    for rule in transpiler.rules().iter() {
        match rule.substitution() {
            Substitution::CountedLoop => println!("  {} (counted loop)", rule.keyword()),
            Substitution::Positional => println!("  {}", rule.keyword()),
        }
        for pattern in rule.sources() {
            println!("    /{}/", pattern);
        }
        println!("    -> {}", rule.template());
    }
}
