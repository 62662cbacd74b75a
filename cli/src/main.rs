mod error_formatter;
mod formatter;
mod minizinc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formatter::Formatter;
use minizinc::MiniZinc;
use rust_decimal::Decimal;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zinc::{Interval, Model, ModelOptions, SolveOptions};

#[derive(Parser)]
#[command(name = "zinc")]
#[command(about = "Build constraint models and hand them to MiniZinc.")]
#[command(
    long_about = "Zinc reads constraint models written as declarations and constraints, renders them as\ncanonical MiniZinc text, and streams solutions back from a MiniZinc solver."
)]
#[command(version)]
struct Cli {
    /// Log what the model builder and solver backend are doing
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ModelArgs {
    /// Model source file ('-' reads standard input)
    file: PathBuf,
    /// Fail on names that were never declared instead of declaring them
    #[arg(long)]
    no_auto_declare: bool,
    /// Domain for implicitly declared variables (format: low..high)
    #[arg(long, value_name = "LOW..HIGH", default_value = "0..255", value_parser = parse_interval)]
    default_domain: Interval,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical rendered document
    ///
    /// Parses the model source, declares any implicitly referenced names and prints
    /// the declarations followed by the fully parenthesized constraints.
    Render {
        #[command(flatten)]
        model: ModelArgs,
    },
    /// List declared variables and their domains
    Vars {
        #[command(flatten)]
        model: ModelArgs,
        /// Print declarations only (for piping to other tools)
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// Verify that every referenced name is declared
    ///
    /// Loads the model with auto-declare disabled and fails on the first
    /// undeclared name.
    Check {
        /// Model source file ('-' reads standard input)
        file: PathBuf,
    },
    /// List the solvers MiniZinc knows about
    Solvers {
        /// MiniZinc executable
        #[arg(long, env = "MINIZINC", default_value = "minizinc")]
        minizinc: PathBuf,
    },
    /// Solve the model with a MiniZinc solver and print the solutions
    Solve {
        #[command(flatten)]
        model: ModelArgs,
        /// Solver id, id suffix or tag (e.g. gecode, chuffed, cp)
        #[arg(short, long, default_value = "gecode")]
        solver: String,
        /// Report all solutions
        #[arg(short, long)]
        all: bool,
        /// Stop after this many solutions
        #[arg(short = 'n', long = "solutions")]
        solutions: Option<usize>,
        /// Time limit in milliseconds
        #[arg(long = "time-limit", value_name = "MS")]
        time_limit: Option<u64>,
        /// Ignore search annotations
        #[arg(long)]
        free_search: bool,
        /// MiniZinc executable
        #[arg(long, env = "MINIZINC", default_value = "minizinc")]
        minizinc: PathBuf,
        /// Output one JSON object per solution
        #[arg(short = 'r', long)]
        raw: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Render { model } => render_command(model),
        Commands::Vars { model, raw } => vars_command(model, *raw),
        Commands::Check { file } => check_command(file),
        Commands::Solvers { minizinc } => solvers_command(minizinc),
        Commands::Solve {
            model,
            solver,
            all,
            solutions,
            time_limit,
            free_search,
            minizinc,
            raw,
        } => {
            let options = SolveOptions {
                all_solutions: *all,
                solution_limit: *solutions,
                time_limit_ms: *time_limit,
                free_search: *free_search,
            };
            solve_command(model, solver, &options, minizinc, *raw)
        }
    };

    if let Err(e) = result {
        // Check if it's a ZincError and format it nicely, otherwise use default
        if let Some(zinc_err) = e.downcast_ref::<zinc::ZincError>() {
            eprintln!("{}", error_formatter::format_error(zinc_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "zinc=debug" } else { "zinc=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn render_command(args: &ModelArgs) -> Result<()> {
    let model = load_model(args)?;
    println!("{}", model.render());
    Ok(())
}

fn vars_command(args: &ModelArgs, raw: bool) -> Result<()> {
    let model = load_model(args)?;
    if raw {
        for var in model.variables() {
            println!("{};", var.as_declaration());
        }
    } else {
        print!("{}", Formatter::default().format_variables(&model));
    }
    Ok(())
}

fn check_command(file: &Path) -> Result<()> {
    let options = ModelOptions::new().with_auto_declare(false);
    let (source, source_id) = read_source(file)?;
    let model = Model::from_source(&source, &source_id, options)?;
    model.check()?;
    println!(
        "{}: {} variable(s), {} constraint(s), all declared",
        source_id,
        model.variables().len(),
        model.constraints().len()
    );
    Ok(())
}

fn solvers_command(executable: &Path) -> Result<()> {
    let configs = MiniZinc::new(executable).solver_configs()?;
    print!("{}", Formatter::default().format_solvers(&configs));
    Ok(())
}

fn solve_command(
    args: &ModelArgs,
    solver: &str,
    options: &SolveOptions,
    executable: &Path,
    raw: bool,
) -> Result<()> {
    let model = load_model(args)?;
    let registry = MiniZinc::new(executable).registry()?;
    debug!(solvers = ?registry.solvers(), "available solvers");

    let formatter = Formatter::default();
    let mut found = 0;
    for solution in model.solve(&registry, solver, options)? {
        let solution = solution?;
        found += 1;
        print!("{}", formatter.format_solution(found, &solution, raw));
    }

    if found == 0 && !raw {
        println!("No solutions found");
    }
    Ok(())
}

fn load_model(args: &ModelArgs) -> Result<Model> {
    let options = ModelOptions::new()
        .with_auto_declare(!args.no_auto_declare)
        .with_default_domain(args.default_domain.clone());
    let (source, source_id) = read_source(&args.file)?;
    let model = Model::from_source(&source, &source_id, options)?;
    debug!(
        source_id = %source_id,
        variables = model.variables().len(),
        constraints = model.constraints().len(),
        "model loaded"
    );
    Ok(model)
}

/// Read model source from a file, or from stdin for `-`
fn read_source(file: &Path) -> Result<(String, String)> {
    if file == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read model from stdin")?;
        return Ok((source, "<stdin>".to_string()));
    }
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read model file {}", file.display()))?;
    Ok((source, file.to_string_lossy().to_string()))
}

/// Parse "low..high" into an interval
fn parse_interval(s: &str) -> Result<Interval, String> {
    let (low, high) = s
        .split_once("..")
        .ok_or_else(|| format!("expected LOW..HIGH, got '{}'", s))?;
    let low: Decimal = low
        .trim()
        .parse()
        .map_err(|e| format!("invalid lower bound '{}': {}", low, e))?;
    let high: Decimal = high
        .trim()
        .parse()
        .map_err(|e| format!("invalid upper bound '{}': {}", high, e))?;
    Interval::new(low, high).map_err(|e| e.to_string())
}
