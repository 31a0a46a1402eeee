use anyhow::{Context, Result};
use cauchy::{compile, ButcherTableau, MethodTable, SolveOptions, Solver};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Verbosity of diagnostics written to stderr
  #[arg(long, global = true, default_value = "warn")]
  log_level: LevelFilter,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Solve a Cauchy problem, e.g. `solve "y' = cos(x)*y" "y(0) = 2"`
  Solve {
    /// Equation as `dy/dx = <expr>` or `y' = <expr>`
    equation: String,
    /// Initial condition as `y(x0) = y0`
    condition: String,
    /// Distance between samples
    #[arg(long, default_value_t = 0.05)]
    step: f64,
    /// Span of the independent variable to cover
    #[arg(long, default_value_t = 100.0)]
    breadth: f64,
    /// RK4, EULER, 3/8, or custom to use --a/--b/--c
    #[arg(long, default_value = "custom")]
    method: String,
    /// Custom tableau rows separated by `;`, entries by `,` (e.g. ";0.5")
    #[arg(long, allow_hyphen_values = true)]
    a: Option<String>,
    /// Custom tableau weights separated by `,`
    #[arg(long, allow_hyphen_values = true)]
    b: Option<String>,
    /// Custom tableau nodes separated by `,`
    #[arg(long, allow_hyphen_values = true)]
    c: Option<String>,
    /// Use the implicit (backward Euler) scheme
    #[arg(long)]
    implicit: bool,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
  },
  /// Evaluate a derivative expression at one point
  Eval {
    expression: String,
    /// Name of the dependent variable
    #[arg(long, default_value_t = 'y')]
    func: char,
    /// Name of the independent variable
    #[arg(long, default_value_t = 'x')]
    var: char,
    #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f64,
    #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
    y: f64,
  },
  /// List the registered methods and their coefficients
  Methods,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
  Table,
  Csv,
  Json,
}

struct StderrLogger;

impl Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      eprintln!("[{}] {}", record.level(), record.args());
    }
  }

  fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn parse_row(text: &str) -> Result<Vec<f64>> {
  text
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse::<f64>()
        .with_context(|| format!("invalid coefficient `{s}`"))
    })
    .collect()
}

fn custom_tableau(
  a: Option<String>,
  b: Option<String>,
  c: Option<String>,
) -> Result<ButcherTableau> {
  match (a, b, c) {
    (None, None, None) => Ok(ButcherTableau::rk4()),
    (Some(a), Some(b), Some(c)) => {
      let rows = a.split(';').map(parse_row).collect::<Result<Vec<_>>>()?;
      ButcherTableau::new(rows, parse_row(&b)?, parse_row(&c)?)
        .context("invalid custom tableau")
    }
    _ => anyhow::bail!("a custom tableau needs all of --a, --b and --c"),
  }
}

fn print_tableau(name: &str, tableau: &ButcherTableau) {
  println!("{name} ({} stages)", tableau.stages());
  for (j, row) in tableau.a_rows().iter().enumerate() {
    println!("  c{j} = {:<10.6} a{j} = {row:?}", tableau.c()[j]);
  }
  println!("  b  = {:?}", tableau.b());
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  log::set_logger(&LOGGER)
    .map(|()| log::set_max_level(cli.log_level))
    .context("failed to install logger")?;

  match cli.command {
    Commands::Solve {
      equation,
      condition,
      step,
      breadth,
      method,
      a,
      b,
      c,
      implicit,
      format,
    } => {
      let solver = Solver::new(&equation, &condition)
        .with_context(|| format!("cannot set up `{equation}`, `{condition}`"))?;
      let options = SolveOptions::default()
        .with_step(step)
        .with_breadth(breadth)
        .with_method(method)
        .with_tableau(custom_tableau(a, b, c)?)
        .with_implicit(implicit);
      let solution = solver.solve(&options)?;

      match format {
        Format::Table => {
          println!("{solver}");
          println!("method: {}", solution.method);
          for (x, y) in &solution.points {
            println!("{x:>14.6} {y:>22.12}");
          }
        }
        Format::Csv => {
          let equation = solver.equation();
          println!("{},{}", equation.var_name(), equation.func_name());
          for (x, y) in &solution.points {
            println!("{x},{y}");
          }
        }
        Format::Json => {
          let points: Vec<[f64; 2]> =
            solution.points.iter().map(|(x, y)| [*x, *y]).collect();
          let document = serde_json::json!({
            "title": solver.title(),
            "method": solution.method,
            "warnings": solution.warnings,
            "points": points,
          });
          println!("{}", serde_json::to_string_pretty(&document)?);
        }
      }
    }
    Commands::Eval {
      expression,
      func,
      var,
      x,
      y,
    } => {
      let compiled = compile(&expression, func, var)?;
      println!("{}", compiled.evaluate(x, y)?);
    }
    Commands::Methods => {
      for name in MethodTable::names() {
        if let Some(tableau) = MethodTable::lookup(name) {
          print_tableau(name, tableau);
        }
      }
    }
  }
  Ok(())
}
