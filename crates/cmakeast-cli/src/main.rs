//! cmakeast CLI - dump, resolve and export CMake-style script trees

mod printer;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Args, Parser, Subcommand};

use cmakeast_ast::Node;
use cmakeast_macros::{MacroConfig, MacroResolver};
use cmakeast_parser::{parse, ParseError};
use cmakeast_visitor::{recurse, Diagnostic, HandlerKey, Handlers, SymbolTable};

#[derive(Parser)]
#[command(name = "cmakeast")]
#[command(about = "Walk and resolve CMake-style script trees", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line per node in traversal order
    Dump {
        #[command(flatten)]
        input: InputArgs,
        /// Only print nodes for these handler keys (e.g. `function_call`)
        #[arg(long = "only", value_name = "KEY")]
        only: Vec<HandlerKey>,
    },
    /// Resolve `${name}` in include filenames and print the results
    Resolve {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        macros: MacroArgs,
    },
    /// Output the tree as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
        /// Resolve macros before printing
        #[arg(long)]
        resolve: bool,
        #[command(flatten)]
        macros: MacroArgs,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file
    file: PathBuf,
    /// Read a JSON tree (as written by `parse`) instead of script source
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MacroArgs {
    /// Predefine a macro
    #[arg(short = 'D', value_name = "NAME=VALUE", value_parser = parse_define)]
    define: Vec<(String, String)>,
    /// Command that defines macros
    #[arg(long, default_value = "set")]
    assignment_command: String,
    /// Report ignored assignments, unresolved macros and skipped nodes; exit 1 if any
    #[arg(long)]
    strict: bool,
}

impl MacroArgs {
    fn resolver(&self) -> MacroResolver {
        MacroResolver::new(MacroConfig {
            assignment_command: self.assignment_command.clone(),
        })
    }

    fn seed(&self) -> SymbolTable {
        self.define.iter().cloned().collect()
    }
}

fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{}`", s)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Dump { input, only } => cmd_dump(&input, &only),
        Commands::Resolve { input, macros } => cmd_resolve(&input, &macros),
        Commands::Parse {
            input,
            resolve,
            macros,
            pretty,
        } => cmd_parse(&input, resolve.then_some(&macros), pretty),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// A loaded tree together with the text it came from
struct Loaded {
    root: Node,
    /// Script source; `None` for JSON input, whose spans refer to another file
    source: Option<String>,
}

fn load(input: &InputArgs) -> Loaded {
    let text = match fs::read_to_string(&input.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", input.file.display(), e);
            std::process::exit(1);
        }
    };

    if input.json {
        return match Node::from_json(&text) {
            Ok(root) => Loaded { root, source: None },
            Err(e) => {
                eprintln!("Invalid tree in {}: {}", input.file.display(), e);
                std::process::exit(1);
            }
        };
    }

    match parse(&text) {
        Ok(root) => Loaded {
            root,
            source: Some(text),
        },
        Err(e) => {
            report_parse_error(&text, &input.file, &e);
            std::process::exit(1);
        }
    }
}

fn cmd_dump(input: &InputArgs, only: &[HandlerKey]) {
    let mut loaded = load(input);
    let keys = if only.is_empty() {
        printer::default_keys()
    } else {
        only.to_vec()
    };

    let lines = RefCell::new(Vec::new());
    recurse(
        &mut loaded.root,
        SymbolTable::new(),
        printer::dump_handlers(&lines, &keys),
    );

    for line in lines.into_inner() {
        println!("{}", line);
    }
}

fn cmd_resolve(input: &InputArgs, macros: &MacroArgs) {
    let mut loaded = load(input);
    let result = macros
        .resolver()
        .resolve(&mut loaded.root, macros.seed(), macros.strict);

    let includes = RefCell::new(Vec::new());
    let handlers = Handlers::new().on(HandlerKey::Include, |node, _| {
        if let Some(include) = node.as_include() {
            includes
                .borrow_mut()
                .push(format!("include {} ({}:{})", include.filename, node.line, node.col));
        }
    });
    recurse(&mut loaded.root, SymbolTable::new(), handlers);

    for line in includes.into_inner() {
        println!("{}", line);
    }
    println!("-- symbols --");
    for (name, value) in result.symbols.iter() {
        println!("{} = {}", name, value);
    }

    finish_strict(&loaded, &input.file, &result.diagnostics);
}

fn cmd_parse(input: &InputArgs, macros: Option<&MacroArgs>, pretty: bool) {
    let mut loaded = load(input);

    let diagnostics = match macros {
        Some(macros) => {
            macros
                .resolver()
                .resolve(&mut loaded.root, macros.seed(), macros.strict)
                .diagnostics
        }
        None => Vec::new(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&loaded.root)
    } else {
        serde_json::to_string(&loaded.root)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing tree: {}", e);
            std::process::exit(1);
        }
    }

    finish_strict(&loaded, &input.file, &diagnostics);
}

/// Print collected diagnostics and exit 1 if there were any
fn finish_strict(loaded: &Loaded, file: &Path, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    for diagnostic in diagnostics {
        match &loaded.source {
            Some(source) => report_diagnostic(source, file, diagnostic),
            None => eprintln!("warning: {}", diagnostic),
        }
    }
    eprintln!("✗ {} - {} diagnostic(s)", file.display(), diagnostics.len());
    std::process::exit(1);
}

fn report_parse_error(source: &str, file: &Path, error: &ParseError) {
    let span = error.span();
    let name = file.to_string_lossy().to_string();
    let printed = Report::build(ReportKind::Error, name.clone(), span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));
    if let Err(e) = printed {
        eprintln!("{}: {}", file.display(), error);
        tracing::warn!("failed to render report: {}", e);
    }
}

fn report_diagnostic(source: &str, file: &Path, diagnostic: &Diagnostic) {
    let span = diagnostic.span();
    let name = file.to_string_lossy().to_string();
    let printed = Report::build(ReportKind::Warning, name.clone(), span.start)
        .with_message(diagnostic.to_string())
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(diagnostic.to_string())
                .with_color(Color::Yellow),
        )
        .finish()
        .eprint((name, Source::from(source)));
    if let Err(e) = printed {
        eprintln!("{}: warning: {}", file.display(), diagnostic);
        tracing::warn!("failed to render report: {}", e);
    }
}
