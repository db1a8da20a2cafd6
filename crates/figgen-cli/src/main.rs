use clap::{Parser, Subcommand, ValueEnum};
use figgen_codegen::{CompilerOutput, GeneratorConfig, Target};
use figgen_model::DesignNode;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "figgen")]
#[command(about = "Markup and CSS generator for design node trees")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate markup + CSS from an exported design tree (.json)
    Build {
        /// Input tree file
        path: String,

        /// Markup flavor
        #[arg(short, long, value_enum)]
        target: Option<Flavor>,

        /// Component tag prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Generator config file (.json)
        #[arg(short, long)]
        config: Option<String>,

        /// Directory for generated files (defaults to the input's directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Print node and rule counts
        #[arg(long)]
        stats: bool,
    },

    /// Check that a design tree loads and generates without writing output
    Check {
        /// Input tree file
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Flavor {
    Html,
    #[value(alias = "jsx")]
    React,
}

impl From<Flavor> for Target {
    fn from(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Html => Target::Html,
            Flavor::React => Target::React,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build {
            path,
            target,
            prefix,
            config,
            out_dir,
            stats,
        } => {
            let mut cfg = config.as_deref().map(load_config).unwrap_or_default();
            if let Some(target) = target {
                cfg.target = target.into();
            }
            if let Some(prefix) = prefix {
                cfg.prefix = prefix;
            }
            cmd_build(&path, &cfg, out_dir.as_deref(), stats);
        }
        Command::Check { path } => cmd_check(&path),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn load_tree(path: &str) -> DesignNode {
    let source = read_source(path);
    match DesignNode::from_json(&source) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error in {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: &str) -> GeneratorConfig {
    let source = read_source(path);
    match serde_json::from_str(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid config {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn generate(path: &str, config: &GeneratorConfig) -> CompilerOutput {
    let tree = load_tree(path);
    match figgen_codegen::compile(&tree, config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Codegen error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_build(path: &str, config: &GeneratorConfig, out_dir: Option<&str>, stats: bool) {
    let output = generate(path, config);

    // Write output files next to the source unless told otherwise
    let input = Path::new(path);
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let dir = match out_dir {
        Some(dir) => PathBuf::from(dir),
        None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error creating {}: {e}", dir.display());
        std::process::exit(1);
    }

    let markup_path = dir.join(format!("{stem}.{}", config.target.extension()));
    let css_path = dir.join(format!("{stem}.css"));

    let markup = match config.target {
        Target::Html => standalone_page(stem, &output),
        Target::React => output.markup.clone(),
    };
    write_file(&markup_path, &markup);
    if !output.css.is_empty() {
        write_file(&css_path, &output.css);
    }

    if stats {
        eprintln!(
            "Nodes: {}, id rules: {}, class rules: {}",
            output.stats.nodes, output.stats.id_rules, output.stats.class_rules
        );
    }
    eprintln!("Built: {}", markup_path.display());
}

/// Wrap HTML markup in a page that links the generated stylesheet.
fn standalone_page(stem: &str, output: &CompilerOutput) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("  <title>{stem}</title>\n"));
    if !output.css.is_empty() {
        html.push_str(&format!("  <link rel=\"stylesheet\" href=\"{stem}.css\">\n"));
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&output.markup);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn write_file(path: &Path, contents: &str) {
    let mut contents = contents.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    if let Err(e) = std::fs::write(path, contents) {
        eprintln!("Error writing {}: {e}", path.display());
        std::process::exit(1);
    }
}

fn cmd_check(path: &str) {
    generate(path, &GeneratorConfig::default());
    eprintln!("OK: {path}");
}
