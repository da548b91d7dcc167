use anyhow::Context;
use clap::Parser;
use docsmith::{rcfile, Config, Pipeline, Registry};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default rc-file looked up in the working directory.
const DEFAULT_RC_FILE: &str = ".docsmithrc";

#[derive(Parser, Debug)]
#[command(
    name = "docsmith",
    version,
    about = "Generate documentation sites from source files",
    long_about = "Generate documentation sites from source files.\n\n\
    Discovers files under the given paths, applies exclusion patterns, and \
    hands the file list to the selected renderer. Default arguments can be \
    stored in a .docsmithrc file (one or more shell-style words per line, \
    '#' lines are comments) and are injected before parsing.\n\n\
    USAGE EXAMPLES:\n  \
      # Document the lib directory\n  \
      docsmith lib\n\n  \
      # Exclude generated markdown anywhere in the tree\n  \
      docsmith lib --exclude '**/*.markdown'\n\n  \
      # Pick an output location and title\n  \
      docsmith lib src -o ./docs -t 'My Project API'"
)]
struct Cli {
    /// Source files location
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Glob patterns of filenames to exclude (you can use wildcards: ?, *, **)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Resulting file(s) location
    #[arg(short, long, default_value = "out", value_name = "PATH")]
    output: PathBuf,

    /// Documentation title template; any {package.*} variable is interpolated
    #[arg(
        short,
        long,
        default_value = "{package.name} {package.version} API documentation",
        value_name = "TEMPLATE"
    )]
    title: String,

    /// Documentation renderer; more can be added by custom plugins
    #[arg(short, long, default_value = "json", value_name = "RENDERER")]
    render: String,

    /// Split the output into a file per class
    #[arg(short, long)]
    split: bool,

    /// Prepend output file names with a prefix string
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Append output file names with a suffix string
    #[arg(long, value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Do not wipe the output directory before building
    #[arg(long)]
    keep_out_dir: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let argv = effective_args().context("Failed to read rc file")?;
    let cli = Cli::parse_from(&argv);

    setup_tracing(cli.verbose)?;

    let registry = Registry::default();

    // Renderer choices are resolved from the registry on demand, so plugins
    // registered above are validated like built-ins.
    let choices = registry.names();
    if !choices.contains(&cli.render) {
        anyhow::bail!(
            "unknown renderer '{}' (available: {})",
            cli.render,
            choices.join(", ")
        );
    }

    let mut builder = Config::builder()
        .paths(cli.paths)
        .exclude(cli.exclude)
        .output(cli.output)
        .title(cli.title)
        .renderer(cli.render)
        .split(cli.split)
        .keep_out_dir(cli.keep_out_dir);

    if let Some(prefix) = cli.prefix {
        builder = builder.prefix(prefix);
    }

    if let Some(suffix) = cli.suffix {
        builder = builder.suffix(suffix);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = Pipeline::with_registry(config, registry)
        .context("Failed to create pipeline")?
        .run()
        .context("Build failed")?;

    stats.print_summary();
    Ok(())
}

/// Builds the effective argument list, splicing in rc-file arguments before
/// parsing happens.
///
/// The rc-file path comes from `DOCSMITH_RC` when set (and must then be
/// readable), otherwise `.docsmithrc` in the working directory is used when
/// present.
fn effective_args() -> docsmith::Result<Vec<String>> {
    let argv: Vec<String> = std::env::args().collect();

    match std::env::var_os("DOCSMITH_RC") {
        Some(path) => rcfile::inject(Path::new(&path), &argv),
        None => {
            let default = Path::new(DEFAULT_RC_FILE);
            if default.exists() {
                rcfile::inject(default, &argv)
            } else {
                Ok(argv)
            }
        }
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("docsmith=info"),
        1 => EnvFilter::new("docsmith=debug"),
        _ => EnvFilter::new("docsmith=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
