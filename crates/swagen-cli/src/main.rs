use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swagen_core::config::{self, BuildOptions, CONFIG_FILE_NAME, Language, ModuleFormat};
use swagen_core::document::{self, Document};
use swagen_core::{BuildOutput, Pipeline};
use swagen_jsdoc::JsGenerator;
use swagen_typescript::TsGenerator;

#[derive(Parser)]
#[command(name = "swagen", about = "Swagger v2 client code generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate types and operation stubs from Swagger documents
    Generate {
        /// Input document paths (YAML or JSON); empty falls back to config
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Output file path; empty writes to stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Output language
        #[arg(short, long, value_enum)]
        language: Option<CliLanguage>,

        /// Module style of the dispatch-import line
        #[arg(short, long, value_enum)]
        format: Option<CliFormat>,

        /// Literal text prepended to the emitted source
        #[arg(long)]
        intro: Option<String>,

        /// Literal text appended to the emitted source
        #[arg(long)]
        outro: Option<String>,

        /// Built-in plugins to enable, in order
        #[arg(short, long = "plugin")]
        plugins: Vec<String>,

        /// Build documents one at a time instead of in parallel
        #[arg(short = 'e', long)]
        serial: bool,

        /// Suppress stdout emission when no output path is given
        #[arg(short, long)]
        silent: bool,

        /// Write a pretty-printed .json sidecar of each input document
        #[arg(long)]
        debug: bool,

        /// Config file path (defaults to .swagen.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse a Swagger document and report what it contains
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a default .swagen.yaml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLanguage {
    Js,
    Ts,
    Dts,
}

impl From<CliLanguage> for Language {
    fn from(language: CliLanguage) -> Self {
        match language {
            CliLanguage::Js => Language::Js,
            CliLanguage::Ts => Language::Ts,
            CliLanguage::Dts => Language::Dts,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    Es,
    Cjs,
}

impl From<CliFormat> for ModuleFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Es => ModuleFormat::Es,
            CliFormat::Cjs => ModuleFormat::Cjs,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            input,
            output,
            language,
            format,
            intro,
            outro,
            plugins,
            serial,
            silent,
            debug,
            config,
        } => cmd_generate(GenerateArgs {
            input,
            output,
            language,
            format,
            intro,
            outro,
            plugins,
            serial,
            silent,
            debug,
            config,
        }),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagen", &mut std::io::stdout());
            Ok(())
        }
    }
}

struct GenerateArgs {
    input: Vec<PathBuf>,
    output: Option<String>,
    language: Option<CliLanguage>,
    format: Option<CliFormat>,
    intro: Option<String>,
    outro: Option<String>,
    plugins: Vec<String>,
    serial: bool,
    silent: bool,
    debug: bool,
    config: Option<PathBuf>,
}

impl GenerateArgs {
    /// One build job per CLI input, flags layered over defaults.
    fn cli_jobs(&self) -> Vec<BuildOptions> {
        self.input
            .iter()
            .map(|input| {
                let mut options = BuildOptions {
                    input: input.display().to_string(),
                    ..BuildOptions::default()
                };
                if let Some(output) = &self.output {
                    options.output.path = output.clone();
                }
                if let Some(language) = self.language {
                    options.output.language = language.into();
                }
                if let Some(format) = self.format {
                    options.output.format = format.into();
                }
                if let Some(intro) = &self.intro {
                    options.output.intro = intro.clone();
                }
                if let Some(outro) = &self.outro {
                    options.output.outro = outro.clone();
                }
                options.plugins = self.plugins.clone();
                options.silent = self.silent;
                options.debug = self.debug;
                options
            })
            .collect()
    }
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let loaded = config::load_config(&config_path).unwrap_or_default();

    let mut jobs = loaded.documents;
    jobs.extend(args.cli_jobs());
    if jobs.is_empty() {
        bail!("no input documents: pass --input or list documents in {CONFIG_FILE_NAME}");
    }

    let serial = args.serial || loaded.serial;
    if serial {
        // Serial mode stops the whole sequence at the first failure.
        for job in jobs {
            let input = job.input.clone();
            let output = run_job(job).with_context(|| format!("failed to build {input}"))?;
            report(&input, &output);
        }
        return Ok(());
    }

    // Parallel mode isolates failures per document.
    let mut failures = 0usize;
    std::thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let input = job.input.clone();
                (input, scope.spawn(move || run_job(job)))
            })
            .collect();
        for (input, handle) in handles {
            match handle.join() {
                Ok(Ok(output)) => report(&input, &output),
                Ok(Err(err)) => {
                    failures += 1;
                    eprintln!("error: {input}: {err:#}");
                }
                Err(_) => {
                    failures += 1;
                    eprintln!("error: {input}: build panicked");
                }
            }
        }
    });
    if failures > 0 {
        bail!("{failures} document build(s) failed");
    }
    Ok(())
}

/// Build one document end to end: load, parse, pipeline, best-effort format.
fn run_job(options: BuildOptions) -> Result<BuildOutput> {
    let document = load_document(Path::new(&options.input))?;

    let mut pipeline = Pipeline::new(options)?;
    pipeline.register_generator(Box::new(TsGenerator));
    pipeline.register_generator(Box::new(JsGenerator));
    let output = pipeline.build(document)?;

    if let Some(path) = &output.written_to {
        try_format(path);
    }
    Ok(output)
}

fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let document = match ext {
        "json" => document::from_json(&content)?,
        _ => document::from_yaml(&content)?,
    };
    Ok(document)
}

fn report(input: &str, output: &BuildOutput) {
    match &output.written_to {
        Some(path) => eprintln!("{} -> {}", input, path.display()),
        None => log::debug!("{input} -> stdout"),
    }
}

/// Run the external formatter over a written file when it is available; the
/// emitted code is already well-formed, so a missing formatter only costs
/// cosmetics.
fn try_format(path: &Path) {
    match Command::new("npx")
        .args(["@biomejs/biome", "format", "--write"])
        .arg(path)
        .output()
    {
        Ok(result) if result.status.success() => {
            eprintln!("  formatted {}", path.display());
        }
        Ok(_) => {
            eprintln!(
                "  warning: biome reported issues formatting {}",
                path.display()
            );
        }
        Err(_) => {
            log::debug!(
                "biome not found; run `npx @biomejs/biome format --write {}` to format",
                path.display()
            );
        }
    }
}

fn cmd_validate(input: &Path) -> Result<()> {
    let document = load_document(input)?;

    eprintln!(
        "Valid Swagger {} document: {}",
        document.swagger, document.info.title
    );
    eprintln!("  Version: {}", document.info.version);
    eprintln!("  Paths: {}", document.paths.len());
    eprintln!("  Definitions: {}", document.definitions.len());

    let operations: usize = document
        .paths
        .values()
        .map(|item| item.operations().count())
        .sum();
    eprintln!("  Operations: {operations}");
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }
    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
