use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use tsgen_core::config::{self, CONFIG_FILE_NAME, TsgenConfig};
use tsgen_core::ir::IrSpec;
use tsgen_core::output::OutputLayout;
use tsgen_core::parse::{self, document::Document};
use tsgen_core::transform;
use tsgen_core::{CodeGenerator, GeneratedFile};
use tsgen_typescript::{TypeScriptConfig, TypeScriptGenerator};

#[derive(Parser)]
#[command(
    name = "tsgen",
    about = "Generate TypeScript declarations from OpenAPI / Swagger documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations
    Generate {
        /// Document to read: a local JSON/YAML file or an http(s) URL
        #[arg(short, long)]
        input: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only generate paths starting with this prefix; one file per prefix
        #[arg(short, long = "prefix")]
        prefixes: Vec<String>,

        /// Place per-prefix files in nested directories (`a/b/type.ts`)
        #[arg(long)]
        nested: bool,

        /// Keep existing files in the output directory
        #[arg(long)]
        no_clean: bool,
    },

    /// Inspect the declarations and diagnostics of a document
    Inspect {
        /// Document to read: a local JSON/YAML file or an http(s) URL
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new tsgen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            prefixes,
            nested,
            no_clean,
        } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if let Some(input) = input {
                cfg.input = input;
            }
            if let Some(output) = output {
                cfg.output = output.display().to_string();
            }
            if !prefixes.is_empty() {
                cfg.prefixes = prefixes;
            }
            if nested {
                cfg.layout = OutputLayout::Nested;
            }
            if no_clean {
                cfg.clean = false;
            }
            cmd_generate(&cfg)
        }

        Commands::Inspect { input, format } => cmd_inspect(&input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "tsgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<TsgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read a document from a URL or a local file. Local files are parsed by
/// extension; anything else is sniffed.
fn load_document(input: &str) -> Result<Document> {
    if is_url(input) {
        log::info!("fetching {input}");
        let body = reqwest::blocking::get(input)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .with_context(|| format!("failed to fetch {input}"))?;
        return parse::from_str(&body).with_context(|| format!("failed to parse {input}"));
    }

    let path = Path::new(input);
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let parsed = match ext {
        "json" => parse::from_json(&content),
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_str(&content),
    };
    parsed.with_context(|| format!("failed to parse {}", path.display()))
}

fn report_diagnostics(ir: &IrSpec) {
    for diagnostic in &ir.diagnostics {
        log::warn!("{diagnostic}");
    }
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

/// Remove (when asked) and recreate the output directory.
fn prepare_output_dir(output_dir: &Path, clean: bool) -> Result<()> {
    if clean && output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("failed to clean {}", output_dir.display()))?;
        log::debug!("removed {}", output_dir.display());
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))
}

fn generate_file(doc: &Document, file_name: String) -> Result<Vec<GeneratedFile>> {
    let ir = transform::transform(doc);
    report_diagnostics(&ir);
    let files = TypeScriptGenerator.generate(&ir, &TypeScriptConfig { file_name })?;
    Ok(files)
}

fn cmd_generate(cfg: &TsgenConfig) -> Result<()> {
    let doc = load_document(&cfg.input)?;
    let output_dir = PathBuf::from(&cfg.output);
    prepare_output_dir(&output_dir, cfg.clean)?;

    let mut written = 0;
    if cfg.prefixes.is_empty() {
        let files = generate_file(&doc, cfg.layout.file_path(None))?;
        write_files(&output_dir, &files)?;
        written += files.len();
    } else {
        for prefix in &cfg.prefixes {
            let filtered = doc.filter_paths(std::slice::from_ref(prefix));
            if filtered.paths.is_empty() {
                log::warn!("no paths start with {prefix}");
            }
            let files = generate_file(&filtered, cfg.layout.file_path(Some(prefix)))?;
            write_files(&output_dir, &files)?;
            written += files.len();
        }
    }

    log::info!("generated {written} files in {}", output_dir.display());
    Ok(())
}

fn cmd_inspect(input: &str, format: InspectFormat) -> Result<()> {
    let doc = load_document(input)?;
    let ir = transform::transform(&doc);
    let summary = build_inspect_summary(&doc, &ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(doc: &Document, ir: &IrSpec) -> serde_json::Value {
    let declarations: Vec<serde_json::Value> = ir
        .declarations
        .iter()
        .map(|decl| {
            serde_json::json!({
                "name": decl.name,
                "origin": decl.origin.to_string(),
                "fields": decl.fields.len(),
            })
        })
        .collect();

    let diagnostics: Vec<String> = ir.diagnostics.iter().map(ToString::to_string).collect();

    serde_json::json!({
        "version": doc.version(),
        "paths": doc.paths.len(),
        "declarations": declarations,
        "diagnostics": diagnostics,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    log::info!("created {}", config_path.display());
    Ok(())
}
