//! lintlayer CLI
//!
//! Entry point for the `lintlayer` command-line tool.

use clap::{Parser, Subcommand};
use lintlayer::pipeline::{self, PipelineOptions};
use lintlayer::{Catalogue, ProjectType, RepoSettings};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "lintlayer")]
#[command(about = "Detect a project's profile and compose its lint configuration", version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the project profile
    Detect {
        /// Project directory
        #[arg(short = 'C', long = "dir", default_value = ".")]
        dir: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the composed configuration
    Compose {
        /// Project directory
        #[arg(short = 'C', long = "dir", default_value = ".")]
        dir: PathBuf,

        /// Force a profile, skipping detection
        #[arg(long, short = 'p')]
        profile: Option<ProjectType>,

        /// Path to settings file (default: <dir>/.lintlayer.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the full report (evidence, provenance, digest)
        #[arg(long)]
        report: bool,

        /// Single-line JSON regardless of settings
        #[arg(long)]
        compact: bool,
    },

    /// Show which entries and layers govern a file
    Explain {
        /// Project directory
        #[arg(short = 'C', long = "dir", default_value = ".")]
        dir: PathBuf,

        /// Force a profile, skipping detection
        #[arg(long, short = 'p')]
        profile: Option<ProjectType>,

        /// Path to settings file (default: <dir>/.lintlayer.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// File path, relative to the project directory
        file: String,
    },

    /// List catalogue layers
    Layers {
        /// Only layers active for this profile
        #[arg(long, short = 'p')]
        profile: Option<ProjectType>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Validate a settings file
    Verify {
        /// Path to settings file (default: .lintlayer.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Detect { dir, json } => run_detect(dir, json),
        Commands::Compose {
            dir,
            profile,
            config,
            report,
            compact,
        } => {
            let options = PipelineOptions::new(dir)
                .with_profile(profile)
                .with_settings_path(config);
            run_compose(&options, report, compact);
        }
        Commands::Explain {
            dir,
            profile,
            config,
            json,
            file,
        } => {
            let options = PipelineOptions::new(dir)
                .with_profile(profile)
                .with_settings_path(config);
            run_explain(&options, &file, json);
        }
        Commands::Layers { profile, json } => run_layers(profile, json),
        Commands::Verify { config } => run_verify(config),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_detect(dir: PathBuf, json_output: bool) {
    let (evidence, detection) = pipeline::detect_in(&dir);

    if json_output {
        print_json(&serde_json::json!({
            "profile": detection.profile,
            "reason": detection.reason,
            "evidence": evidence,
        }));
        return;
    }

    println!("Profile: {}", detection.summary());
    match &evidence.manifest_path {
        Some(path) => println!(
            "  Manifest: {} ({} dependencies)",
            path.display(),
            evidence.dependency_names.len()
        ),
        None => println!("  Manifest: none"),
    }
    println!("  Type config: {}", if evidence.has_type_config { "yes" } else { "no" });
    if !evidence.local_extension_hints.is_empty() {
        let extensions: Vec<&str> = evidence
            .local_extension_hints
            .iter()
            .map(String::as_str)
            .collect();
        println!("  Extensions: {}", extensions.join(", "));
    }
}

fn run_compose(options: &PipelineOptions, report: bool, compact: bool) {
    let mut composition = match pipeline::run(options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error composing configuration: {}", e);
            process::exit(1);
        }
    };
    if compact {
        composition.pretty = false;
    }

    let output = if report {
        composition.to_report_json().map_err(|e| e.to_string())
    } else {
        composition.to_engine_json().map_err(|e| e.to_string())
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_explain(options: &PipelineOptions, file: &str, json_output: bool) {
    let composition = match pipeline::run(options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error composing configuration: {}", e);
            process::exit(1);
        }
    };

    let entries = match composition.config.entries_for(file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error matching '{}': {}", file, e);
            process::exit(1);
        }
    };

    if json_output {
        let output: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "files": e.scope,
                    "layers": e.layers,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "file": file,
            "profile": composition.profile,
            "profile_source": composition.profile_source,
            "entries": output,
        }));
        return;
    }

    println!(
        "{} ({} profile, {})",
        file, composition.profile, composition.profile_source
    );
    for entry in entries {
        let scope = if entry.is_global() {
            "<all files>".to_string()
        } else {
            entry.scope.join(", ")
        };
        println!("  {}", scope);
        for layer in &entry.layers {
            println!("    - {}", layer);
        }
    }
}

fn run_layers(profile: Option<ProjectType>, json_output: bool) {
    let catalogue = match Catalogue::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalogue: {}", e);
            process::exit(1);
        }
    };

    let layers: Vec<_> = match profile {
        Some(profile) => catalogue.active_for(profile).collect(),
        None => catalogue.layers().iter().collect(),
    };

    if json_output {
        let output: Vec<serde_json::Value> = layers
            .iter()
            .map(|l| {
                serde_json::json!({
                    "name": l.name(),
                    "stage": l.stage(),
                    "activation": l.activation(),
                    "scope": l.scope(),
                    "fields": l.fields().keys().collect::<Vec<_>>(),
                })
            })
            .collect();
        print_json(&output);
        return;
    }

    for layer in layers {
        let scope = if layer.is_global() {
            "<all files>".to_string()
        } else {
            layer.scope().join(", ")
        };
        println!(
            "{:<24} {:<10} {:<40} {}",
            layer.name(),
            layer.stage().to_string(),
            layer.activation().to_string(),
            scope
        );
    }
}

fn run_verify(config_path: Option<PathBuf>) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(lintlayer::config::SETTINGS_FILE));

    match RepoSettings::from_file(&path) {
        Ok(settings) => {
            println!("Configuration valid: {}", path.display());
            println!();
            match &settings.profile {
                Some(profile) => println!("  Profile: {}", profile),
                None => println!("  Profile: detected"),
            }
            println!("  Pretty output: {}", settings.output.pretty);
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}
