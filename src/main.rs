//! Command-line interface for ionschema

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use ionschema::constraints::{Annotations, AnnotationsMatcher, Constraint, Violations};
#[cfg(feature = "cli")]
use ionschema::{documents, Element};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "ionschema")]
#[command(author, version, about = "Ion Schema annotations constraint checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check Ion values against an annotations declaration
    Check {
        /// The declaration, e.g. "required::ordered::[a, optional::b]"
        #[arg(short, long, value_name = "ION")]
        constraint: String,

        /// Ion values to check
        #[arg(value_name = "VALUE")]
        values: Vec<String>,

        /// Read additional values from an Ion text file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show how a declaration compiles
    Inspect {
        /// The declaration, e.g. "required::ordered::[a, optional::b]"
        #[arg(short, long, value_name = "ION")]
        constraint: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            constraint,
            values,
            file,
            json,
        } => cmd_check(constraint, values, file, json),
        Commands::Inspect { constraint, json } => cmd_inspect(constraint, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every value was valid
#[cfg(feature = "cli")]
fn cmd_check(
    constraint: String,
    values: Vec<String>,
    file: Option<PathBuf>,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let declaration = documents::read_value(&constraint)?;
    let constraint = Annotations::new(&declaration)?;

    let mut candidates: Vec<Element> = values
        .iter()
        .map(|v| documents::read_value(v))
        .collect::<Result<_, _>>()?;
    if let Some(path) = file {
        let content = fs::read_to_string(&path)?;
        candidates.extend(documents::read_values(&content)?);
    }

    let mut all_valid = true;
    let mut reports = Vec::new();

    for value in &candidates {
        let mut violations = Violations::new();
        constraint.validate(value, &mut violations);
        all_valid &= violations.is_valid();

        if json_output {
            reports.push(serde_json::json!({
                "value": value.to_string(),
                "valid": violations.is_valid(),
                "violations": violations,
            }));
        } else if violations.is_valid() {
            println!("✓ {}", value);
        } else {
            println!("✗ {}", value);
            for violation in &violations {
                println!("  - {}: {}", violation.code, violation.message);
            }
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(all_valid)
}

#[cfg(feature = "cli")]
fn cmd_inspect(constraint: String, json_output: bool) -> Result<bool, Box<dyn std::error::Error>> {
    use serde_json::json;

    let declaration = documents::read_value(&constraint)?;
    let compiled = Annotations::new(&declaration)?;

    let strategy = if compiled.is_ordered() { "ordered" } else { "unordered" };

    if json_output {
        let annotations: Vec<serde_json::Value> = compiled
            .annotations()
            .iter()
            .map(|a| json!({ "text": a.text(), "required": a.is_required() }))
            .collect();

        let mut output = json!({
            "name": compiled.name(),
            "declaration": compiled.declaration().to_string(),
            "strategy": strategy,
            "annotations": annotations,
        });

        if let AnnotationsMatcher::Ordered(ordered) = compiled.matcher() {
            let automaton = ordered.automaton();
            output["automaton"] = json!({
                "states": automaton.state_count(),
                "transitions": automaton
                    .transitions()
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>(),
            });
        }

        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(true);
    }

    println!("ionschema v{}", ionschema::VERSION);
    println!();
    println!("Constraint: {}: {}", compiled.name(), compiled.declaration());
    println!("Strategy: {}", strategy);
    println!();
    println!("=== Annotations ===");
    for annotation in compiled.annotations() {
        let flag = if annotation.is_required() { "required" } else { "optional" };
        println!("  {} ({})", annotation.text(), flag);
    }

    if let AnnotationsMatcher::Ordered(ordered) = compiled.matcher() {
        println!();
        println!("=== Automaton ===");
        print!("{}", ordered.automaton());
    }

    Ok(true)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
