use std::{fs, io::Read, process};

use log::debug;
use normal_form_helper::{Grammar, GrammarError};

fn print_help() {
    println!("Usage: normal-form-helper [actions] outputs [options] [grammar file]");
    println!("actions:");
    println!("  cnf: Convert to Chomsky normal form");
    println!("  gnf: Convert to Greibach normal form");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  nullable: Non-terminals with a λ-production");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -J: Read the grammar as JSON");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn print_output(g: &Grammar, output: &str, format: &OutputFormat) -> Result<(), GrammarError> {
    match output {
        "prod" => {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => g.to_json()?,
                }
            );
        }
        "nullable" => {
            let nullable = g.nullable_non_terminals();
            println!(
                "{}",
                match format {
                    OutputFormat::JSON => serde_json::to_string(&nullable)
                        .map_err(|e| GrammarError::Json(e.to_string()))?,
                    _ => nullable.into_iter().collect::<Vec<_>>().join(", "),
                }
            );
        }
        _ => unreachable!(),
    }
    Ok(())
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut actions: Vec<&str> = Vec::new();
    let mut outputs: Vec<&str> = Vec::new();
    let mut i: usize = 0;
    while i < args.len() && ["cnf", "gnf"].contains(&args[i].as_str()) {
        actions.push(args[i].as_str());
        i += 1;
    }
    while i < args.len() && ["prod", "nullable"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut json_input = false;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-J"].contains(&args[i].as_str()) {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            _ => json_input = true,
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return Ok(());
    }

    let input = if i == args.len() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        fs::read_to_string(args[i].as_str())?
    };

    let mut g = if json_input {
        Grammar::from_json(&input)?
    } else {
        Grammar::parse(&input)?
    };
    debug!(
        "Read {} non-terminals, {} productions",
        g.rules.len(),
        g.production_count()
    );

    for action in actions {
        g = match action {
            "cnf" => g.to_cnf()?,
            _ => g.to_gnf()?,
        };
    }

    for output in outputs {
        print_output(&g, output, &output_format)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
