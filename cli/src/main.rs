use std::env;
use std::path::PathBuf;

use anyhow::bail;

use netweave_weaver::{Module, Severity, WeaveConfig, WeavePass};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }
    if matches!(args[1].as_str(), "--help" | "-h" | "help") {
        print_help();
        return;
    }

    match parse_args(&args[1..]) {
        Ok(options) => {
            if let Err(err) = run(options) {
                eprintln!("[ERROR] {:#}", err);
                std::process::exit(1);
            }
        }
        Err(message) => {
            eprintln!("{}", message);
            print_help();
            std::process::exit(1);
        }
    }
}

enum Output {
    Path(PathBuf),
    InPlace,
}

struct Options {
    input: PathBuf,
    output: Output,
    references: Vec<PathBuf>,
    root_type: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut input = None;
    let mut output = None;
    let mut in_place = false;
    let mut references = Vec::new();
    let mut root_type = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = iter.next().ok_or("Missing value for -o/--output")?;
                output = Some(PathBuf::from(value));
            }
            "--in-place" => in_place = true,
            "--ref" => {
                let value = iter.next().ok_or("Missing value for --ref")?;
                references.push(PathBuf::from(value));
            }
            "--root" => {
                let value = iter.next().ok_or("Missing value for --root")?;
                root_type = Some(value.clone());
            }
            other if !other.starts_with('-') && input.is_none() => {
                input = Some(PathBuf::from(other));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    let input = input.ok_or("No input module given")?;
    let output = match (output, in_place) {
        (Some(_), true) => return Err("Choose either -o/--output or --in-place, not both".into()),
        (Some(path), false) => Output::Path(path),
        (None, true) => Output::InPlace,
        (None, false) => return Err("No output given: pass -o <path> or --in-place".into()),
    };

    Ok(Options {
        input,
        output,
        references,
        root_type,
    })
}

fn run(options: Options) -> anyhow::Result<()> {
    let module = Module::load(&options.input)?;
    let mut references = Vec::with_capacity(options.references.len());
    for path in &options.references {
        references.push(Module::load(path)?);
    }

    let mut config = WeaveConfig::builder();
    if let Some(root) = &options.root_type {
        config.root_type(root);
    }
    let pass = WeavePass::new(config.build());

    log::info!(
        "Weaving module {} ({} behaviour(s))",
        module.name,
        module.behaviours.len()
    );
    let outcome = pass.run(&module, &references);

    // Full ordered diagnostics sequence goes to the build log
    for diagnostic in outcome.diagnostics.iter() {
        match diagnostic.severity {
            Severity::Error => eprintln!("[ERROR] {}", diagnostic),
            Severity::Warning => eprintln!("[WARN] {}", diagnostic),
        }
    }

    if outcome.has_errors() {
        bail!(
            "weave failed with {} error(s); no output written",
            outcome.diagnostics.error_count()
        );
    }

    let out_path = match &options.output {
        Output::Path(path) => path.clone(),
        Output::InPlace => options.input.clone(),
    };
    outcome.commit(&out_path)?;
    outcome.report.summary();
    println!("Wrote woven module to {}", out_path.display());
    Ok(())
}

fn print_help() {
    println!("netweave v0.1");
    println!();
    println!("USAGE:");
    println!("    netweave <MODULE> (-o <OUT> | --in-place) [OPTIONS]");
    println!();
    println!("ARGS:");
    println!("    <MODULE>         Compiled module document to weave");
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <OUT>   Write the rewritten module here");
    println!("    --in-place           Rewrite the input module in place");
    println!("    --ref <MODULE>       Reference module for resolving external types (repeatable)");
    println!("    --root <NAME>        Networked-behaviour root type (default: NetBehaviour)");
    println!("    -h, --help           Print this help message");
    println!();
    println!("EXAMPLES:");
    println!("    netweave game.module.json -o game.woven.json --ref engine.module.json");
    println!();
}
