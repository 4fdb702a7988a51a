use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use istar_core::{
    samples, transfer, ContributionType, DeniedTransfer, EvaluationConfig, EvaluationReport,
    ForwardEvaluator, Label, ModelView,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("istar")
        .version(istar_core::VERSION)
        .about("i* goal model evaluation")
        .subcommand(
            Command::new("sample")
                .about("Evaluate the meeting scheduler model: seed, propagate, judge, propagate")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Evaluation configuration (TOML)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the render view as JSON"),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Print the contribution transfer table")
                .arg(
                    Arg::new("strict-denied")
                        .long("strict-denied")
                        .action(ArgAction::SetTrue)
                        .help("Denied through MAKE stays Denied"),
                ),
        )
        .subcommand(Command::new("guideline").about("Print the label propagation rules"))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("sample", args)) => {
            let config = match args.get_one::<PathBuf>("config") {
                Some(path) => EvaluationConfig::from_file(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => EvaluationConfig::default(),
            };
            run_sample(config, args.get_flag("json"))
        }
        Some(("table", args)) => {
            let denied = if args.get_flag("strict-denied") {
                DeniedTransfer::Strict
            } else {
                DeniedTransfer::Softened
            };
            print_table(denied);
            Ok(())
        }
        Some(("guideline", _)) => {
            print!("{}", samples::GUIDELINE);
            Ok(())
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn run_sample(config: EvaluationConfig, json: bool) -> Result<()> {
    let mut model = samples::meeting_scheduler().context("building sample model")?;
    let root = model.root();
    model.find_leaf(root)?;
    model.find_root(root)?;
    model.set_labels(samples::SEEDS)?;

    let evaluator = ForwardEvaluator::new(config);
    let initial = evaluator.evaluate(&mut model)?;
    model.make_judgments(samples::JUDGMENTS)?;
    let judged = evaluator.evaluate(&mut model)?;

    let view = ModelView::of(&model);
    if json {
        println!("{}", view.to_json()?);
        return Ok(());
    }

    print_report("Initial propagation", &initial);
    print_report("After judgment", &judged);
    println!();
    for node in &view.nodes {
        let label = node.label.map_or("-", Label::as_str);
        println!("{:<72} {}", node.path, label);
    }
    Ok(())
}

fn print_report(title: &str, report: &EvaluationReport) {
    println!(
        "{}: {} boundaries, {} visits, {} judgments needed",
        title,
        report.boundaries,
        report.visits,
        report.judgments.len()
    );
    for request in &report.judgments {
        println!("  {}", request);
    }
}

fn print_table(denied: DeniedTransfer) {
    print!("{:<20}", "Source");
    for link in ContributionType::ALL {
        print!("{:>8}", link.as_str());
    }
    println!();
    for source in Label::ALL {
        print!("{:<20}", source.as_str());
        for link in ContributionType::ALL {
            print!("{:>8}", short(transfer(source, link, denied)));
        }
        println!();
    }
}

fn short(label: Label) -> &'static str {
    match label {
        Label::Satisfied => "S",
        Label::PartiallySatisfied => "PS",
        Label::Conflict => "C",
        Label::Unknown => "U",
        Label::PartiallyDenied => "PD",
        Label::Denied => "D",
    }
}
