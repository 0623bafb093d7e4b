// Stability runner - load a snapshot file and print the mean pairwise distance
//
// Usage:
//   cargo run --bin stability_model
//   cargo run --bin stability_model -- data/run1.txt
//   cargo run --bin stability_model -- --config stability.yaml --summary

use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use log::{debug, error};
use simple_logger::SimpleLogger;

use stability_model::{
    CollectorEventSink, LoggingEventSink, MultiEventSink, RecordLoader, StabilityAnalyzer,
    StabilityConfig,
};

struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    summary: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} [INPUT] [--config FILE.yaml] [--summary]", program);
    eprintln!("\nExamples:");
    eprintln!("  {}", program);
    eprintln!("  {} data/run1.txt", program);
    eprintln!("  {} --config stability.yaml --summary", program);
    process::exit(1);
}

fn parse_args(args: &[String]) -> Args {
    let program = args.first().map(String::as_str).unwrap_or("stability_model");
    let mut parsed = Args {
        input: None,
        config: None,
        summary: false,
    };

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => match rest.next() {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => usage(program),
            },
            "--summary" => parsed.summary = true,
            "-h" | "--help" => usage(program),
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                usage(program);
            }
            other if parsed.input.is_none() => parsed.input = Some(PathBuf::from(other)),
            _ => usage(program),
        }
    }

    parsed
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args);

    let mut config = match &args.config {
        Some(path) => StabilityConfig::from_yaml_file(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        }),
        None => StabilityConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_path = input;
    }

    if let Err(e) = SimpleLogger::new()
        .with_level(config.log_level.into())
        .init()
    {
        eprintln!("logger: {}", e);
    }

    debug!("config: {:?}", config);

    // log as we go, keep a copy for the summary
    let collector = Rc::new(RefCell::new(CollectorEventSink::new()));
    let mut sink = MultiEventSink::new();
    sink.add_sink(Box::new(LoggingEventSink::new()));
    sink.add_sink(Box::new(collector.clone()));

    let mut loader = RecordLoader::with_sink(sink).with_policy(config.malformed_lines);
    let records = loader.load_records(&config.input_path);
    println!("{}", records.len());

    let analyzer = StabilityAnalyzer::new(config.pair_mode);
    match analyzer.analyze(&records) {
        Ok(report) => {
            // Debug keeps the trailing ".0" on whole numbers
            println!("{:?}", report.mean);
            if args.summary {
                report.print_summary();
                let events = collector.borrow();
                println!("  Malformed lines: {}", events.malformed().count());
                println!("  I/O failures: {}", events.failures().count());
            }
        }
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    }
}
