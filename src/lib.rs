//! # Stability Model
//!
//! Measures how far apart simulation snapshots sit from one another. Each
//! snapshot records a step, a message count, a state count and an infected
//! count; the stability metric is the mean Euclidean distance between the
//! (step, infected) points of every ordered pair of distinct snapshots.
//!
//! ## Core Components
//!
//! - **RecordLoader**: reads a snapshot file (header line, then one record per line)
//! - **StabilityAnalyzer**: all-pairs distance aggregation
//! - **EventSink**: diagnostic sink injected into the loader
//!
//! ```no_run
//! use stability_model::{RecordLoader, StabilityAnalyzer};
//!
//! let mut loader = RecordLoader::new();
//! let records = loader.load_records("testesis.txt");
//!
//! match StabilityAnalyzer::default().compute_mean_pairwise_distance(&records) {
//!     Ok(mean) => println!("{}", mean),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod sm_analyzer;
pub mod sm_config;
pub mod sm_interface;
pub mod sm_loader;
pub mod sm_sinks;

// Re-export commonly used types
pub use sm_analyzer::{euclidean_distance, AnalysisError, PairMode, StabilityAnalyzer, StabilityReport};
pub use sm_config::{ConfigError, LogLevel, StabilityConfig, DEFAULT_INPUT};
pub use sm_interface::{Event, EventSink, LineNumber, NoOpSink, Record};
pub use sm_loader::{parse_line, LoadError, MalformedLinePolicy, ParseError, RecordLoader};
pub use sm_sinks::{CollectorEventSink, EventRecord, LoggingEventSink, MultiEventSink};
