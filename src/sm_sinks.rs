//! Event sinks for loader diagnostics

use log::{error, info, warn};

use crate::sm_interface::{Event, EventSink, LineNumber};

// ============================================================================
// Logging Sink
// ============================================================================

/// Routes events to the `log` facade. This is the default sink.
#[derive(Default)]
pub struct LoggingEventSink;

impl LoggingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LoggingEventSink {
    fn log(&mut self, line: LineNumber, event: Event) {
        match event {
            Event::OpenFailed { path, reason } => {
                error!("cannot open {}: {}", path, reason);
            }
            Event::ReadFailed { reason } => {
                error!("read failed after line {}: {}", line, reason);
            }
            Event::MalformedLine {
                token,
                position,
                reason,
            } => {
                warn!(
                    "line {}: field {} {:?} is not an integer ({})",
                    line, position, token, reason
                );
            }
            Event::LoadFinished { records, skipped } => {
                info!("loaded {} records ({} skipped)", records, skipped);
            }
        }
    }
}

// ============================================================================
// Collector Event Sink (In-Memory)
// ============================================================================

/// Collects events in memory for programmatic inspection
#[derive(Default)]
pub struct CollectorEventSink {
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub line: LineNumber,
    pub event: Event,
}

impl CollectorEventSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// I/O failures (open or read)
    pub fn failures(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().filter(|e| {
            matches!(
                e.event,
                Event::OpenFailed { .. } | Event::ReadFailed { .. }
            )
        })
    }

    pub fn malformed(&self) -> impl Iterator<Item = &EventRecord> {
        self.events
            .iter()
            .filter(|e| matches!(e.event, Event::MalformedLine { .. }))
    }

    pub fn for_line(&self, line: LineNumber) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().filter(move |e| e.line == line)
    }
}

impl EventSink for CollectorEventSink {
    fn log(&mut self, line: LineNumber, event: Event) {
        self.events.push(EventRecord { line, event });
    }
}

// ============================================================================
// Multi Sink (Combine Multiple Sinks)
// ============================================================================

/// Combines multiple event sinks
#[derive(Default)]
pub struct MultiEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl MultiEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

impl EventSink for MultiEventSink {
    fn log(&mut self, line: LineNumber, event: Event) {
        for sink in &mut self.sinks {
            sink.log(line, event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_collector_filters() {
        let mut sink = CollectorEventSink::new();
        sink.log(
            0,
            Event::OpenFailed {
                path: "missing.txt".into(),
                reason: "not found".into(),
            },
        );
        sink.log(
            3,
            Event::MalformedLine {
                token: "x".into(),
                position: 2,
                reason: "invalid digit".into(),
            },
        );
        sink.log(
            3,
            Event::LoadFinished {
                records: 1,
                skipped: 1,
            },
        );

        assert_eq!(sink.failures().count(), 1);
        assert_eq!(sink.malformed().count(), 1);
        assert_eq!(sink.for_line(3).count(), 2);
    }

    #[test]
    fn test_multi_sink_fans_out() {
        let a = Rc::new(RefCell::new(CollectorEventSink::new()));
        let b = Rc::new(RefCell::new(CollectorEventSink::new()));

        let mut multi = MultiEventSink::new();
        multi.add_sink(Box::new(a.clone()));
        multi.add_sink(Box::new(b.clone()));
        multi.add_sink(Box::new(LoggingEventSink::new()));

        multi.log(
            5,
            Event::ReadFailed {
                reason: "disk gone".into(),
            },
        );

        assert_eq!(a.borrow().events.len(), 1);
        assert_eq!(b.borrow().events, a.borrow().events);
        assert_eq!(a.borrow().events[0].line, 5);
    }
}
