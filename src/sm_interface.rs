use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 1-based line number in the input file (0 when an event is not tied to a line)
pub type LineNumber = usize;

/// One snapshot of a simulation run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub step: i32,
    pub message_count: i32,
    pub state_count: i32,
    pub infected_count: i32,
}

impl Record {
    pub fn new(step: i32, message_count: i32, state_count: i32, infected_count: i32) -> Self {
        Self {
            step,
            message_count,
            state_count,
            infected_count,
        }
    }

    /// The (step, infected) coordinate used by the stability metric
    pub fn point(&self) -> (i32, i32) {
        (self.step, self.infected_count)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.step, self.message_count, self.state_count, self.infected_count
        )
    }
}

/// Diagnostic events emitted while loading
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Input file could not be opened
    OpenFailed { path: String, reason: String },
    /// I/O error while reading a line
    ReadFailed { reason: String },
    /// A parsed token was not a valid integer
    MalformedLine {
        token: String,
        position: usize,
        reason: String,
    },
    /// Load done (records kept, malformed lines skipped)
    LoadFinished { records: usize, skipped: usize },
}

/// Diagnostic sink injected into the loader
pub trait EventSink {
    fn log(&mut self, line: LineNumber, event: Event);
}

/// No-op event sink (drops everything)
pub struct NoOpSink;

impl EventSink for NoOpSink {
    #[inline(always)]
    fn log(&mut self, _line: LineNumber, _event: Event) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn log(&mut self, line: LineNumber, event: Event) {
        (**self).log(line, event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn log(&mut self, line: LineNumber, event: Event) {
        (**self).log(line, event)
    }
}

/// Shared sink, readable after it has been handed to a loader
impl<S: EventSink + ?Sized> EventSink for Rc<RefCell<S>> {
    fn log(&mut self, line: LineNumber, event: Event) {
        self.borrow_mut().log(line, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_point_uses_step_and_infected() {
        let r = Record::new(7, 100, 3, 42);
        assert_eq!(r.point(), (7, 42));
    }

    #[test]
    fn test_record_default_is_zero() {
        assert_eq!(Record::default(), Record::new(0, 0, 0, 0));
    }

    #[test]
    fn test_record_display() {
        assert_eq!(Record::new(1, 5, 2, 0).to_string(), "1 5 2 0");
    }

    #[test]
    fn test_sink_through_mut_ref() {
        struct Counter(usize);
        impl EventSink for Counter {
            fn log(&mut self, _line: LineNumber, _event: Event) {
                self.0 += 1;
            }
        }

        fn emit_twice<S: EventSink>(mut sink: S) {
            sink.log(1, Event::ReadFailed { reason: "x".into() });
            sink.log(2, Event::ReadFailed { reason: "y".into() });
        }

        let mut counter = Counter(0);
        emit_twice(&mut counter);
        assert_eq!(counter.0, 2);
    }
}
