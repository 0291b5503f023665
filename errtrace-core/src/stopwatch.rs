use std::{
    fmt,
    time::{Duration, Instant},
};

/// Times an interval and keeps an ordered log of comments made along the way.
///
/// The clock starts on construction. The first [`stop`](StopWatch::stop)
/// freezes the elapsed time; later calls return the frozen value.
#[derive(Debug, Clone)]
pub struct StopWatch {
    started: Instant,
    stopped: Option<Duration>,
    comments: Vec<String>,
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl StopWatch {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            stopped: None,
            comments: Vec::new(),
        }
    }

    pub fn with_comment<C>(comment: C) -> Self
    where
        C: Into<String>,
    {
        let mut sw = Self::new();
        sw.add_comment(comment);
        sw
    }

    /// Appends a comment; empty and whitespace-only comments are ignored.
    pub fn add_comment<C>(&mut self, comment: C)
    where
        C: Into<String>,
    {
        let comment = comment.into();

        if !comment.trim().is_empty() {
            self.comments.push(comment);
        }
    }

    pub fn stop(&mut self) -> Duration {
        *self.stopped.get_or_insert_with(|| self.started.elapsed())
    }

    /// Stops the clock, then records `comment`.
    pub fn stop_with<C>(&mut self, comment: C) -> Duration
    where
        C: Into<String>,
    {
        let elapsed = self.stop();
        self.add_comment(comment);
        elapsed
    }

    /// Time since construction, or up to the first stop.
    pub fn elapsed(&self) -> Duration {
        match self.stopped {
            Some(elapsed) => elapsed,
            None => self.started.elapsed(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn count_comments(&self) -> usize {
        self.comments.len()
    }

    pub fn last_comment(&self) -> Option<&str> {
        self.comments.last().map(String::as_str)
    }

    /// Comments joined by `separator`, then `separator` and the elapsed seconds.
    pub fn to_string_with(&self, separator: &str) -> String {
        format!(
            "{}{separator}{}",
            self.comments.join(separator),
            self.elapsed().as_secs_f64()
        )
    }
}

impl fmt::Display for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with("\n"))
    }
}
