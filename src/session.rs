//! Command Session
//!
//! Executes driver commands against one cache and writes their output.
//!
//! Output contract, one line per item:
//! - `DISCARD: <key>` for every eviction, in eviction order, ahead of any
//!   output of the command that caused it
//! - a JSON object for `get`, `remove` and `stats`
//! - the `Current cache:` block for `print`

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::cache::{render_contents, BasicCache, Cache, DiscardNotice, FnListener, PolicyCache};
use crate::config::{CacheMode, Config};
use crate::error::Result;
use crate::models::{Command, GetResponse, RemoveResponse, StatsResponse};

/// Counts reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed
    pub executed: usize,
    /// Lines that could not be parsed
    pub rejected: usize,
}

/// A cache plus the buffer its discard notices are collected in.
pub struct Session {
    config: Config,
    cache: Box<dyn Cache<String, String>>,
    discards: Rc<RefCell<Vec<String>>>,
}

impl Session {
    /// Builds the cache described by `config`.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if a bounded cache is configured with
    /// zero MAX_ITEMS.
    pub fn new(config: Config) -> Result<Self> {
        let discards: Rc<RefCell<Vec<String>>> = Rc::default();

        let cache: Box<dyn Cache<String, String>> = match config.mode {
            CacheMode::Basic => Box::new(BasicCache::<String, String>::new()),
            CacheMode::Bounded(policy) => {
                let sink = Rc::clone(&discards);
                let listener = FnListener(move |key: &String, _: &String| {
                    sink.borrow_mut().push(DiscardNotice(key).to_string());
                });
                Box::new(PolicyCache::<String, String>::with_listener(
                    policy,
                    config.max_items,
                    listener,
                )?)
            }
        };

        Ok(Self {
            config,
            cache,
            discards,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the underlying cache.
    pub fn cache(&self) -> &dyn Cache<String, String> {
        &*self.cache
    }

    // == Execute ==
    /// Runs one command and writes its output.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        debug!(?command, "executing command");

        let output = match command {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                None
            }
            Command::Get { key } => {
                let value = self.cache.get(key.as_ref()).cloned();
                Some(serde_json::to_string(&GetResponse::new(key, value))?)
            }
            Command::Remove { key } => {
                let removed = self.cache.remove(&key).is_some();
                Some(serde_json::to_string(&RemoveResponse::new(key, removed))?)
            }
            Command::Print => {
                let rendered = render_contents(&*self.cache);
                Some(rendered.trim_end_matches('\n').to_string())
            }
            Command::Stats => {
                let stats = self.cache.stats();
                let response = StatsResponse::new(&self.config, &stats);
                Some(serde_json::to_string(&response)?)
            }
        };

        for line in self.discards.borrow_mut().drain(..) {
            writeln!(out, "{}", line)?;
        }
        if let Some(output) = output {
            writeln!(out, "{}", output)?;
        }
        Ok(())
    }

    // == Run ==
    /// Executes every command line in `input`, skipping lines that do not
    /// parse.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match Command::parse_line(&line) {
                Ok(Some(command)) => {
                    self.execute(command, out)?;
                    summary.executed += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(line = index + 1, "skipping input: {}", e);
                    summary.rejected += 1;
                }
            }
        }

        out.flush()?;
        Ok(summary)
    }
}
