//! The batch converter: walks the input tree and renders every allowed file into a
//! mirrored PDF under the output tree.
//!
//! Every failure is recovered at file granularity. Problems are written to the log and the
//! run moves on to the next file; nothing is retried and partially written output from a
//! failed engine run is left where it is.

use crate::discovery::{self, FileTask};
use crate::engine::RenderEngine;
use crate::job::ConversionJob;
use crate::markup;
use log::{debug, error, info};
use std::fmt;
use std::path::Path;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Converted,
    Failed,
}

/// Tally of a run over the input directory
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub converted: usize,
    pub failed: usize,
    /// The input directory wasn't there, so nothing was attempted
    pub input_missing: bool,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} converted, {} failed", self.converted, self.failed)
    }
}

pub struct Converter<E> {
    job: ConversionJob,
    engine: E,
}

impl<E: RenderEngine> Converter<E> {
    pub fn new(job: ConversionJob, engine: E) -> Converter<E> {
        Converter { job, engine }
    }

    pub fn job(&self) -> &ConversionJob {
        &self.job
    }

    /// Wrap source text into the markup the engine renders
    pub fn render(&self, text: &str, language_hint: &str) -> String {
        markup::render(text, language_hint, self.job.markup())
    }

    /// Render `markup` to `destination`, logging rather than returning any failure.
    pub fn convert_one(&self, markup: &str, destination: &Path) -> Outcome {
        match self.engine.render(markup, destination, self.job.options()) {
            Ok(()) => Outcome::Converted,
            Err(e) => {
                error!("Error converting {}: {e:#}", destination.display());
                Outcome::Failed
            }
        }
    }

    /// Convert a single file, which must live under the job's input root.
    pub fn process_file(&self, source: &Path) -> Outcome {
        match FileTask::new(self.job.input_root(), source) {
            Ok(task) => self.process_task(&task),
            Err(e) => {
                error!("Error processing {}: {e:#}", source.display());
                Outcome::Failed
            }
        }
    }

    fn process_task(&self, task: &FileTask) -> Outcome {
        let text = match std::fs::read_to_string(&task.source) {
            Ok(text) => text,
            Err(e) => {
                error!("Error reading {}: {e}", task.source.display());
                return Outcome::Failed;
            }
        };

        let markup = self.render(&text, task.language_hint());
        let destination = task.destination(self.job.output_root());

        if let Some(parent) = destination.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!(
                    "Error creating directories for {}: {e}",
                    destination.display()
                );
                return Outcome::Failed;
            }
        }

        let outcome = self.convert_one(&markup, &destination);
        if outcome == Outcome::Converted {
            info!(
                "Converted {} to {}",
                task.source.display(),
                destination.display()
            );
        }
        outcome
    }

    /// Convert every allowed file under the input root. Never fails; see the log for
    /// anything that went wrong.
    pub fn process_directory(&self) -> Summary {
        let root = self.job.input_root();
        if !root.exists() {
            error!(
                "Error: Input directory {} does not exist.",
                root.display()
            );
            return Summary {
                input_missing: true,
                ..Summary::default()
            };
        }
        if !root.is_dir() {
            error!(
                "Error: Input directory {} is not a directory.",
                root.display()
            );
            return Summary {
                input_missing: true,
                ..Summary::default()
            };
        }

        let tasks = discovery::discover(&self.job);
        debug!(
            "found {} file(s) to convert in {}",
            tasks.len(),
            root.display()
        );

        let mut summary = Summary::default();
        for task in tasks.iter() {
            summary.record(self.process_task(task));
        }
        summary
    }
}
