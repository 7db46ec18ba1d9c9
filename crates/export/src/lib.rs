//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::{self, Write};

    use lorentz_core::PhaseState;
    use serde::Serialize;

    /// Column order of the trajectory CSV.
    pub const HEADER: [&str; 10] = [
        "scheme",
        "step",
        "time_s",
        "x_m",
        "y_m",
        "z_m",
        "px_kg_m_s",
        "py_kg_m_s",
        "pz_kg_m_s",
        "speed_m_s",
    ];

    /// CSV row emitted for every trajectory sample.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub scheme: &'a str,
        pub step: usize,
        pub time_s: f64,
        pub x_m: f64,
        pub y_m: f64,
        pub z_m: f64,
        pub px_kg_m_s: f64,
        pub py_kg_m_s: f64,
        pub pz_kg_m_s: f64,
        pub speed_m_s: f64,
    }

    impl<'a> Record<'a> {
        pub fn new(scheme: &'a str, step: usize, time_s: f64, state: &PhaseState, mass_kg: f64) -> Self {
            let position = state.position();
            let momentum = state.momentum();
            Record {
                scheme,
                step,
                time_s,
                x_m: position.x,
                y_m: position.y,
                z_m: position.z,
                px_kg_m_s: momentum.x,
                py_kg_m_s: momentum.y,
                pz_kg_m_s: momentum.z,
                speed_m_s: momentum.length() / mass_kg.abs(),
            }
        }
    }

    /// Streams one or more scheme runs into a single long-format CSV.
    pub struct TrajectoryWriter<W: Write> {
        inner: csv::Writer<W>,
    }

    impl<W: Write> TrajectoryWriter<W> {
        /// Wrap `writer` and emit the header immediately so empty exports are still valid CSV.
        pub fn new(writer: W) -> csv::Result<Self> {
            let mut inner = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            inner.write_record(HEADER)?;
            Ok(Self { inner })
        }

        /// Append every sample of one run. `times` and `states` must be the same
        /// length; a mismatch is rejected before any row is written.
        pub fn write_run(
            &mut self,
            scheme: &str,
            times: &[f64],
            states: &[PhaseState],
            mass_kg: f64,
        ) -> csv::Result<()> {
            if times.len() != states.len() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "{scheme}: {} sample times for {} states",
                        times.len(),
                        states.len()
                    ),
                )
                .into());
            }
            for (step, (time_s, state)) in times.iter().zip(states).enumerate() {
                self.inner
                    .serialize(Record::new(scheme, step, *time_s, state, mass_kg))?;
            }
            Ok(())
        }

        pub fn finish(mut self) -> csv::Result<()> {
            self.inner.flush()?;
            Ok(())
        }
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Run parameters recorded alongside the per-scheme summaries.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata {
        pub mass_kg: f64,
        pub charge_c: f64,
        pub t0_s: f64,
        pub step_s: f64,
        pub steps: usize,
    }

    #[derive(Serialize)]
    struct Sidecar<'a, S: Serialize> {
        generated_utc: DateTime<Utc>,
        #[serde(flatten)]
        metadata: &'a Metadata,
        runs: &'a [S],
    }

    /// Write a pretty-printed JSON summary of all runs to `output`.
    pub fn write_sidecar<S: Serialize>(output: &Path, metadata: &Metadata, runs: &[S]) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = Sidecar {
            generated_utc: Utc::now(),
            metadata,
            runs,
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
