use crate::error::VfdtError;
use crate::evaluation::Snapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

impl CurveFormat {
    /// Parses a format name such as `"csv"` or `"JSON"`.
    pub fn parse(name: &str) -> Result<Self, VfdtError> {
        name.parse().map_err(|_| VfdtError::UnknownVariant {
            kind: "curve format",
            value: name.to_string(),
        })
    }
}

/// Ordered snapshots of one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    entries: Vec<Snapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.entries.last().copied()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<(), VfdtError> {
        let mut w = BufWriter::new(File::create(path)?);
        match fmt {
            CurveFormat::Csv => self.write_delimited(&mut w, ',')?,
            CurveFormat::Tsv => self.write_delimited(&mut w, '\t')?,
            CurveFormat::Json => {
                serde_json::to_writer_pretty(&mut w, &self.entries)?;
                writeln!(w)?;
            }
        }
        w.flush()?;
        Ok(())
    }

    fn write_delimited<W: Write>(&self, w: &mut W, delimiter: char) -> Result<(), VfdtError> {
        writeln!(
            w,
            "instances_seen{d}accuracy{d}kappa{d}model_bytes{d}seconds",
            d = delimiter
        )?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}{d}{}{d}{:.6}",
                s.instances_seen,
                s.accuracy,
                s.kappa,
                s.model_bytes,
                s.seconds,
                d = delimiter
            )?;
        }
        Ok(())
    }
}
