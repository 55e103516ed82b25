//! JSON-lines frame report output

use crate::error::Result;
use blobtrack::FrameReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one JSON object per processed frame
pub struct ReportWriter<W: Write> {
    writer: W,
    written: u64,
}

impl ReportWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write_report(&mut self, report: &FrameReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobtrack::{BoundingBox, EngineConfig, FrameCycle};

    #[test]
    fn test_one_line_per_frame() {
        let mut engine = FrameCycle::new(&EngineConfig::default()).unwrap();
        let mut writer = ReportWriter::new(Vec::new());

        let report = engine.step(&[BoundingBox::new(100, 100, 20, 20)]).unwrap();
        writer.write_report(&report).unwrap();
        let report = engine.step(&[]).unwrap();
        writer.write_report(&report).unwrap();
        assert_eq!(writer.written(), 2);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["frame_index"], 0);
        assert_eq!(lines[0]["tracks"][0]["centroid"], serde_json::json!([110, 110]));
        assert_eq!(lines[1]["tracks"][0]["frames_lost"], 1);
        assert_eq!(
            lines[1]["counts"][0],
            serde_json::json!({ "policy": "dwell_time", "counts": { "total": 0 } })
        );
    }
}
