//! Export helpers for CSV and JSON trajectory artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use drone_core::Point;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    pub const HEADER: &str = "index,time_s,x,y,z";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        create_parent(path)?;
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn create_parent(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the trajectory exporter. `time_s` is blank for untimed samples.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub index: usize,
        pub time_s: Option<f64>,
        pub point: Point,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let time = self.time_s.map(|t| format!("{t:.6}")).unwrap_or_default();
            writeln!(
                writer,
                "{},{},{:.9},{:.9},{:.9}",
                self.index, time, self.point.x, self.point.y, self.point.z,
            )
        }
    }

    /// Write a header and one row per record.
    pub fn write_csv(writer: &mut dyn Write, records: &[Record]) -> io::Result<()> {
        write_header(writer)?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }

    #[derive(Debug, Clone, Serialize)]
    struct Sample {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        time_s: Option<f64>,
        x: f64,
        y: f64,
        z: f64,
    }

    /// Descriptive fields stored alongside the samples in the JSON document.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub from: Point,
        pub to: Point,
        pub motion: Option<&'a str>,
    }

    #[derive(Serialize)]
    struct TrajectoryDocument<'a> {
        generated_utc: String,
        from: [f64; 3],
        to: [f64; 3],
        #[serde(skip_serializing_if = "Option::is_none")]
        motion: Option<&'a str>,
        points: usize,
        samples: Vec<Sample>,
    }

    /// Write a pretty-printed JSON document describing the trajectory.
    pub fn write_json(path: &Path, meta: &Metadata<'_>, records: &[Record]) -> io::Result<()> {
        create_parent(path)?;
        let doc = TrajectoryDocument {
            generated_utc: chrono::Utc::now().to_rfc3339(),
            from: meta.from.to_array(),
            to: meta.to.to_array(),
            motion: meta.motion,
            points: records.len(),
            samples: records
                .iter()
                .map(|r| Sample {
                    index: r.index,
                    time_s: r.time_s,
                    x: r.point.x,
                    y: r.point.y,
                    z: r.point.z,
                })
                .collect(),
        };
        let mut writer = BufWriter::new(File::create(path)?);
        to_writer_pretty(&mut writer, &doc).map_err(io::Error::other)?;
        writer.flush()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn records() -> Vec<Record> {
            vec![
                Record {
                    index: 0,
                    time_s: None,
                    point: Point::new(0.0, 0.0, 5.0),
                },
                Record {
                    index: 1,
                    time_s: Some(0.5),
                    point: Point::new(1.0, 0.0, 5.0),
                },
            ]
        }

        #[test]
        fn csv_rows_follow_header() {
            let mut buf: Vec<u8> = Vec::new();
            write_csv(&mut buf, &records()).unwrap();
            let text = String::from_utf8(buf).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines[0], HEADER);
            assert_eq!(lines[1], "0,,0.000000000,0.000000000,5.000000000");
            assert_eq!(lines[2], "1,0.500000,1.000000000,0.000000000,5.000000000");
        }

        #[test]
        fn json_document_contains_samples() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("traj.json");
            let meta = Metadata {
                from: Point::new(0.0, 0.0, 5.0),
                to: Point::new(1.0, 0.0, 5.0),
                motion: Some("accelerated"),
            };
            write_json(&path, &meta, &records()).unwrap();
            let value: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(value["points"], 2);
            assert_eq!(value["motion"], "accelerated");
            assert_eq!(value["to"][0], 1.0);
            assert!(value["samples"][0].get("time_s").is_none());
            assert_eq!(value["samples"][1]["time_s"], 0.5);
            assert!(value["generated_utc"].as_str().is_some());
        }
    }
}
