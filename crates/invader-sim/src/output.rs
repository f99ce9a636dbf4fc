//! Writing a finished run to stdout.
//!
//! The text format is the classic narration: the map before the invasion,
//! one line per destroyed city, then what is left of the map. The JSON
//! format carries the same content plus the run report.

use std::io::Write;

use invader_core::SimulationReport;
use serde::Serialize;

use crate::error::AppError;

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    initial_map: &'a [String],
    report: &'a SimulationReport,
    final_map: &'a [String],
}

/// Write the text narration.
pub fn write_text(
    out: &mut impl Write,
    initial_map: &[String],
    report: &SimulationReport,
    final_map: &[String],
) -> Result<(), AppError> {
    for line in initial_map {
        writeln!(out, "{line}")?;
    }
    for event in &report.events {
        writeln!(out, "{event}")?;
    }
    for line in final_map {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write the pretty-printed JSON document.
pub fn write_json(
    out: &mut impl Write,
    initial_map: &[String],
    report: &SimulationReport,
    final_map: &[String],
) -> Result<(), AppError> {
    let doc = JsonOutput {
        initial_map,
        report,
        final_map,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use invader_core::{DestructionEvent, EndReason};
    use invader_types::AlienId;

    use super::*;

    fn sample_report() -> SimulationReport {
        SimulationReport {
            end_reason: EndReason::AllAliensDestroyed,
            steps_run: 3,
            aliens_initial: 2,
            aliens_surviving: 0,
            aliens_destroyed: 2,
            aliens_in_cities: 0,
            cities_remaining: 1,
            cities_destroyed: 1,
            events: vec![DestructionEvent {
                step: 3,
                city: "B".to_owned(),
                aliens: [AlienId::new(1), AlienId::new(2)],
            }],
        }
    }

    #[test]
    fn text_output_order() {
        let mut buf = Vec::new();
        let initial = vec!["A north=B".to_owned(), "B south=A".to_owned()];
        let finale = vec!["A".to_owned()];
        write_text(&mut buf, &initial, &sample_report(), &finale).unwrap();
        assert_eq!(
            String::from_utf8_lossy(&buf),
            "A north=B\nB south=A\nB has been destroyed by alien 1 and alien 2!\nA\n"
        );
    }

    #[test]
    fn json_output_parses_back() {
        let mut buf = Vec::new();
        write_json(&mut buf, &["A".to_owned()], &sample_report(), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["report"]["end_reason"], "all_aliens_destroyed");
        assert_eq!(value["initial_map"][0], "A");
        assert_eq!(value["final_map"].as_array().map(Vec::len), Some(0));
    }
}
