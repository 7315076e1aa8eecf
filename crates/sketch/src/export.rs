//! Export records for sketches and interaction logs
//!
//! Sketches are exported in the Quick, Draw! layout: each stroke is an
//! `[xs, ys, times]` triple of raw coordinates. Field names are camelCase to
//! match what downstream analysis tooling expects.

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Raw coordinates of one stroke as parallel `(xs, ys, times)` columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord(pub Vec<f64>, pub Vec<f64>, pub Vec<f64>);

/// Exported sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchRecord {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Timestamp of the first pen-down (null once cleared)
    pub start_time: Option<f64>,
    pub strokes: Vec<StrokeRecord>,
}

/// Exported interaction log, one entry per recorded change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub window_width: Vec<u32>,
    pub window_height: Vec<u32>,
    pub mouse_x: Vec<f64>,
    pub mouse_y: Vec<f64>,
    pub time: Vec<f64>,
    pub mouse_down: Vec<bool>,
    pub undo: Vec<bool>,
    pub reset: Vec<bool>,
}

/// JSON serialization shared by the export records
pub trait ExportJson: Serialize {
    /// Compact JSON
    fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, for files meant to be read by people
    fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ExportJson for SketchRecord {}
impl ExportJson for InteractionRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_record_layout() {
        let record = SketchRecord {
            canvas_width: 400,
            canvas_height: 320,
            start_time: Some(1500.0),
            strokes: vec![StrokeRecord(vec![1.0, 2.0], vec![3.0, 4.0], vec![10.0, 20.0])],
        };

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["canvasWidth"], 400);
        assert_eq!(value["canvasHeight"], 320);
        assert_eq!(value["startTime"], 1500.0);
        assert_eq!(value["strokes"][0][0], serde_json::json!([1.0, 2.0]));
        assert_eq!(value["strokes"][0][2], serde_json::json!([10.0, 20.0]));
    }

    #[test]
    fn test_cleared_sketch_has_null_start_time() {
        let record = SketchRecord {
            canvas_width: 400,
            canvas_height: 320,
            start_time: None,
            strokes: vec![],
        };
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert!(value["startTime"].is_null());
    }

    #[test]
    fn test_interaction_record_keys() {
        let record = InteractionRecord::default();
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        for key in [
            "windowWidth",
            "windowHeight",
            "mouseX",
            "mouseY",
            "time",
            "mouseDown",
            "undo",
            "reset",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
