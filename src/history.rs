use crate::messages;
use crate::models::{CaptureSource, HistoryEntry, Prediction};
use chrono::{DateTime, Local};

/// Predictions made during this process's lifetime, oldest first.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn record(&mut self, source: CaptureSource, prediction: &Prediction) -> HistoryEntry {
        self.record_at(Local::now(), source, prediction)
    }

    pub fn record_at(
        &mut self,
        at: DateTime<Local>,
        source: CaptureSource,
        prediction: &Prediction,
    ) -> HistoryEntry {
        let entry = HistoryEntry {
            seq: self.entries.len() as u64 + 1,
            time: at.format("%H:%M:%S").to_string(),
            recorded_at: at.to_rfc3339(),
            source,
            class: prediction.class.clone(),
            confidence: prediction.confidence,
            confidence_pct: messages::confidence_percent(prediction.confidence),
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
