//! The five on/off controls offered to the user before plotting.
//!
//! Front ends (the GUI checkboxes, the CLI flags) are built from [`toggles`] so
//! labels, order and preset values stay in one place.

use crate::models::{Metric, SeriesSelection};

/// Prompt shown above the controls.
pub const PROMPT: &str = "Choisissez les données que vous souhaitez visualiser :";

/// One binary control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub metric: Metric,
    pub label: &'static str,
    pub value: bool,
}

/// Controls with their preset values
/// (hospitalized, resuscitation and daily deaths on; the rest off).
pub fn toggles() -> [Toggle; 5] {
    SeriesSelection::default().toggles()
}

impl SeriesSelection {
    /// Controls reflecting this selection, in drawing order.
    pub fn toggles(&self) -> [Toggle; 5] {
        Metric::ALL.map(|metric| Toggle {
            metric,
            label: metric.label(),
            value: self.is_selected(metric),
        })
    }

    /// Read a selection back from controls. Metrics not covered stay off.
    pub fn from_toggles<'a>(toggles: impl IntoIterator<Item = &'a Toggle>) -> Self {
        let mut sel = SeriesSelection::NONE;
        for t in toggles {
            sel.set(t.metric, t.value);
        }
        sel
    }
}
