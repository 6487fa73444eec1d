// Day-of-week selection state machine
use super::error::SelectionError;

/// The currently chosen day filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    DaySelected(String),
}

/// A dropdown interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Select(String),
    Clear,
}

impl SelectionEvent {
    /// Maps a raw dropdown value; absent or blank means the dropdown was cleared.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(day) if !day.is_empty() => SelectionEvent::Select(day.to_string()),
            _ => SelectionEvent::Clear,
        }
    }
}

impl Selection {
    /// Validate an event against the labels present in the dataset.
    pub fn try_from_event(
        event: SelectionEvent,
        known_days: &[String],
    ) -> Result<Self, SelectionError> {
        match event {
            SelectionEvent::Clear => Ok(Selection::NoSelection),
            SelectionEvent::Select(day) => {
                if known_days.iter().any(|d| *d == day) {
                    Ok(Selection::DaySelected(day))
                } else {
                    Err(SelectionError::UnknownDay(day))
                }
            }
        }
    }

    /// Transition on an event. Unknown labels fall back to `NoSelection`.
    pub fn apply(&self, event: SelectionEvent, known_days: &[String]) -> Selection {
        match Self::try_from_event(event, known_days) {
            Ok(next) => next,
            Err(e) => {
                tracing::debug!("{}; treating as no selection", e);
                Selection::NoSelection
            }
        }
    }

    pub fn day(&self) -> Option<&str> {
        match self {
            Selection::NoSelection => None,
            Selection::DaySelected(day) => Some(day.as_str()),
        }
    }
}

/// Per-session selection context, passed into every reactive update.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub selection: Selection,
}

impl SessionContext {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}
