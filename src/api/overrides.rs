use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Y label that renders as blank space.
const BLANK_LABEL: &str = "n";
const BLANK_LABEL_TEXT: &str = "\u{a0}\u{a0}";

/// Chart titles whose text and y label hosts may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownTitle {
    Temperature,
    Humidity,
    Barometer,
    DewPoint,
    AvgWindSpeed,
    WindDirection,
    Rainfall,
    IndoorTemperature,
    IndoorHumidity,
}

impl KnownTitle {
    pub const ALL: [Self; 9] = [
        Self::Temperature,
        Self::Humidity,
        Self::Barometer,
        Self::DewPoint,
        Self::AvgWindSpeed,
        Self::WindDirection,
        Self::Rainfall,
        Self::IndoorTemperature,
        Self::IndoorHumidity,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature: last 24 hours",
            Self::Humidity => "Humidity: last 24 hours",
            Self::Barometer => "Barometer: last 24 hours",
            Self::DewPoint => "Dew Point: last 24 hours",
            Self::AvgWindSpeed => "Avg. wind speed: last 24 hours",
            Self::WindDirection => "Wind direction: last 24 hours",
            Self::Rainfall => "Rainfall: last 24 hours",
            Self::IndoorTemperature => "Indoor temperature: last 24 hours",
            Self::IndoorHumidity => "Indoor humidity: last 24 hours",
        }
    }

    /// Exact, case-sensitive match.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.title() == title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub axis_label: Option<String>,
}

/// Replacement titles and y labels keyed by known title.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextOverrides {
    entries: IndexMap<KnownTitle, TextOverride>,
}

impl TextOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, known: KnownTitle, text: impl Into<String>) -> Self {
        self.entries.entry(known).or_default().title = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_axis_label(mut self, known: KnownTitle, text: impl Into<String>) -> Self {
        self.entries.entry(known).or_default().axis_label = Some(text.into());
        self
    }

    #[must_use]
    pub fn get(&self, known: KnownTitle) -> Option<&TextOverride> {
        self.entries.get(&known)
    }

    /// Title to display for `title`.
    #[must_use]
    pub fn resolve_title<'a>(&'a self, title: &'a str) -> &'a str {
        self.lookup(title, |entry| entry.title.as_deref())
            .unwrap_or(title)
    }

    /// Y label to display on a chart titled `title`.
    #[must_use]
    pub fn resolve_axis_label(&self, title: Option<&str>, label: &str) -> String {
        let label = title
            .and_then(|title| self.lookup(title, |entry| entry.axis_label.as_deref()))
            .unwrap_or(label);
        if label == BLANK_LABEL {
            BLANK_LABEL_TEXT.to_owned()
        } else {
            label.to_owned()
        }
    }

    fn lookup<'a>(
        &'a self,
        title: &str,
        field: impl Fn(&'a TextOverride) -> Option<&'a str>,
    ) -> Option<&'a str> {
        let known = KnownTitle::from_title(title)?;
        self.entries
            .get(&known)
            .and_then(field)
            .filter(|text| !text.is_empty())
    }
}
