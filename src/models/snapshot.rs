use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Rain measurement as reported by OpenWeatherMap One Call 3.0.
///
/// The API uses two shapes for the same signal: current/hourly entries carry
/// `"rain": {"1h": 0.25}` while daily entries carry a bare accumulation
/// `"rain": 0.25`. Both mean "rain in this period". The duality is resolved
/// once here, at parse time, so downstream code only asks "is rain present".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RainField {
    /// Bare numeric accumulation (daily entries).
    Amount(f64),
    /// Mapping form with a `1h` key (current and hourly entries).
    PerHour(f64),
}

impl RainField {
    pub fn millimeters(&self) -> f64 {
        match self {
            RainField::Amount(mm) | RainField::PerHour(mm) => *mm,
        }
    }

    /// Resolve a raw `rain` value. A mapping without a `1h` key and any
    /// non-numeric, non-mapping value count as "no rain".
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(RainField::Amount),
            Value::Object(map) => map
                .get("1h")
                .map(|v| RainField::PerHour(v.as_f64().unwrap_or(0.0))),
            _ => None,
        }
    }
}

/// A single weather entry (current conditions, one forecast day, or one
/// historical hour). Only the rain signal matters to the decision engine;
/// everything else in the provider payload is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherEntry {
    pub rain: Option<RainField>,
}

impl WeatherEntry {
    pub fn from_value(value: &Value) -> Self {
        let rain = value
            .as_object()
            .and_then(|map| map.get("rain"))
            .and_then(RainField::from_value);
        Self { rain }
    }

    pub fn has_rain(&self) -> bool {
        self.rain.is_some()
    }
}

impl<'de> Deserialize<'de> for WeatherEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(WeatherEntry::from_value(&value))
    }
}

/// Current conditions plus daily forecast (`daily[0]` is tomorrow).
///
/// Provider fields may be absent or mistyped; parsing never fails for that,
/// the affected part just degrades to the empty shape. `Default` gives the
/// documented empty snapshot used when the upstream fetch fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastSnapshot {
    #[serde(default, deserialize_with = "lenient_entry")]
    pub current: Option<WeatherEntry>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub daily: Vec<WeatherEntry>,
}

/// Hourly observations for yesterday.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistorySnapshot {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub hourly: Vec<WeatherEntry>,
}

fn lenient_entry<'de, D>(deserializer: D) -> std::result::Result<Option<WeatherEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    // A non-mapping `current` is treated as missing.
    Ok(value.as_object().map(|_| WeatherEntry::from_value(&value)))
}

fn lenient_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<WeatherEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(WeatherEntry::from_value).collect(),
        _ => Vec::new(),
    })
}
