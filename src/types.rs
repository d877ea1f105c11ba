use serde::{Deserialize, Serialize};

/// One sensor measurement record as returned by the backend.
///
/// `/recent-data` rows carry no id (they are per-location averages), so the
/// field defaults to 0 for those.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default)]
    pub id: i64,
    pub location: String,
    pub ph_value: f64,
    pub temperature: f64,
    pub turbidity: f64,
    /// Zero-padded ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// `HH:mm:ss`.
    pub time: String,
}

/// Payload for `POST /create-data` and `PUT /update-data/:id`. Fields stay
/// as entered until submit; the server stamps date and time itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReadingDraft {
    pub location: String,
    pub ph_value: String,
    pub temperature: String,
    pub turbidity: String,
}

/// One `(date, value)` sample of a per-location series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub date: String,
    pub value: f64,
}

/// Out-of-range alert for one parameter over the last 24 hours.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Warning {
    pub parameter: String,
    #[serde(default)]
    pub locations: Vec<String>,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SummaryEntry {
    pub value: f64,
    pub location: String,
}

/// Highest and lowest readings of one parameter.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ParamSummary {
    #[serde(default)]
    pub highest: Vec<SummaryEntry>,
    #[serde(default)]
    pub lowest: Vec<SummaryEntry>,
}

/// `GET /summary-insights` response: per-parameter extremes for the last
/// 24 hours.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SummaryInsights {
    #[serde(default)]
    pub ph_value: ParamSummary,
    #[serde(default)]
    pub temperature: ParamSummary,
    #[serde(default)]
    pub turbidity: ParamSummary,
}

impl SummaryInsights {
    /// Card order is fixed: pH, temperature, turbidity.
    pub fn cards(&self) -> [(DataType, &ParamSummary); 3] {
        [
            (DataType::PhValue, &self.ph_value),
            (DataType::Temperature, &self.temperature),
            (DataType::Turbidity, &self.turbidity),
        ]
    }
}

/// Paired arrays for the correlation scatter plots. Index i of each vector
/// belongs to the same underlying reading.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CorrelationData {
    #[serde(default)]
    pub ph_value: Vec<f64>,
    #[serde(default)]
    pub temperature: Vec<f64>,
    #[serde(default)]
    pub turbidity: Vec<f64>,
}

impl CorrelationData {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// The three measured parameters. The wire form matches the backend's
/// column names (`dataType` query parameter, summary keys).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataType {
    PhValue,
    Temperature,
    Turbidity,
}

impl DataType {
    pub const ALL: [DataType; 3] = [
        DataType::PhValue,
        DataType::Temperature,
        DataType::Turbidity,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            DataType::PhValue => "ph_value",
            DataType::Temperature => "temperature",
            DataType::Turbidity => "turbidity",
        }
    }

    pub fn from_param(s: &str) -> Option<DataType> {
        match s {
            "ph_value" => Some(DataType::PhValue),
            "temperature" => Some(DataType::Temperature),
            "turbidity" => Some(DataType::Turbidity),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataType::PhValue => "pH Value",
            DataType::Temperature => "Temperature",
            DataType::Turbidity => "Turbidity",
        }
    }

    /// Unit suffix shown next to values; pH is dimensionless.
    pub fn unit(self) -> &'static str {
        match self {
            DataType::PhValue => "",
            DataType::Temperature => "°C",
            DataType::Turbidity => "NTU",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            DataType::PhValue => "pH Value",
            DataType::Temperature => "Temperature (°C)",
            DataType::Turbidity => "Turbidity (NTU)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_param_round_trip() {
        for dt in DataType::ALL {
            assert_eq!(DataType::from_param(dt.as_param()), Some(dt));
        }
        assert_eq!(DataType::from_param("salinity"), None);
    }

    #[test]
    fn reading_decodes_without_id() {
        let row: Reading = serde_json::from_str(
            r#"{"location":"Amsterdam","ph_value":7.1,"temperature":18.4,
                "turbidity":2.2,"date":"2026-08-07","time":"13:45:00"}"#,
        )
        .unwrap();
        assert_eq!(row.id, 0);
        assert_eq!(row.location, "Amsterdam");
    }

    #[test]
    fn summary_tolerates_missing_parameters() {
        let s: SummaryInsights =
            serde_json::from_str(r#"{"ph_value":{"highest":[{"value":8.1,"location":"US"}]}}"#)
                .unwrap();
        assert_eq!(s.ph_value.highest[0].location, "US");
        assert!(s.temperature.highest.is_empty());
    }
}
