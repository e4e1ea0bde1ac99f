use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Classification outcome carried by a stored record.
///
/// The wire encodes it as an integer (0 = benign, 1 = malignant). Anything
/// else, including a missing field, decodes to [`Prediction::Unknown`] and
/// renders as "N/A" instead of being coerced into a class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Prediction {
    #[default]
    Unknown,
    Benign,
    Malignant,
}

impl Prediction {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Benign,
            Some(1) => Self::Malignant,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> Option<i64> {
        match self {
            Self::Unknown => None,
            Self::Benign => Some(0),
            Self::Malignant => Some(1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "N/A",
            Self::Benign => "Benign",
            Self::Malignant => "Malignant",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Unknown => "•",
            Self::Benign => "✔",
            Self::Malignant => "⚠",
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.code() {
            Some(code) => serializer.serialize_i64(code),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Prediction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_code(value.as_i64()))
    }
}

/// One stored submission as returned by the records endpoint.
///
/// Every field can be absent; the backend assigns `id` and it is carried
/// through serialization but never shown in the table.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PredictionRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub mean_radius: Option<f64>,
    #[serde(default)]
    pub mean_perimeter: Option<f64>,
    #[serde(default)]
    pub mean_area: Option<f64>,
    #[serde(default)]
    pub mean_concavity: Option<f64>,
    #[serde(default)]
    pub mean_concave_points: Option<f64>,
    #[serde(default)]
    pub worst_radius: Option<f64>,
    #[serde(default)]
    pub worst_perimeter: Option<f64>,
    #[serde(default)]
    pub worst_area: Option<f64>,
    #[serde(default)]
    pub worst_concavity: Option<f64>,
    #[serde(default)]
    pub worst_concave_points: Option<f64>,
    #[serde(default)]
    pub prediction: Prediction,
}

/// Submission-side record. Values stay strings and are sent verbatim under
/// the camelCase names the prediction endpoint expects.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureForm {
    pub username: String,
    pub mean_radius: String,
    pub mean_perimeter: String,
    pub mean_area: String,
    pub mean_concavity: String,
    pub mean_concave_points: String,
    pub worst_radius: String,
    pub worst_perimeter: String,
    pub worst_area: String,
    pub worst_concavity: String,
    pub worst_concave_points: String,
}

pub const TABLE_COLUMNS: [&str; 12] = [
    "Username",
    "Mean Radius",
    "Mean Perimeter",
    "Mean Area",
    "Mean Concavity",
    "Mean Concave Points",
    "Worst Radius",
    "Worst Perimeter",
    "Worst Area",
    "Worst Concavity",
    "Worst Concave Points",
    "Prediction",
];

/// A single typed table cell. Rendering handles the missing-value rule in
/// one place so row construction never null-guards per field.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    Measurement(Option<f64>),
    Outcome(Prediction),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(Some(value)) if !value.trim().is_empty() => value.clone(),
            Cell::Text(_) => "N/A".to_string(),
            Cell::Measurement(Some(value)) => value.to_string(),
            Cell::Measurement(None) => "N/A".to_string(),
            Cell::Outcome(Prediction::Unknown) => "N/A".to_string(),
            Cell::Outcome(prediction) => {
                format!("{} {}", prediction.icon(), prediction.label())
            }
        }
    }
}

/// Row model for one record, cells in [`TABLE_COLUMNS`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordRow {
    pub cells: Vec<Cell>,
}

impl RecordRow {
    pub fn from_record(record: &PredictionRecord) -> Self {
        let cells = vec![
            Cell::Text(record.username.clone()),
            Cell::Measurement(record.mean_radius),
            Cell::Measurement(record.mean_perimeter),
            Cell::Measurement(record.mean_area),
            Cell::Measurement(record.mean_concavity),
            Cell::Measurement(record.mean_concave_points),
            Cell::Measurement(record.worst_radius),
            Cell::Measurement(record.worst_perimeter),
            Cell::Measurement(record.worst_area),
            Cell::Measurement(record.worst_concavity),
            Cell::Measurement(record.worst_concave_points),
            Cell::Outcome(record.prediction),
        ];
        Self { cells }
    }

    pub fn render_cells(&self) -> Vec<String> {
        self.cells.iter().map(Cell::render).collect()
    }
}
