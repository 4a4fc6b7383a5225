use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a compared rider (`"merckx"`, `"pogacar"`, ...).
pub type RiderId = String;

/// One compared rider with display fields and a 3-color palette.
///
/// Only `name` is required; everything else degrades gracefully when absent
/// (missing colors render without gradients, missing text renders empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    /// Key under which the rider appears in the document's `riders` map.
    #[serde(default)]
    pub id: RiderId,
    pub name: String,
    pub nickname: Option<String>,
    pub country: Option<String>,
    /// Active years, e.g. `"1965-1978"` or `"2019-present"`.
    pub active: Option<String>,
    #[serde(rename = "colorPrimary")]
    pub color_primary: Option<String>,
    #[serde(rename = "colorSecondary")]
    pub color_secondary: Option<String>,
    #[serde(rename = "colorLight")]
    pub color_light: Option<String>,
}

/// One comparable numeric fact with per-rider values and axis bounds.
///
/// Per-rider values arrive as extra top-level fields named after rider ids
/// (`{"id":"m1","title":"...","merckx":7,"pogacar":4,...}`), so they are
/// captured in a flattened map and read through [`Metric::value_for`].
///
/// Data-quality assumption, not enforced here: `0 <= value <= max_value`
/// for every rider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub title: String,
    #[serde(rename = "maxValue")]
    pub max_value: f64,
    /// Y-axis tick step. Optional in the document, defaulting to 1.
    #[serde(rename = "stepSize", default = "default_step_size")]
    pub step_size: f64,
    pub note: Option<String>,
    #[serde(flatten)]
    values: serde_json::Map<String, Value>,
}

fn default_step_size() -> f64 {
    1.0
}

impl Metric {
    /// Numeric value for one rider, `None` when the field is missing or
    /// not a number.
    pub fn value_for(&self, rider: &str) -> Option<f64> {
        self.values.get(rider).and_then(Value::as_f64)
    }
}

/// The full comparison document: riders in declaration order plus an ordered
/// sequence of metrics. Immutable once parsed; a reload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dataset {
    #[serde(deserialize_with = "de_riders_in_order")]
    pub riders: Vec<Rider>,
    pub metrics: Vec<Metric>,
}

impl Dataset {
    /// Parse the wire document (`{"riders":{...},"metrics":[...]}`).
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Look a rider up by id.
    pub fn rider(&self, id: &str) -> Option<&Rider> {
        self.riders.iter().find(|r| r.id == id)
    }
}

/// Serde helper: deserialize the `riders` JSON object into a `Vec<Rider>`,
/// preserving document order and injecting each map key as the rider id.
///
/// The wire format keys the map by rider id; chart labels and legend lines
/// must follow the declared order, so a plain `HashMap` would lose required
/// information.
fn de_riders_in_order<'de, D>(deserializer: D) -> Result<Vec<Rider>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{MapAccess, Visitor};

    struct RidersVisitor;

    impl<'de> Visitor<'de> for RidersVisitor {
        type Value = Vec<Rider>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a map of rider id to rider fields")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(2));
            while let Some((id, mut rider)) = map.next_entry::<RiderId, Rider>()? {
                rider.id = id;
                out.push(rider);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(RidersVisitor)
}
