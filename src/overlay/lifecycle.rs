//! Lifecycle records: timestamped events in the life of one tracked object.

use serde::{Deserialize, Serialize};

use crate::overlay::rect::Rect;

/// Classification tag of a lifecycle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    /// Object first became visible
    Visible,
    /// Object left the frame
    Gone,
    /// Object entered one or more zones
    EnteredZone,
    /// An attribute (face, plate, ...) was attached to the object
    Attribute,
    /// Object started moving
    Active,
    /// Object stopped moving
    Stationary,
    /// Object was heard by an audio detector
    Heard,
    /// Event created by an external integration
    External,
    /// Any tag this crate does not know about
    #[serde(other)]
    Unknown,
}

impl ClassType {
    /// Whether this tag is one of the eight known classifications.
    pub fn is_known(&self) -> bool {
        !matches!(self, ClassType::Unknown)
    }
}

/// Payload carried by a lifecycle record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleData {
    pub label: Option<String>,
    pub sub_label: Option<String>,
    #[serde(rename = "box")]
    pub bbox: Option<Rect>,
    pub attribute: Option<String>,
    pub attribute_box: Option<Rect>,
    pub zones: Vec<String>,
}

/// One timestamped event for an object, as returned by the timeline API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRecord {
    /// Id of the tracked object this record belongs to
    pub source_id: String,
    /// Seconds, in the detect stream's time base
    pub timestamp: f64,
    pub class_type: ClassType,
    #[serde(default)]
    pub data: LifecycleData,
}

impl LifecycleRecord {
    /// Create a record with an empty payload.
    pub fn new(source_id: impl Into<String>, timestamp: f64, class_type: ClassType) -> Self {
        Self {
            source_id: source_id.into(),
            timestamp,
            class_type,
            data: LifecycleData::default(),
        }
    }

    /// Set the object bounding box.
    pub fn with_box(mut self, bbox: Rect) -> Self {
        self.data.bbox = Some(bbox);
        self
    }

    /// Set the bounding box of the attached attribute.
    pub fn with_attribute_box(mut self, attribute_box: Rect) -> Self {
        self.data.attribute_box = Some(attribute_box);
        self
    }

    /// Set the zones the object is in.
    pub fn with_zones<I, S>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// Set the object label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    #[inline]
    pub fn bbox(&self) -> Option<Rect> {
        self.data.bbox
    }

    #[inline]
    pub fn attribute_box(&self) -> Option<Rect> {
        self.data.attribute_box
    }

    #[inline]
    pub fn zones(&self) -> &[String] {
        &self.data.zones
    }
}

/// Human-readable description of a record, used for marker tooltips.
pub fn describe(record: &LifecycleRecord) -> String {
    let label = capitalize(record.data.label.as_deref().unwrap_or("object"));

    match record.class_type {
        ClassType::Visible => format!("{label} detected"),
        ClassType::Gone => format!("{label} left"),
        ClassType::EnteredZone => {
            if record.data.zones.is_empty() {
                format!("{label} entered a zone")
            } else {
                format!("{label} entered {}", record.data.zones.join(" and "))
            }
        }
        ClassType::Attribute => match record.data.attribute.as_deref() {
            Some(attribute) if !attribute.is_empty() => {
                format!("{label} recognized as {attribute}")
            }
            _ => format!("{label} attribute detected"),
        },
        ClassType::Active => format!("{label} became active"),
        ClassType::Stationary => format!("{label} became stationary"),
        ClassType::Heard => format!("{label} heard"),
        ClassType::External => match record.data.sub_label.as_deref() {
            Some(sub_label) if !sub_label.is_empty() => format!("{sub_label} detected"),
            _ => format!("{label} detected"),
        },
        ClassType::Unknown => format!("{label} event"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
