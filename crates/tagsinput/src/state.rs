//! # Synchronized State
//!
//! The display surface mirrors each widget through one flat JSON object: the
//! identity keys that tell it which control to render, plus every attribute
//! the widget kind carries.
//!
//! ```json
//! {
//!   "_model_module": "jupyter-widget-tagsinput",
//!   "_model_module_version": "^0.1.0",
//!   "_model_name": "IntsInputModel",
//!   "_view_module": "jupyter-widget-tagsinput",
//!   "_view_module_version": "^0.1.0",
//!   "_view_name": "IntsInputView",
//!   "value": [5, 10, 0],
//!   "allowed_tags": [],
//!   "allow_duplicates": true,
//!   "tag_style": "",
//!   "format": ".3g",
//!   "min": 0,
//!   "max": 10
//! }
//! ```
//!
//! [`TagCollection::attribute_state`] pushes the whole state out.
//! [`TagCollection::set_state`] pulls a partial update in: the patch is staged
//! on a copy, constraints are applied before `value`, and the copy replaces
//! the widget only if every attribute was accepted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::Attribute;
use crate::color::Color;
use crate::config::{DEFAULT_MODULE_NAME, DEFAULT_MODULE_VERSION};
use crate::element::{deserialize_bound, deserialize_tags, NumericTag};
use crate::error::{Result, TagsError};
use crate::format::NumberFormat;
use crate::style::TagStyle;
use crate::widgets::{
    ColorTagCollection, NumericTagCollection, StringTagCollection, TagCollection, TagInput,
    WidgetKind,
};

/// The front-end module a widget is rendered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendModule {
    pub name: String,
    pub version: String,
}

impl Default for FrontendModule {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODULE_NAME.to_string(),
            version: DEFAULT_MODULE_VERSION.to_string(),
        }
    }
}

/// Wire names of the [`ModelIdentity`] keys.
pub const IDENTITY_KEYS: [&str; 6] = [
    "_model_module",
    "_model_module_version",
    "_model_name",
    "_view_module",
    "_view_module_version",
    "_view_name",
];

/// Identity keys of the synchronized state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    #[serde(rename = "_model_module")]
    pub model_module: String,
    #[serde(rename = "_model_module_version")]
    pub model_module_version: String,
    #[serde(rename = "_model_name")]
    pub model_name: String,
    #[serde(rename = "_view_module")]
    pub view_module: String,
    #[serde(rename = "_view_module_version")]
    pub view_module_version: String,
    #[serde(rename = "_view_name")]
    pub view_name: String,
}

impl ModelIdentity {
    pub fn new(kind: WidgetKind, module: &FrontendModule) -> Self {
        Self {
            model_module: module.name.clone(),
            model_module_version: module.version.clone(),
            model_name: kind.model_name().to_string(),
            view_module: module.name.clone(),
            view_module_version: module.version.clone(),
            view_name: kind.view_name().to_string(),
        }
    }

    pub fn kind(&self) -> Result<WidgetKind> {
        WidgetKind::from_model_name(&self.model_name)
            .ok_or_else(|| TagsError::UnknownModel(self.model_name.clone()))
    }

    pub fn module(&self) -> FrontendModule {
        FrontendModule {
            name: self.model_module.clone(),
            version: self.model_module_version.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format<T: NumericTag>() -> NumberFormat {
    NumberFormat::builtin(T::DEFAULT_FORMAT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringTagsState {
    pub value: Vec<String>,
    #[serde(default)]
    pub allowed_tags: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_duplicates: bool,
    #[serde(default)]
    pub tag_style: TagStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTagsState {
    pub value: Vec<Color>,
    #[serde(default)]
    pub allowed_tags: Vec<Color>,
    #[serde(default = "default_true")]
    pub allow_duplicates: bool,
}

/// Numbers are read through [`NumericTag::deserialize_tag`], so int state
/// accepts integer-valued floats like `5.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: NumericTag"))]
pub struct NumericTagsState<T> {
    #[serde(deserialize_with = "deserialize_tags")]
    pub value: Vec<T>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub allowed_tags: Vec<T>,
    #[serde(default = "default_true")]
    pub allow_duplicates: bool,
    #[serde(default)]
    pub tag_style: TagStyle,
    #[serde(default = "default_format::<T>")]
    pub format: NumberFormat,
    #[serde(default, deserialize_with = "deserialize_bound")]
    pub min: Option<T>,
    #[serde(default, deserialize_with = "deserialize_bound")]
    pub max: Option<T>,
}

/// The attribute half of a widget's state, typed per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeState {
    Strings(StringTagsState),
    Colors(ColorTagsState),
    Floats(NumericTagsState<f64>),
    Ints(NumericTagsState<i64>),
}

impl AttributeState {
    pub fn kind(&self) -> WidgetKind {
        match self {
            AttributeState::Strings(_) => WidgetKind::Strings,
            AttributeState::Colors(_) => WidgetKind::Colors,
            AttributeState::Floats(_) => WidgetKind::Floats,
            AttributeState::Ints(_) => WidgetKind::Ints,
        }
    }
}

/// The full synchronized state of one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetState {
    #[serde(flatten)]
    pub identity: ModelIdentity,
    #[serde(flatten)]
    pub attributes: AttributeState,
}

impl WidgetState {
    pub fn kind(&self) -> WidgetKind {
        self.attributes.kind()
    }

    /// Serializes the state into the flat JSON object sent to the display.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        let Value::Object(map) = serde_json::to_value(self)? else {
            unreachable!("widget state always serializes to an object");
        };
        Ok(map)
    }

    /// Reads a full state object, using `_model_name` to pick the attribute types.
    pub fn from_value(value: Value) -> Result<Self> {
        let identity: ModelIdentity = serde_json::from_value(value.clone())?;
        let attributes = match identity.kind()? {
            WidgetKind::Strings => AttributeState::Strings(serde_json::from_value(value)?),
            WidgetKind::Colors => AttributeState::Colors(serde_json::from_value(value)?),
            WidgetKind::Floats => AttributeState::Floats(serde_json::from_value(value)?),
            WidgetKind::Ints => AttributeState::Ints(serde_json::from_value(value)?),
        };
        Ok(Self {
            identity,
            attributes,
        })
    }
}

impl<T: NumericTag> NumericTagCollection<T> {
    fn numeric_state(&self) -> NumericTagsState<T> {
        NumericTagsState {
            value: self.value().to_vec(),
            allowed_tags: self.allowed_tags().to_vec(),
            allow_duplicates: self.allow_duplicates(),
            tag_style: self.tag_style(),
            format: self.format().clone(),
            min: self.min(),
            max: self.max(),
        }
    }

    fn from_numeric_state(state: NumericTagsState<T>) -> Result<Self> {
        let mut widget = Self::with_format(state.format);
        widget.set_allowed_tags(state.allowed_tags);
        widget.set_allow_duplicates(state.allow_duplicates);
        widget.set_tag_style(state.tag_style);
        widget.set_min(state.min);
        widget.set_max(state.max);
        widget.set_value(state.value)?;
        Ok(widget)
    }

    fn apply_numeric(&mut self, attribute: Attribute, raw: &Value) -> Result<()> {
        match attribute {
            Attribute::Value => {
                self.set_value(deserialize_tags(raw).map_err(|e| invalid(attribute, e))?)?
            }
            Attribute::AllowedTags => {
                self.set_allowed_tags(deserialize_tags(raw).map_err(|e| invalid(attribute, e))?)
            }
            Attribute::AllowDuplicates => self.set_allow_duplicates(parse(attribute, raw)?),
            Attribute::TagStyle => self.set_tag_style(parse(attribute, raw)?),
            Attribute::Format => self.set_format(parse(attribute, raw)?),
            Attribute::Min => {
                self.set_min(deserialize_bound(raw).map_err(|e| invalid(attribute, e))?)
            }
            Attribute::Max => {
                self.set_max(deserialize_bound(raw).map_err(|e| invalid(attribute, e))?)
            }
        }
        Ok(())
    }
}

fn unsupported(kind: WidgetKind, attribute: Attribute) -> TagsError {
    TagsError::UnsupportedAttribute { kind, attribute }
}

fn invalid(attribute: Attribute, err: serde_json::Error) -> TagsError {
    TagsError::InvalidAttribute {
        attribute,
        reason: err.to_string(),
    }
}

fn parse<T: DeserializeOwned>(attribute: Attribute, raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(|err| invalid(attribute, err))
}

impl TagCollection {
    /// Snapshot of every attribute this widget carries.
    pub fn attribute_state(&self) -> AttributeState {
        match self {
            TagCollection::Strings(w) => AttributeState::Strings(StringTagsState {
                value: w.value().to_vec(),
                allowed_tags: w.allowed_tags().to_vec(),
                allow_duplicates: w.allow_duplicates(),
                tag_style: w.tag_style(),
            }),
            TagCollection::Colors(w) => AttributeState::Colors(ColorTagsState {
                value: w.value().to_vec(),
                allowed_tags: w.allowed_tags().to_vec(),
                allow_duplicates: w.allow_duplicates(),
            }),
            TagCollection::Floats(w) => AttributeState::Floats(w.numeric_state()),
            TagCollection::Ints(w) => AttributeState::Ints(w.numeric_state()),
        }
    }

    /// Rebuilds a widget from a full attribute snapshot.
    ///
    /// Constraints are installed first and the value is validated against
    /// them, so a snapshot holding an invalid value is refused.
    pub fn from_attribute_state(state: AttributeState) -> Result<Self> {
        Ok(match state {
            AttributeState::Strings(state) => {
                let mut w = StringTagCollection::new();
                w.set_allowed_tags(state.allowed_tags);
                w.set_allow_duplicates(state.allow_duplicates);
                w.set_tag_style(state.tag_style);
                w.set_value(state.value)?;
                w.into()
            }
            AttributeState::Colors(state) => {
                let mut w = ColorTagCollection::new();
                w.set_allowed_tags(state.allowed_tags);
                w.set_allow_duplicates(state.allow_duplicates);
                w.set_value(state.value)?;
                w.into()
            }
            AttributeState::Floats(state) => {
                TagCollection::Floats(NumericTagCollection::from_numeric_state(state)?)
            }
            AttributeState::Ints(state) => {
                TagCollection::Ints(NumericTagCollection::from_numeric_state(state)?)
            }
        })
    }

    /// Applies a partial state update as a unit.
    ///
    /// The [`IDENTITY_KEYS`] are ignored; any other unknown key fails. Returns the
    /// attributes whose synchronized value actually changed. On error the
    /// widget is left exactly as it was.
    pub fn set_state(&mut self, patch: &Map<String, Value>) -> Result<Vec<Attribute>> {
        let kind = self.kind();
        let mut pending = Vec::with_capacity(patch.len());
        for (name, raw) in patch {
            if IDENTITY_KEYS.contains(&name.as_str()) {
                continue;
            }
            let attribute = Attribute::from_name(name)
                .ok_or_else(|| TagsError::UnknownAttribute(name.clone()))?;
            if !kind.supports(attribute) {
                return Err(unsupported(kind, attribute));
            }
            pending.push((attribute, raw));
        }
        // Constraints first so the value is checked against the new ones.
        pending.sort_by_key(|(attribute, _)| *attribute == Attribute::Value);

        let mut staged = self.clone();
        for (attribute, raw) in &pending {
            staged.apply(*attribute, raw)?;
        }

        let before = serde_json::to_value(self.attribute_state())?;
        let after = serde_json::to_value(staged.attribute_state())?;
        let changed = pending
            .iter()
            .map(|(attribute, _)| *attribute)
            .filter(|attribute| before.get(attribute.name()) != after.get(attribute.name()))
            .collect();

        *self = staged;
        Ok(changed)
    }

    fn apply(&mut self, attribute: Attribute, raw: &Value) -> Result<()> {
        match self {
            TagCollection::Strings(w) => match attribute {
                Attribute::Value => w.set_value(parse(attribute, raw)?)?,
                Attribute::AllowedTags => w.set_allowed_tags(parse(attribute, raw)?),
                Attribute::AllowDuplicates => w.set_allow_duplicates(parse(attribute, raw)?),
                Attribute::TagStyle => w.set_tag_style(parse(attribute, raw)?),
                _ => return Err(unsupported(WidgetKind::Strings, attribute)),
            },
            TagCollection::Colors(w) => match attribute {
                Attribute::Value => w.set_value(parse(attribute, raw)?)?,
                Attribute::AllowedTags => w.set_allowed_tags(parse(attribute, raw)?),
                Attribute::AllowDuplicates => w.set_allow_duplicates(parse(attribute, raw)?),
                _ => return Err(unsupported(WidgetKind::Colors, attribute)),
            },
            TagCollection::Floats(w) => w.apply_numeric(attribute, raw)?,
            TagCollection::Ints(w) => w.apply_numeric(attribute, raw)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use serde_json::json;

    fn patch(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("patch must be an object"),
        }
    }

    fn state_of(collection: &TagCollection) -> Map<String, Value> {
        let state = WidgetState {
            identity: ModelIdentity::new(collection.kind(), &FrontendModule::default()),
            attributes: collection.attribute_state(),
        };
        state.to_map().unwrap()
    }

    #[test]
    fn test_int_state_shape() {
        let mut ints = TagCollection::new(WidgetKind::Ints);
        ints.set_state(&patch(json!({"min": 0, "max": 10, "value": [5, 10, 0]})))
            .unwrap();
        assert_eq!(
            Value::Object(state_of(&ints)),
            json!({
                "_model_module": "jupyter-widget-tagsinput",
                "_model_module_version": "^0.1.0",
                "_model_name": "IntsInputModel",
                "_view_module": "jupyter-widget-tagsinput",
                "_view_module_version": "^0.1.0",
                "_view_name": "IntsInputView",
                "value": [5, 10, 0],
                "allowed_tags": [],
                "allow_duplicates": true,
                "tag_style": "",
                "format": ".3g",
                "min": 0,
                "max": 10
            })
        );
    }

    #[test]
    fn test_string_state_shape() {
        let strings = TagCollection::new(WidgetKind::Strings);
        let state = state_of(&strings);
        assert_eq!(state["_model_name"], "TagsInputModel");
        assert_eq!(state["tag_style"], "");
        assert!(state.get("min").is_none());
        assert!(state.get("format").is_none());
    }

    #[test]
    fn test_value_applied_after_constraints() {
        // Key order in the patch must not matter.
        let mut strings = TagCollection::new(WidgetKind::Strings);
        strings
            .set_state(&patch(json!({"value": ["a"], "allowed_tags": ["a", "b"]})))
            .unwrap();
        assert_eq!(
            strings.as_strings().unwrap().value(),
            ["a".to_string()].as_slice()
        );
    }

    #[test]
    fn test_rejected_patch_changes_nothing() {
        let mut ints = TagCollection::new(WidgetKind::Ints);
        ints.set_state(&patch(json!({"value": [50]}))).unwrap();
        let before = ints.clone();

        let err = ints
            .set_state(&patch(json!({"max": 10, "format": "d", "value": [50, 60]})))
            .unwrap_err();
        assert!(matches!(
            err,
            TagsError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(ints, before);
    }

    #[test]
    fn test_ints_reject_fractional_values_and_bounds() {
        let mut ints = TagCollection::new(WidgetKind::Ints);
        assert!(matches!(
            ints.set_state(&patch(json!({"value": [1.5]}))),
            Err(TagsError::InvalidAttribute {
                attribute: Attribute::Value,
                ..
            })
        ));
        assert!(matches!(
            ints.set_state(&patch(json!({"min": 0.5}))),
            Err(TagsError::InvalidAttribute {
                attribute: Attribute::Min,
                ..
            })
        ));
        assert!(matches!(
            ints.set_state(&patch(json!({"allowed_tags": [1, 2.5]}))),
            Err(TagsError::InvalidAttribute {
                attribute: Attribute::AllowedTags,
                ..
            })
        ));
        assert!(ints.is_empty());
        assert_eq!(ints.as_ints().unwrap().min(), None);
    }

    #[test]
    fn test_ints_accept_integer_valued_floats() {
        let mut ints = TagCollection::new(WidgetKind::Ints);
        ints.set_state(&patch(json!({"min": 0.0, "max": 10.0, "value": [5.0]})))
            .unwrap();
        let w = ints.as_ints().unwrap();
        assert_eq!(w.value(), &[5]);
        assert_eq!(w.min(), Some(0));
        assert_eq!(w.max(), Some(10));
        assert_eq!(state_of(&ints)["value"], json!([5]));
    }

    #[test]
    fn test_numeric_tag_style() {
        let mut floats = TagCollection::new(WidgetKind::Floats);
        let changed = floats
            .set_state(&patch(json!({"tag_style": "info"})))
            .unwrap();
        assert_eq!(changed, vec![Attribute::TagStyle]);
        assert_eq!(floats.as_floats().unwrap().tag_style(), TagStyle::Info);
        assert_eq!(state_of(&floats)["tag_style"], "info");
    }

    #[test]
    fn test_floats_accept_fractional_bounds() {
        let mut floats = TagCollection::new(WidgetKind::Floats);
        floats
            .set_state(&patch(json!({"min": -0.5, "max": 0.5, "value": [0.25, -0.5]})))
            .unwrap();
        let w = floats.as_floats().unwrap();
        assert_eq!(w.min(), Some(-0.5));
        assert_eq!(w.value(), &[0.25, -0.5]);
    }

    #[test]
    fn test_null_clears_bound() {
        let mut floats = TagCollection::new(WidgetKind::Floats);
        floats.set_state(&patch(json!({"max": 1.0}))).unwrap();
        floats.set_state(&patch(json!({"max": null}))).unwrap();
        assert_eq!(floats.as_floats().unwrap().max(), None);
    }

    #[test]
    fn test_unknown_and_unsupported_attributes() {
        let mut colors = TagCollection::new(WidgetKind::Colors);
        assert!(matches!(
            colors.set_state(&patch(json!({"colour": []}))),
            Err(TagsError::UnknownAttribute(name)) if name == "colour"
        ));
        assert!(matches!(
            colors.set_state(&patch(json!({"min": 1}))),
            Err(TagsError::UnsupportedAttribute {
                kind: WidgetKind::Colors,
                attribute: Attribute::Min,
            })
        ));
        assert!(matches!(
            colors.set_state(&patch(json!({"tag_style": "info"}))),
            Err(TagsError::UnsupportedAttribute {
                kind: WidgetKind::Colors,
                attribute: Attribute::TagStyle,
            })
        ));
        let mut ints = TagCollection::new(WidgetKind::Ints);
        assert!(matches!(
            ints.set_state(&patch(json!({"tag_style": "shiny"}))),
            Err(TagsError::InvalidAttribute {
                attribute: Attribute::TagStyle,
                ..
            })
        ));
    }

    #[test]
    fn test_misspelled_identity_key_is_unknown() {
        let mut strings = TagCollection::new(WidgetKind::Strings);
        assert!(matches!(
            strings.set_state(&patch(json!({"_model_nmae": "x", "value": ["a"]}))),
            Err(TagsError::UnknownAttribute(name)) if name == "_model_nmae"
        ));
        assert!(strings.is_empty());
    }

    #[test]
    fn test_identity_keys_are_ignored() {
        let mut strings = TagCollection::new(WidgetKind::Strings);
        let changed = strings
            .set_state(&patch(json!({"_model_name": "IntsInputModel", "value": ["x"]})))
            .unwrap();
        assert_eq!(changed, vec![Attribute::Value]);
        assert_eq!(strings.kind(), WidgetKind::Strings);
    }

    #[test]
    fn test_changed_reports_only_real_changes() {
        let mut strings = TagCollection::new(WidgetKind::Strings);
        let changed = strings
            .set_state(&patch(json!({"value": [], "tag_style": "PRIMARY"})))
            .unwrap();
        assert_eq!(changed, vec![Attribute::TagStyle]);
        assert_eq!(
            strings.as_strings().unwrap().tag_style(),
            TagStyle::Primary
        );
    }

    #[test]
    fn test_invalid_color_in_patch() {
        let mut colors = TagCollection::new(WidgetKind::Colors);
        let err = colors
            .set_state(&patch(json!({"value": ["red", "not-a-color"]})))
            .unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
        assert!(colors.is_empty());
    }

    #[test]
    fn test_full_state_round_trip() {
        let mut ints = TagCollection::new(WidgetKind::Ints);
        ints.set_state(&patch(json!({"allowed_tags": [1, 2, 3], "min": 1, "value": [3, 1]})))
            .unwrap();

        let state = WidgetState::from_value(Value::Object(state_of(&ints))).unwrap();
        assert_eq!(state.kind(), WidgetKind::Ints);
        let restored = TagCollection::from_attribute_state(state.attributes).unwrap();
        assert_eq!(restored, ints);
    }

    #[test]
    fn test_from_value_defaults_missing_format() {
        let state = WidgetState::from_value(json!({
            "_model_module": "jupyter-widget-tagsinput",
            "_model_module_version": "^0.1.0",
            "_model_name": "IntsInputModel",
            "_view_module": "jupyter-widget-tagsinput",
            "_view_module_version": "^0.1.0",
            "_view_name": "IntsInputView",
            "value": [3.0, 4],
            "max": 4
        }))
        .unwrap();
        let AttributeState::Ints(ints) = &state.attributes else {
            panic!("expected int state");
        };
        assert_eq!(ints.format.as_str(), ".3g");
        assert_eq!(ints.value, vec![3, 4]);
        assert_eq!(ints.tag_style, TagStyle::None);

        let restored = TagCollection::from_attribute_state(state.attributes).unwrap();
        assert_eq!(restored.as_ints().unwrap().max(), Some(4));
    }

    #[test]
    fn test_from_value_unknown_model() {
        let err = WidgetState::from_value(json!({
            "_model_module": "m",
            "_model_module_version": "1",
            "_model_name": "SliderModel",
            "_view_module": "m",
            "_view_module_version": "1",
            "_view_name": "SliderView",
            "value": []
        }))
        .unwrap_err();
        assert!(matches!(err, TagsError::UnknownModel(name) if name == "SliderModel"));
    }

    #[test]
    fn test_from_attribute_state_refuses_invalid_value() {
        let state = AttributeState::Strings(StringTagsState {
            value: vec!["c".into()],
            allowed_tags: vec!["a".into()],
            allow_duplicates: true,
            tag_style: TagStyle::None,
        });
        assert!(matches!(
            TagCollection::from_attribute_state(state),
            Err(TagsError::Validation(ValidationError::NotAllowed { .. }))
        ));
    }
}
