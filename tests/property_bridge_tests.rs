use chart_bridge::BridgeError;
use chart_bridge::api::{
    BridgeConfig, EnumKey, Key, KeyList, NativeObjectContainer, NumberList, StringList,
    key_list_of,
};
use chart_bridge::core::{
    NativeArray, NativeObject, NativeValue, PropertyDescriptor, define_field, define_field_with,
    get_field_descriptor, has_own_field, json, object_as_map,
};
use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    Bottom,
    ChartArea,
}

impl Key for Position {
    fn name(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::ChartArea => "chartArea",
        }
    }
}

impl EnumKey for Position {
    fn values() -> &'static [Self] {
        &[Self::Top, Self::Bottom, Self::ChartArea]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property {
    Display,
    Position,
    Padding,
    Text,
    Weights,
    Since,
    Font,
}

impl Key for Property {
    fn name(&self) -> &str {
        match self {
            Self::Display => "display",
            Self::Position => "position",
            Self::Padding => "padding",
            Self::Text => "text",
            Self::Weights => "weights",
            Self::Since => "since",
            Self::Font => "font",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Legend {
    object: NativeObject,
}

impl Legend {
    fn new() -> Self {
        Self {
            object: NativeObject::new(),
        }
    }

    fn is_display(&self) -> bool {
        self.value_or(&Property::Display, true)
    }

    fn set_display(&self, display: bool) {
        self.set_value(&Property::Display, Some(display))
            .expect("display");
    }

    fn position(&self) -> Position {
        self.key_value(&Property::Position, Position::Top)
    }

    fn set_position(&self, position: Option<Position>) {
        self.set_key_value(&Property::Position, position)
            .expect("position");
    }

    fn text(&self) -> StringList {
        if let Some(array) = self.array::<String, _>(&Property::Text) {
            return StringList::from_array(array).expect("wrap text");
        }
        let list = StringList::new();
        self.set_array(&Property::Text, Some(list.array().clone()))
            .expect("text");
        list
    }
}

impl NativeObjectContainer for Legend {
    fn native_object(&self) -> &NativeObject {
        &self.object
    }
}

#[test]
fn typed_getters_fall_back_to_defaults() {
    let legend = Legend::new();
    assert!(legend.is_display());
    assert_eq!(legend.position(), Position::Top);
    assert_eq!(legend.value_or(&Property::Padding, 10), 10);
    assert!(!legend.has(&Property::Display));

    legend.set_display(false);
    legend.set_position(Some(Position::ChartArea));
    assert!(!legend.is_display());
    assert_eq!(legend.position(), Position::ChartArea);
    assert_eq!(
        legend.native_object().get("position"),
        Some(NativeValue::from("chartArea"))
    );
}

#[test]
fn setting_none_removes_the_field() {
    let legend = Legend::new();
    legend.set_position(Some(Position::Bottom));
    assert!(legend.has(&Property::Position));
    legend.set_position(None);
    assert!(!legend.has(&Property::Position));
    assert_eq!(legend.position(), Position::Top);
}

#[test]
fn wrong_type_reads_as_default() {
    let legend = Legend::new();
    legend
        .set_value(&Property::Padding, Some("wide"))
        .expect("padding");
    assert_eq!(legend.value_or(&Property::Padding, 4), 4);
    assert_eq!(legend.value::<String, _>(&Property::Padding).as_deref(), Some("wide"));
}

#[test]
fn enum_names_match_case_insensitively() {
    let legend = Legend::new();
    legend
        .set_value(&Property::Position, Some("BOTTOM"))
        .expect("raw position");
    assert_eq!(legend.position(), Position::Bottom);

    legend
        .set_value(&Property::Position, Some("sideways"))
        .expect("unknown position");
    assert_eq!(legend.position(), Position::Top);
}

#[test]
fn array_fields_are_shared_with_lists() {
    let legend = Legend::new();
    let mut text = legend.text();
    text.add("Sales".to_owned());
    text.add("2024".to_owned());

    let again = legend.text();
    assert_eq!(again.size(), 2);
    assert!(again.array().same_array(text.array()));
    assert_eq!(
        legend.to_json_with(BridgeConfig::default().with_json_indent(0)).expect("json"),
        r#"{"text":["Sales","2024"]}"#
    );
}

#[test]
fn array_of_another_kind_is_not_reinterpreted() {
    let legend = Legend::new();
    legend
        .set_array(&Property::Weights, Some(NativeArray::from_vec(vec![1.0, 2.0])))
        .expect("weights");
    assert!(legend.array::<String, _>(&Property::Weights).is_none());

    let weights = NumberList::from_array(
        legend
            .array::<f64, _>(&Property::Weights)
            .expect("number array"),
    )
    .expect("wrap");
    assert_eq!(weights.get(1), Some(2.0));
}

#[test]
fn dates_round_trip_and_render_as_iso_strings() {
    let legend = Legend::new();
    let since = Utc.with_ymd_and_hms(2023, 11, 5, 8, 30, 0).unwrap();
    legend.set_value(&Property::Since, Some(since)).expect("since");
    assert_eq!(legend.value(&Property::Since), Some(since));
    assert_eq!(
        legend
            .to_json_with(BridgeConfig::default().with_json_indent(0))
            .expect("json"),
        r#"{"since":"2023-11-05T08:30:00.000Z"}"#
    );
}

#[test]
fn nested_objects_and_default_pretty_json() {
    let legend = Legend::new();
    let font = NativeObject::new();
    define_field(&font, "size", 12).expect("size");
    legend.set_object(&Property::Font, Some(font.clone())).expect("font");

    let read = legend.object(&Property::Font).expect("font object");
    assert!(read.same_object(&font));
    assert_eq!(
        legend.to_json().expect("json"),
        "{\n   \"font\": {\n      \"size\": 12\n   }\n}"
    );
}

#[test]
fn keys_and_bulk_removal() {
    let legend = Legend::new();
    legend.set_display(true);
    legend.set_position(Some(Position::Top));
    legend.set_value(&Property::Padding, Some(3)).expect("padding");
    assert_eq!(legend.keys(), vec!["display", "position", "padding"]);
    assert!(legend.has_all(&[Property::Display, Property::Padding]));

    legend.remove_all(&[Property::Display, Property::Padding, Property::Text]);
    assert_eq!(legend.keys(), vec!["position"]);
    assert!(!legend.has_all(&[Property::Display, Property::Position]));
}

#[test]
fn plain_string_keys_work_too() {
    let legend = Legend::new();
    legend.set_value("custom", Some(1.5)).expect("custom");
    assert!(legend.has("custom"));
    assert_eq!(legend.value_or("custom", 0.0), 1.5);
    assert!(legend.remove("custom"));
    assert!(!legend.has("custom"));
}

#[test]
fn locked_fields_survive_removal_attempts() {
    let legend = Legend::new();
    define_field_with(
        legend.native_object(),
        "id",
        PropertyDescriptor::new("legend-1").with_configurable(false),
    )
    .expect("define locked");

    assert!(!legend.remove("id"));
    assert_eq!(
        legend.set_value("id", Some("other")),
        Err(BridgeError::NonConfigurable {
            name: "id".to_owned()
        })
    );
    assert_eq!(legend.value::<String, _>("id").as_deref(), Some("legend-1"));
}

#[test]
fn clearing_a_locked_field_is_reported() {
    let legend = Legend::new();
    define_field_with(
        legend.native_object(),
        "id",
        PropertyDescriptor::new("legend-1").with_configurable(false),
    )
    .expect("define locked");

    assert_eq!(
        legend.set_value::<String, _>("id", None),
        Err(BridgeError::NonConfigurable {
            name: "id".to_owned()
        })
    );
    assert!(legend.has("id"));
    assert_eq!(legend.set_value::<String, _>("missing", None), Ok(()));
}

#[test]
fn descriptor_bridge_reports_attributes() {
    let object = NativeObject::new();
    assert!(!has_own_field(&object, "hidden"));
    define_field_with(
        &object,
        "hidden",
        PropertyDescriptor::new(true)
            .with_enumerable(false)
            .with_writable(false),
    )
    .expect("hidden");

    let descriptor = get_field_descriptor(&object, "hidden").expect("descriptor");
    assert!(descriptor.configurable);
    assert!(!descriptor.enumerable);
    assert!(!descriptor.writable);
    assert!(object_as_map(&object).is_empty());
}

#[test]
fn key_lists_persist_names() {
    let mut list: KeyList<Position> = key_list_of(&[Position::Top, Position::ChartArea]);
    assert_eq!(
        list.array().to_vec(),
        vec!["top".to_owned(), "chartArea".to_owned()]
    );
    assert_eq!(list.index_of(&Position::ChartArea), Some(1));

    list.add_at(0, Position::Bottom).expect("insert");
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        vec![Position::Bottom, Position::Top, Position::ChartArea]
    );
}

#[test]
fn key_list_skips_unknown_names_on_read() {
    let host = NativeArray::from_vec(vec![
        "top".to_owned(),
        "diagonal".to_owned(),
        "Bottom".to_owned(),
    ]);
    let mut list = KeyList::<Position>::from_array(host).expect("wrap");
    assert_eq!(list.size(), 3);
    assert_eq!(list.get(1), None);
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        vec![Position::Top, Position::Bottom]
    );

    assert!(list.retain_all(&[Position::Top, Position::Bottom]));
    assert_eq!(list.size(), 2);
}

#[test]
fn host_graph_loaded_from_json_feeds_lists() {
    let value = json::parse(r#"{"labels":["a","b"],"data":[1,2,3]}"#).expect("parse");
    let NativeValue::Object(object) = value else {
        panic!("expected object");
    };
    let legend = Legend { object };
    let data = NumberList::from_array(legend.array::<f64, _>("data").expect("data"))
        .expect("wrap");
    assert_eq!(data.size(), 3);
    let labels = StringList::from_array(legend.array::<String, _>("labels").expect("labels"))
        .expect("wrap");
    assert_eq!(labels.get(1).as_deref(), Some("b"));
}

#[test]
fn parsed_fractions_read_back_as_numbers() {
    let object = json::parse_object(r#"{"tension":0.4,"scale":1e-7,"ticks":{"stepSize":0.1}}"#)
        .expect("parse");
    let legend = Legend { object };
    assert_relative_eq!(legend.value_or("tension", 0.0), 0.4);
    assert_relative_eq!(legend.value_or("scale", 0.0), 1e-7);

    let ticks = legend.object("ticks").expect("nested object");
    let step: f64 = Legend { object: ticks }.value_or("stepSize", 1.0);
    assert_relative_eq!(step, 0.1);
    assert_eq!(legend.value::<i32, _>("tension"), None);
}
