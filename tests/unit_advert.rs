// Tests for the JSON-backed advert: required fields, price rules,
// nested lookup and colored rendering.

use homework::advert::{Advert, Field, Green};
use serde_json::json;

const LESSON: &str = r#"{
    "title": "python",
    "price": 0,
    "location": {
        "address": "город Москва, Лесная, 7",
        "metro_stations": ["Белорусская"]
    }
}"#;

#[test]
fn nested_object_is_an_advert() {
    let ad: Advert = Advert::from_json(LESSON).unwrap();
    let location = ad.get("location").unwrap().into_advert().unwrap();
    assert_eq!(
        location.get("address").unwrap().as_str(),
        Some("город Москва, Лесная, 7")
    );
}

#[test]
fn dotted_path_walks_nested_objects() {
    let ad: Advert = Advert::from_json(LESSON).unwrap();
    let stations = ad.path("location.metro_stations").unwrap();
    assert_eq!(stations, Field::Value(json!(["Белорусская"])));
    assert!(ad.path("location.nope").is_none());
    assert!(ad.path("title.deeper").is_none());
}

#[test]
fn title_is_required_at_root() {
    let err = Advert::<Green>::from_value(json!({"price": 5})).unwrap_err();
    assert!(err.to_string().contains("title"));
}

#[test]
fn nested_adverts_do_not_need_title() {
    let ad: Advert = Advert::from_value(json!({
        "title": "t",
        "seller": {"name": "Ivan"}
    }))
    .unwrap();
    assert!(ad.get("seller").unwrap().into_advert().is_some());
}

#[test]
fn negative_price_rejected_on_construction() {
    assert!(Advert::<Green>::from_value(json!({"title": "t", "price": -1})).is_err());
}

#[test]
fn negative_nested_price_rejected_on_construction() {
    let result = Advert::<Green>::from_value(json!({
        "title": "t",
        "option": {"price": -10}
    }));
    assert!(result.is_err());
}

#[test]
fn set_price_validates_and_updates() {
    let mut ad: Advert = Advert::from_json(
        r#"{"title": "Вельш-корги", "price": 1000, "class": "dogs"}"#,
    )
    .unwrap();
    assert_eq!(ad.price(), 1000.0);

    assert!(ad.set_price(-5.0).is_err());
    assert_eq!(ad.price(), 1000.0);

    ad.set_price(1500.0).unwrap();
    assert_eq!(ad.price(), 1500.0);
    assert!(ad.to_string().contains("1500 \u{20bd}"));
}

#[test]
fn set_price_inserts_missing_price() {
    let mut ad: Advert = Advert::from_json(r#"{"title": "Вельш-корги"}"#).unwrap();
    assert_eq!(ad.price(), 0.0);
    ad.set_price(12.5).unwrap();
    assert_eq!(ad.price(), 12.5);
    assert!(ad.keys().any(|k| k == "price"));
}

#[test]
fn render_keeps_field_order_and_nests() {
    let ad: Advert = Advert::from_json(LESSON).unwrap();
    assert_eq!(
        ad.to_string(),
        "\x1b[31mpython | 0 \u{20bd} | \x1b[31mгород Москва, Лесная, 7 | [\"Белорусская\"]"
    );
}

#[test]
fn title_accessor() {
    let ad: Advert = Advert::from_json(LESSON).unwrap();
    assert_eq!(ad.title(), Some("python"));
}

#[test]
fn non_object_json_rejected() {
    assert!(Advert::<Green>::from_json("[1, 2]").is_err());
    assert!(Advert::<Green>::from_json("not json").is_err());
}
