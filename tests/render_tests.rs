//! Render Tests
//!
//! Fills the `test_render` fixture and checks the Handlebars output.

mod common;

use handlebars::html_escape;
use pattern_schemas::{Component, NoticeCode, PropertyNode};
use serde_json::{json, Value};

fn set_values(component: &mut Component, values: Value) {
    if let Value::Object(fields) = values {
        for (name, value) in fields {
            component.set(&name, value);
        }
    }
}

fn render_text(component: &Component) -> String {
    match component.render() {
        Value::String(markup) => markup,
        other => panic!("Expected markup, got {:?}", other),
    }
}

fn assert_contains(markup: &str, expected: &str) {
    assert!(markup.contains(expected), "{:?} not found in:\n{}", expected, markup);
}

#[test]
fn test_simple_data() {
    let (context, _) = common::context(false);
    let mut catalog = common::catalog(context);
    let mut component = catalog.load("test_render").unwrap();

    set_values(
        &mut component,
        json!({
            "header": {
                "title": "Header Title",
                "headline": "Header Headline",
                "summary": "Header summary"
            },
            "text": "test text",
            "text_readonly": "this text should not show",
            "text_escaped": "<p>escape me</p>",
            "text_html": "<p>my html goes here</p>",
            "boolean_flag": true,
            "number_integer": 99,
            "number_number": 100.99
        }),
    );

    let markup = render_text(&component);

    assert_contains(&markup, "\"pb-header--title\">Header Title");
    assert_contains(&markup, "\"pb-header--headline\">Header Headline");
    assert_contains(&markup, "\"pb-header--summary\">Header summary");
    assert_contains(&markup, "\"pb-text\">test text");
    assert_contains(&markup, "\"pb-text-readonly\">READONLY");
    assert_contains(
        &markup,
        &format!("\"pb-text-escaped\">{}", html_escape("<p>escape me</p>")),
    );
    assert_contains(&markup, "\"pb-text-html\"><p>my html goes here</p>");
    assert_contains(&markup, "\"pb-boolean\">TRUE");
    assert_contains(&markup, "\"pb-number-integer\">99");
    assert_contains(&markup, "\"pb-number-number\">100.99");
    assert!(!markup.contains("this text should not show"));
}

#[test]
fn test_arrays() {
    let (context, _) = common::context(false);
    let mut catalog = common::catalog(context);
    let mut component = catalog.load("test_render").unwrap();

    set_values(
        &mut component,
        json!({
            "array_of_strings": ["string 1", "string 2", "string 3"],
            "array_of_objects": [
                {"foo": "foo 1", "bar": 11.222, "baz": false},
                {"foo": "foo 2", "bar": 33.4},
                {"bar": 5, "baz": true}
            ]
        }),
    );

    let markup = render_text(&component);

    for (i, text) in ["string 1", "string 2", "string 3"].iter().enumerate() {
        assert_contains(&markup, &format!("\"pb-array-of-strings--item--{}\">{}", i, text));
    }

    assert_contains(&markup, "\"pb-array-with-objects--item--0--foo\">foo 1");
    assert_contains(&markup, "\"pb-array-with-objects--item--0--bar\">11.222");
    assert_contains(&markup, "\"pb-array-with-objects--item--0--baz\">FALSE");
    assert_contains(&markup, "\"pb-array-with-objects--item--1--foo\">foo 2");
    assert_contains(&markup, "\"pb-array-with-objects--item--1--bar\">33.4");
    assert_contains(&markup, "\"pb-array-with-objects--item--2--bar\">5");
    assert_contains(&markup, "\"pb-array-with-objects--item--2--baz\">TRUE");
}

#[test]
fn test_schema_reference() {
    let (context, _) = common::context(false);
    let mut catalog = common::catalog(context);

    let mut cta = catalog.load("cta").unwrap();
    cta.set("type", "primary")
        .set("href", "https://www.example.com")
        .set("text", "CTA Text")
        .set("title", "CTA Title attribute");

    let mut image = catalog.load("image").unwrap();
    image
        .set("src", "https://www.example.com/logo.png")
        .set("alt", "Example");

    let mut component = catalog.load("test_render").unwrap();
    component.set("cta", cta).set("image", image);

    let markup = render_text(&component);

    assert_contains(
        &markup,
        &format!(
            "<a class=\"pb-cta\" data-cta-type=\"primary\" href=\"{}\" title=\"CTA Title attribute\">CTA Text",
            html_escape("https://www.example.com")
        ),
    );
    assert_contains(
        &markup,
        &format!(
            "<img class=\"pb-image\" src=\"{}\" alt=\"Example\" />",
            html_escape("https://www.example.com/logo.png")
        ),
    );
}

#[test]
fn test_render_variables() {
    let (context, _) = common::context(false);
    let mut catalog = common::catalog(context);
    let component = catalog.load("text").unwrap();

    let variables = component.prepare_render();
    assert_eq!(variables["name"], json!("text"));
    assert_eq!(variables["template"], json!("text.hbs"));
}

#[test]
fn test_text_template() {
    let (context, _) = common::context(false);
    let mut catalog = common::catalog(context);
    let mut text = catalog.load("text").unwrap();
    text.set("value", "<b>bold</b>");

    assert_eq!(
        render_text(&text),
        format!("<p class=\"pb-text\">{}</p>", html_escape("<b>bold</b>"))
    );
}

#[test]
fn test_missing_template_is_logged() {
    let (context, logger) = common::context(false);
    let mut catalog = common::catalog(context);
    let component = catalog.load("object").unwrap();

    assert_eq!(component.render(), Value::Null);

    let errors = logger.with_code(NoticeCode::RenderFailed);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("object.hbs"));
}

#[test]
fn test_developer_mode_validates_before_render() {
    let (context, logger) = common::context(true);
    let mut catalog = common::catalog(context);
    let mut component = catalog.load("test_render").unwrap();

    component.set("text", "fine").set("number_integer", "not a number");

    let markup = render_text(&component);
    assert_contains(&markup, "\"pb-number-integer\">not a number");

    let notices = logger.with_code(NoticeCode::SchemaValidation);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("number_integer"));
    assert!(notices[0].message.contains("test_render"));
}

#[test]
fn test_developer_mode_off_skips_validation() {
    let (context, logger) = common::context(false);
    let mut catalog = common::catalog(context);
    let mut component = catalog.load("test_render").unwrap();

    component.set("number_integer", "not a number");
    render_text(&component);

    assert!(logger.with_code(NoticeCode::SchemaValidation).is_empty());
}
