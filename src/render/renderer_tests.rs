use super::*;
use crate::data::{DataSourceError, NoEscape};
use crate::test_utils::{FailingDataSource, FixtureRegistry, RecordingDataSource, row, rows};
use serde_json::json;
use std::sync::Arc;

fn ctx() -> RequestContext {
    RequestContext::new("/", "en")
}

#[test]
fn test_no_data_no_children_renders_with_empty_mapping() {
    let registry = FixtureRegistry::new()
        .template("banner", "banner", "[{{ locale }}]{% if title %}x{% endif %}")
        .component(Component::new("banner"))
        .build();

    let html = PartRenderer::new(&registry).render(&Part::new("banner"), &ctx()).unwrap();
    assert_eq!(html, r#"<banner data-component="banner">[en]</banner>"#);
}

#[test]
fn test_rows_render_once_each_and_wrap_once() {
    let registry = FixtureRegistry::new()
        .template("item", "item", "<li>{{ title }}</li>")
        .component(Component::new("item"))
        .bind(
            "item",
            Arc::new(RecordingDataSource::new(rows(json!([
                {"title": "Lamp"},
                {"title": "Chair"},
                {"title": "Desk"}
            ])))),
        )
        .build();

    let html = PartRenderer::new(&registry).render(&Part::new("item"), &ctx()).unwrap();
    assert_eq!(
        html,
        r#"<item data-component="item"><li>Lamp</li><li>Chair</li><li>Desk</li></item>"#
    );
}

#[test]
fn test_empty_rows_render_child_outputs_once() {
    let registry = FixtureRegistry::new()
        .template("box", "box", "({{ child | safe }})")
        .template("child", "child", "X")
        .component(Component::new("box"))
        .component(Component::new("child"))
        .bind("box", Arc::new(RecordingDataSource::new(vec![])))
        .build();

    let part = Part::new("box").with_child(Part::new("child"));
    let html = PartRenderer::new(&registry).render(&part, &ctx()).unwrap();
    assert_eq!(
        html,
        r#"<box data-component="box">(<child data-component="child">X</child>)</box>"#
    );
}

#[test]
fn test_child_output_overwrites_data_field() {
    let registry = FixtureRegistry::new()
        .template("outer", "outer", "{{ a | safe }}|{{ b }}")
        .template("a", "a", "child")
        .component(Component::new("outer"))
        .component(Component::new("a"))
        .bind("outer", Arc::new(RecordingDataSource::new(vec![row(json!({"a": "db", "b": "kept"}))])))
        .build();

    let part = Part::new("outer").with_child(Part::new("a"));
    let html = PartRenderer::new(&registry).render(&part, &ctx()).unwrap();
    assert_eq!(html, r#"<outer data-component="outer"><a data-component="a">child</a>|kept</outer>"#);
}

#[test]
fn test_list_item_scenario() {
    let registry = FixtureRegistry::new()
        .template("list", "list", "<p>{{ n }}:{{ item | safe }}</p>")
        .template("item", "item", "I")
        .component(Component::new("list"))
        .component(Component::new("item"))
        .bind("list", Arc::new(RecordingDataSource::new(rows(json!([{"n": 1}, {"n": 2}])))))
        .build();

    let part = Part::new("list").with_child(Part::new("item"));
    let html = PartRenderer::new(&registry).render(&part, &ctx()).unwrap();

    let item = r#"<item data-component="item">I</item>"#;
    assert_eq!(html, format!(r#"<list data-component="list"><p>1:{item}</p><p>2:{item}</p></list>"#));
    assert_eq!(html.matches("<list ").count(), 1);
}

#[test]
fn test_unknown_component_fails_regardless_of_siblings() {
    let registry = FixtureRegistry::new()
        .template("list", "list", "{{ item | safe }}")
        .template("item", "item", "I")
        .component(Component::new("list"))
        .component(Component::new("item"))
        .build();

    let part = Part::new("list")
        .with_child(Part::new("item"))
        .with_child(Part::new("itme"))
        .with_child(Part::new("item"));
    match PartRenderer::new(&registry).render(&part, &ctx()) {
        Err(RenderError::ComponentNotFound {
            name,
            chain,
            suggestions,
        }) => {
            assert_eq!(name, "itme");
            assert_eq!(chain, vec!["list"]);
            assert_eq!(suggestions, vec!["item"]);
        }
        other => panic!("expected ComponentNotFound, got {other:?}"),
    }
}

#[test]
fn test_recoverable_data_failure_renders_child_data_only() {
    crate::test_utils::init_test_logging(None);
    let registry = FixtureRegistry::new()
        .template("list", "list", "[{{ item | safe }}]")
        .template("item", "item", "I")
        .component(Component::new("list"))
        .component(Component::new("item"))
        .bind("list", Arc::new(FailingDataSource::query("syntax error near ?")))
        .build();

    let part = Part::new("list").with_child(Part::new("item"));
    let html = PartRenderer::new(&registry).render(&part, &ctx()).unwrap();
    assert_eq!(html, r#"<list data-component="list">[<item data-component="item">I</item>]</list>"#);
}

#[test]
fn test_fatal_data_failure_aborts_render() {
    let registry = FixtureRegistry::new()
        .template("list", "list", "L")
        .component(Component::new("list"))
        .bind("list", Arc::new(FailingDataSource::misconfigured("no such table")))
        .build();

    match PartRenderer::new(&registry).render(&Part::new("list"), &ctx()) {
        Err(RenderError::DataSource {
            component,
            source,
        }) => {
            assert_eq!(component, "list");
            assert!(matches!(source, DataSourceError::Misconfigured { .. }));
        }
        other => panic!("expected DataSource error, got {other:?}"),
    }
}

#[test]
fn test_depth_guard_stops_deep_trees() {
    let registry = FixtureRegistry::new()
        .template("node", "node", "{{ node | default(value='') | safe }}")
        .component(Component::new("node"))
        .build();

    let mut part = Part::new("node");
    for _ in 0..4 {
        part = Part::new("node").with_child(part);
    }
    assert_eq!(part.depth(), 5);

    let renderer = PartRenderer::new(&registry).with_max_depth(5);
    assert!(renderer.render(&part, &ctx()).is_ok());

    let renderer = PartRenderer::new(&registry).with_max_depth(4);
    match renderer.render(&part, &ctx()) {
        Err(RenderError::DepthExceeded {
            limit,
            chain,
            ..
        }) => {
            assert_eq!(limit, 4);
            assert_eq!(chain.len(), 4);
        }
        other => panic!("expected DepthExceeded, got {other:?}"),
    }
}

#[test]
fn test_template_selection_order() {
    let registry = FixtureRegistry::new()
        .template("card", "wide", "W")
        .template("card", "narrow", "N")
        .template("plain", "first", "1")
        .template("plain", "second", "2")
        .component(Component::new("card").with_default_template("narrow"))
        .component(Component::new("plain"))
        .build();
    let renderer = PartRenderer::new(&registry);

    let render = |part: Part| renderer.render(&part, &ctx()).unwrap();
    assert_eq!(render(Part::new("card")), r#"<card data-component="card">N</card>"#);
    assert_eq!(
        render(Part::new("card").with_template("wide")),
        r#"<card data-component="card">W</card>"#
    );
    assert_eq!(render(Part::new("plain")), r#"<plain data-component="plain">1</plain>"#);
}

#[test]
fn test_missing_templates_are_reported() {
    let registry = FixtureRegistry::new()
        .template("card", "wide", "W")
        .component(Component::new("card"))
        .component(Component::new("empty"))
        .component(Component::new("stale").with_default_template("gone"))
        .build();
    let renderer = PartRenderer::new(&registry);

    assert!(matches!(
        renderer.render(&Part::new("empty"), &ctx()),
        Err(RenderError::NoTemplates { component }) if component == "empty"
    ));
    assert!(matches!(
        renderer.render(&Part::new("card").with_template("tall"), &ctx()),
        Err(RenderError::TemplateNotFound { template, .. }) if template == "tall"
    ));
    assert!(matches!(
        renderer.render(&Part::new("stale"), &ctx()),
        Err(RenderError::TemplateNotFound { template, .. }) if template == "gone"
    ));
}

#[test]
fn test_path_params_are_escaped_before_fetch() {
    let source = Arc::new(RecordingDataSource::new(vec![]));
    let registry = FixtureRegistry::new()
        .template("product", "product", "P")
        .template("price", "price", "$")
        .component(Component::new("product"))
        .component(Component::new("price"))
        .bind("product", source.clone())
        .bind("price", source.clone())
        .build();

    let part = Part::new("product").with_child(Part::new("price"));
    let request = RequestContext::new("/product/1' OR '1:red", "en");
    PartRenderer::new(&registry).render(&part, &request).unwrap();

    let expected = vec![r"1\' OR \'1".to_string(), "red".to_string()];
    assert_eq!(source.calls(), vec![expected.clone(), expected]);

    let raw = Arc::new(RecordingDataSource::new(vec![]));
    let registry = FixtureRegistry::new()
        .template("product", "product", "P")
        .component(Component::new("product"))
        .bind("product", raw.clone())
        .build();
    PartRenderer::new(&registry)
        .with_escaper(&NoEscape)
        .render(&Part::new("product"), &request)
        .unwrap();
    assert_eq!(raw.calls(), vec![vec!["1' OR '1".to_string(), "red".to_string()]]);
}

#[test]
fn test_template_errors_carry_component() {
    let registry = FixtureRegistry::new()
        .template("item", "item", "{{ titel }}")
        .component(Component::new("item"))
        .bind("item", Arc::new(RecordingDataSource::new(vec![row(json!({"title": "Lamp"}))])))
        .build();

    let err = PartRenderer::new(&registry).render(&Part::new("item"), &ctx()).unwrap_err();
    assert!(matches!(&err, RenderError::Template { component, .. } if component == "item"));
    assert!(err.to_string().contains("titel"));
}

#[test]
fn test_render_component_uses_caller_data_only() {
    let source = Arc::new(RecordingDataSource::new(rows(json!([{"uri": "/ignored"}]))));
    let registry = FixtureRegistry::new()
        .template("login", "form", r#"<form action="{{ uri }}">{{ error | default(value="") }}</form>"#)
        .component(Component::new("login"))
        .bind("login", source.clone())
        .build();

    let html = PartRenderer::new(&registry)
        .render_component("login", None, &row(json!({"uri": "/account/"})), &ctx())
        .unwrap();
    assert_eq!(html, r#"<login data-component="login"><form action="&#x2F;account&#x2F;"></form></login>"#);
    assert!(source.calls().is_empty());
}
