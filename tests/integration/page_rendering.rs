//! Rendering through the library API with test fixtures.

use std::sync::Arc;
use std::thread;

use pageparts::data::{DataSourceError, FnDataSource};
use pageparts::page::{Page, PageOrchestrator};
use pageparts::registry::Component;
use pageparts::render::{Part, RenderError};
use pageparts::request::RequestContext;
use pageparts::test_utils::{FailingDataSource, FixtureRegistry, RecordingDataSource, rows};
use serde_json::json;

fn shop_registry() -> FixtureRegistry {
    FixtureRegistry::new()
        .template("list", "list", r#"<section>{{ heading | default(value="") }}{{ item | safe }}</section>"#)
        .template("item", "item", "<li>{{ title }}</li>")
        .template("item", "compact", "{{ title }};")
        .component(Component::new("list"))
        .component(Component::new("item"))
        .bind(
            "list",
            Arc::new(RecordingDataSource::new(rows(json!([
                {"heading": "New"},
                {"heading": "Sale"}
            ])))),
        )
        .bind(
            "item",
            Arc::new(RecordingDataSource::new(rows(json!([
                {"title": "Lamp"},
                {"title": "Chair"}
            ])))),
        )
}

#[test]
fn test_list_item_page() {
    let orchestrator = PageOrchestrator::new(shop_registry().build_shared());
    let page = Page::new("/shop/").with_part(Part::new("list").with_child(Part::new("item")));

    let html = orchestrator.render_page(&page, "/shop/", "en").unwrap();

    let item = r#"<item data-component="item"><li>Lamp</li><li>Chair</li></item>"#;
    assert_eq!(
        html,
        format!(
            r#"<list data-component="list"><section>New{item}</section><section>Sale{item}</section></list>"#
        )
    );
}

#[test]
fn test_explicit_template_on_child() {
    let orchestrator = PageOrchestrator::new(shop_registry().build_shared());
    let page = Page::new("/shop/")
        .with_part(Part::new("list").with_child(Part::new("item").with_template("compact")));

    let html = orchestrator.render_page(&page, "/shop/", "en").unwrap();
    assert!(html.contains(r#"<item data-component="item">Lamp;Chair;</item>"#));
}

#[test]
fn test_unknown_component_yields_no_html() {
    let orchestrator = PageOrchestrator::new(shop_registry().build_shared());
    let page = Page::new("/shop/")
        .with_part(Part::new("list").with_child(Part::new("item")))
        .with_part(Part::new("footer"));

    let err = orchestrator.render_page(&page, "/shop/", "en").unwrap_err();
    assert!(matches!(err, RenderError::ComponentNotFound { ref name, .. } if name == "footer"));
    assert_eq!(err.to_string(), "Component not found for part: footer");
}

#[test]
fn test_data_failure_keeps_the_page_alive() {
    let registry = shop_registry()
        .bind("list", Arc::new(FailingDataSource::query("connection reset")))
        .build_shared();
    let page = Page::new("/shop/").with_part(Part::new("list").with_child(Part::new("item")));

    let html = PageOrchestrator::new(registry).render_page(&page, "/shop/", "en").unwrap();
    assert!(html.starts_with(r#"<list data-component="list"><section><item"#));
    assert_eq!(html.matches("<section>").count(), 1);
}

#[test]
fn test_fatal_data_failure_fails_the_page() {
    let registry = shop_registry()
        .bind(
            "item",
            Arc::new(FnDataSource::new(|params: &[String], _: &RequestContext| {
                Err(DataSourceError::Misconfigured {
                    message: format!("query takes 1 parameter, got {}", params.len()),
                })
            })),
        )
        .build_shared();
    let page = Page::new("/shop/").with_part(Part::new("list").with_child(Part::new("item")));

    let err = PageOrchestrator::new(registry).render_page(&page, "/shop/a:b", "en").unwrap_err();
    assert!(matches!(err, RenderError::DataSource { ref component, .. } if component == "item"));
    assert!(err.to_string().contains("got 2"));
}

#[test]
fn test_concurrent_renders_share_one_registry() {
    let orchestrator = Arc::new(PageOrchestrator::new(shop_registry().build_shared()));
    let page = Arc::new(Page::new("/shop/").with_part(Part::new("list").with_child(Part::new("item"))));
    let expected = orchestrator.render_page(&page, "/shop/", "en").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            let page = Arc::clone(&page);
            thread::spawn(move || orchestrator.render_page(&page, "/shop/", "en").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
