//! Application configuration in every supported format.

use pageparts::app::{App, PageRequest};
use pageparts::config::{AppConfig, load_app_config, parse_config};
use pageparts::core::PagepartsError;
use pageparts::test_utils::ConfigFixture;
use tempfile::TempDir;

#[test]
fn test_yaml_and_toml_describe_the_same_app() {
    let yaml_dir = TempDir::new().unwrap();
    let toml_dir = TempDir::new().unwrap();
    let yaml_path = ConfigFixture::shop().write_to(yaml_dir.path()).unwrap();
    let toml_path = ConfigFixture::shop_toml().write_to(toml_dir.path()).unwrap();

    let render = |path: &std::path::Path| {
        let (config, base_dir) = load_app_config(path).unwrap();
        let app = App::from_config(config, &base_dir).unwrap();
        app.handle_fragment(&PageRequest::new("/products/").with_locale("en"))
    };

    let from_yaml = render(&yaml_path);
    let from_toml = render(&toml_path);
    assert_eq!(from_yaml.status(), 200);
    assert_eq!(from_yaml, from_toml);
    assert!(from_yaml.body().contains("<h1>Products</h1>"));
}

#[test]
fn test_json_configuration() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("app.json");
    std::fs::write(
        &path,
        r#"{
            "title": "Json",
            "components": [
                {"name": "hello", "templates": [{"name": "hello", "source": "Hi {{ locale }}"}]}
            ],
            "pages": [{"route": "/", "parts": [{"name": "hello"}]}]
        }"#,
    )
    .unwrap();

    let config: AppConfig = parse_config(&path).unwrap();
    assert_eq!(config.title, "Json");
    assert_eq!(config.default_locale, "nl");

    let app = App::from_config(config, temp.path()).unwrap();
    assert_eq!(
        app.handle_fragment(&PageRequest::new("/anything")).body(),
        r#"<hello data-component="hello">Hi nl</hello>"#
    );
}

#[test]
fn test_missing_template_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = ConfigFixture::shop().write_to(temp.path()).unwrap();
    std::fs::remove_file(temp.path().join("templates/item.html")).unwrap();

    let (config, base_dir) = load_app_config(&path).unwrap();
    match App::from_config(config, &base_dir) {
        Err(PagepartsError::TemplateLoad {
            component,
            template,
            ..
        }) => {
            assert_eq!(component, "item");
            assert_eq!(template, "item");
        }
        other => panic!("expected TemplateLoad, got {other:?}"),
    }
}

#[test]
fn test_document_path_resolves_next_to_config() {
    let temp = TempDir::new().unwrap();
    let path = ConfigFixture::shop()
        .with_file("layout/document.html", "<body>{{ title }}|{{ content | safe }}</body>")
        .write_to(temp.path())
        .unwrap();

    let (mut config, base_dir) = load_app_config(&path).unwrap();
    config.document_path = Some("layout/document.html".into());
    let app = App::from_config(config, &base_dir).unwrap();

    let response = app.handle(&PageRequest::new("/product/1"));
    assert_eq!(
        response.body(),
        r#"<body>Shop|<product data-component="product"><p>Lamp</p></product></body>"#
    );
}

#[test]
fn test_mistyped_fields_are_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = ConfigFixture::shop()
        .with_config("components: not-a-list\n")
        .write_to(temp.path())
        .unwrap();

    assert!(matches!(load_app_config(&path), Err(PagepartsError::ConfigParse { .. })));
}
