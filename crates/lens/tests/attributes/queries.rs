//! Typed queries built through the query factory.

use std::sync::Arc;
use std::thread;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigQuery {
    name: String,
    timeout: i32,
    retries: i32,
    tags: Vec<String>,
}

impl AttributeQuery for ConfigQuery {
    const ATTRIBUTE_NAME: &'static str = "Config";

    fn from_attribute(attribute: ValidAttribute) -> Self {
        Self {
            name: attribute.constructor_arg(0).or_default_with(String::new),
            timeout: attribute.named_arg("Timeout").or_default(0),
            retries: attribute.named_arg("Retries").or_default(3),
            tags: attribute.named_arg("Tags").or_default_with(Vec::new),
        }
    }
}

#[derive(Debug)]
struct Unregistered;

#[derive(Debug, PartialEq)]
struct ShortName(String);

#[test]
fn test_attributes_of_builds_typed_queries() {
    init_tracing();
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let queries = service.attributes_of::<ConfigQuery>().unwrap();
    assert_eq!(
        queries,
        [ConfigQuery {
            name: "orders".into(),
            timeout: 30,
            retries: 3,
            tags: vec!["fast".into(), "eu".into()],
        }]
    );
    assert!(QueryFactory::global().is_registered::<ConfigQuery>());
    assert!(service.has_attribute_of::<ConfigQuery>());

    let order = valid_type(&compilation, "Shop.Orders.Order");
    assert!(order.attributes_of::<ConfigQuery>().unwrap().is_empty());
    assert!(order.lacks_attribute_of::<ConfigQuery>());
}

#[test]
fn test_unregistered_query_type_is_an_error() {
    init_tracing();
    let factory = QueryFactory::new();
    let compilation = shop();

    let result = factory.create::<Unregistered>(config(&compilation));
    let error = result.unwrap_err();
    assert!(matches!(error, FactoryError::MissingConstructor { .. }));
    assert!(error.to_string().contains("Unregistered"));
    assert!(factory.is_empty());
}

#[test]
fn test_first_registration_wins() {
    let factory = QueryFactory::new();
    let compilation = shop();

    assert!(factory.register(|attribute: ValidAttribute| ShortName(attribute.short_name().to_string())));
    assert!(!factory.register(|_: ValidAttribute| ShortName("ignored".into())));
    assert_eq!(factory.len(), 1);

    let built = factory.create::<ShortName>(config(&compilation)).unwrap();
    assert_eq!(built, ShortName("Config".into()));
}

#[test]
fn test_query_stores_constructor_once() {
    let factory = QueryFactory::new();
    let compilation = shop();
    assert!(!factory.is_registered::<ConfigQuery>());

    let first = factory.query::<ConfigQuery>(config(&compilation)).unwrap();
    assert!(factory.is_registered::<ConfigQuery>());
    let second = factory.create::<ConfigQuery>(config(&compilation)).unwrap();
    assert_eq!(first, second);
    assert_eq!(factory.len(), 1);
}

#[test]
fn test_concurrent_queries_share_one_constructor() {
    let factory = Arc::new(QueryFactory::new());
    let compilation = shop();
    let attribute = config(&compilation);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let factory = Arc::clone(&factory);
            let attribute = attribute.clone();
            thread::spawn(move || factory.query::<ConfigQuery>(attribute).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().timeout, 30);
    }
    assert_eq!(factory.len(), 1);
}
