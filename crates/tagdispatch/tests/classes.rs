//! Classes built with constructors, validators and helpers, dispatched through their labels.
use tagdispatch::{ClassDef, DispatchError, Registry, Tagged, ValidationError};

#[derive(Debug, Clone, PartialEq)]
struct Money {
    cents: i64,
    currency: String,
}

fn money() -> ClassDef<Money> {
    ClassDef::new("money").with_validator(|m: &Money| {
        if m.currency.len() == 3 {
            Ok(())
        } else {
            Err(format!("`{}` is not a currency code", m.currency))
        }
    })
}

fn refund() -> ClassDef<Money> {
    money().extend("refund").with_validator(|m: &Money| {
        if m.cents <= 0 {
            Ok(())
        } else {
            Err("refunds must not be positive".to_string())
        }
    })
}

fn format_registry() -> Registry<Tagged<Money>, (), String> {
    let mut registry: Registry<Tagged<Money>, (), String> = Registry::new();
    registry.register("format", "money", |cursor| {
        let m = cursor.value().value();
        Ok(format!("{}.{:02} {}", m.cents / 100, m.cents.abs() % 100, m.currency))
    });
    registry.register("format", "refund", |cursor| {
        Ok(format!("refund of {}", cursor.next()?))
    });
    registry
}

#[test]
fn helper_validates_whole_hierarchy() {
    assert!(refund()
        .create(Money {
            cents: -250,
            currency: "EUR".to_string()
        })
        .is_ok());

    assert!(matches!(
        refund().create(Money {
            cents: -250,
            currency: "EURO".to_string()
        }),
        Err(ValidationError::Invalid { class, .. }) if class == "money"
    ));

    assert!(matches!(
        refund().create(Money {
            cents: 250,
            currency: "EUR".to_string()
        }),
        Err(ValidationError::Invalid { class, .. }) if class == "refund"
    ));
}

#[test]
fn subclass_dispatch_continues_into_parent() {
    let registry = format_registry();
    let price = money()
        .create(Money {
            cents: 1999,
            currency: "USD".to_string(),
        })
        .unwrap();
    let back = refund()
        .create(Money {
            cents: -1999,
            currency: "USD".to_string(),
        })
        .unwrap();

    assert_eq!(
        registry.dispatch("format", &price, &()),
        Ok("19.99 USD".to_string())
    );
    assert_eq!(
        registry.dispatch("format", &back, &()),
        Ok("refund of -19.99 USD".to_string())
    );
}

#[test]
fn unclassed_value_loses_methods() {
    let registry = format_registry();
    let price = money()
        .create(Money {
            cents: 5,
            currency: "USD".to_string(),
        })
        .unwrap();
    let bare = Tagged::new(price.unclass(), ["record"]);
    assert!(matches!(
        registry.dispatch("format", &bare, &()),
        Err(DispatchError::NoMethodFound { .. })
    ));
}
