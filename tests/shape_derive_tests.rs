#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use modelselect::catalog::{FieldMeta, HandlerMeta, OwnerMeta, ParameterSource};
use modelselect::selector::{ActionSelector, FieldSet, Resolution, SignatureBuilder};
use modelselect::Shape;

#[derive(Shape)]
struct Order {
    id: u64,
    total: u64,
}

#[derive(Shape)]
struct Invoice {
    id: u64,
    amount: u64,
    #[shape(rename = "dueDate")]
    due_date: String,
    #[shape(ignore)]
    internal_ref: Option<String>,
}

#[derive(Shape)]
struct Page<T> {
    r#type: String,
    items: Vec<T>,
}

#[test]
fn test_derived_fields() {
    assert_eq!(
        Order::shape_fields(),
        vec![FieldMeta::new("id"), FieldMeta::new("total")]
    );
    assert_eq!(
        Invoice::shape_fields(),
        vec![
            FieldMeta::new("id"),
            FieldMeta::new("amount"),
            FieldMeta::new("dueDate"),
            FieldMeta::client_ignored("internal_ref"),
        ]
    );
}

#[test]
fn test_derive_generic_and_raw_identifiers() {
    assert_eq!(
        Page::<Order>::shape_fields(),
        vec![FieldMeta::new("type"), FieldMeta::new("items")]
    );
}

#[test]
fn test_body_and_uri_registration() {
    let handler = HandlerMeta::new("postInvoice").uri::<Order>().body::<Invoice>();
    assert_eq!(handler.parameters.len(), 2);
    assert_eq!(handler.parameters[0].name, "Order");
    assert_eq!(handler.parameters[0].source, ParameterSource::Uri);
    assert_eq!(handler.parameters[1].name, "Invoice");
    assert!(handler.parameters[1].is_payload_model());
}

#[test]
fn test_derived_models_drive_selection() {
    let owner = OwnerMeta::new("Billing")
        .handler(HandlerMeta::new("postOrder").body::<Order>())
        .handler(HandlerMeta::new("postInvoice").body::<Invoice>());
    let selector = ActionSelector::new(SignatureBuilder::new().build(&[owner]).unwrap());

    // internal_ref is ignored, so the invoice shape has three fields.
    let sigs = selector.index().get("Billing").unwrap();
    assert_eq!(sigs[1].shape.len(), 3);

    let fields = FieldSet::from_keys(["id", "amount", "duedate"]);
    let Ok(Resolution::Winner(sig)) = selector.resolve("Billing", "POST", &fields) else {
        panic!("expected a winner");
    };
    assert_eq!(&*sig.handler, "postInvoice");
}
