use criterion::{Criterion, criterion_group, criterion_main};
use domain::{BusEvent, NotificationEvent, TransactionEnvelope, TransactionEvent};
use serde_json::{Map, Value, json};

fn make_envelope(extra_fields: usize) -> TransactionEnvelope {
    let mut fields = Map::new();
    fields.insert("packaging_type".to_string(), json!("box"));
    fields.insert("quantity".to_string(), json!(5));
    for i in 0..extra_fields {
        fields.insert(format!("field_{i:03}"), json!({"index": i, "label": "pass-through"}));
    }
    TransactionEnvelope::from_value(Value::Object(fields)).unwrap()
}

fn bench_validate_envelope(c: &mut Criterion) {
    let payload = json!({"packaging_type": "box", "quantity": 5, "vendor": "acme"});

    c.bench_function("domain/validate_envelope", |b| {
        b.iter(|| TransactionEnvelope::from_value(payload.clone()).unwrap());
    });
}

fn bench_build_both_events(c: &mut Criterion) {
    let envelope = make_envelope(0);

    c.bench_function("domain/build_and_serialize_events", |b| {
        b.iter(|| {
            let transaction = TransactionEvent::from_envelope(&envelope);
            let notification = NotificationEvent::builder(&envelope).build();
            (
                transaction.to_payload().unwrap(),
                notification.to_payload().unwrap(),
            )
        });
    });
}

fn bench_build_events_50_fields(c: &mut Criterion) {
    let envelope = make_envelope(50);

    c.bench_function("domain/build_and_serialize_events_50_fields", |b| {
        b.iter(|| {
            let transaction = TransactionEvent::from_envelope(&envelope);
            let notification = NotificationEvent::builder(&envelope).build();
            (
                transaction.to_payload().unwrap(),
                notification.to_payload().unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_validate_envelope,
    bench_build_both_events,
    bench_build_events_50_fields,
);
criterion_main!(benches);
