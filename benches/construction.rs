use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use example_records::example::Example;
use example_records::field::{DictFields, FieldSpec, ListField, ListFields};
use example_records::processors::{Identity, Tokenize};
use example_records::tree::BracketedTreeParser;

fn bench_construction(c: &mut Criterion) {
    let dict_fields = DictFields::new()
        .with("text", FieldSpec::new("text", Tokenize::lowercase()))
        .with("label", FieldSpec::new("label", Identity));
    let json_text = r#"{"text": "A quietly devastating film about memory and loss", "label": "pos"}"#;

    c.bench_function("from_json", |b| {
        b.iter(|| Example::from_json(black_box(json_text), &dict_fields).unwrap())
    });

    let list_fields: ListFields = vec![
        ListField::Single(FieldSpec::new("text", Tokenize::lowercase())),
        ListField::Single(FieldSpec::new("label", Identity)),
    ];
    let row = [json!("A quietly devastating film about memory and loss\n"), json!("pos")];

    c.bench_function("from_list", |b| {
        b.iter(|| Example::from_list(black_box(&row), &list_fields).unwrap())
    });

    let tree = "(4 (2 A) (4 (4 (3 quietly) (4 devastating)) (2 (2 film) (2 (2 about) (2 memory)))))";
    c.bench_function("from_subtrees", |b| {
        b.iter(|| Example::from_subtrees(black_box(tree), &list_fields, &BracketedTreeParser).unwrap())
    });
}

criterion_group!(benches, bench_construction);
criterion_main!(benches);
