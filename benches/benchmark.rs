//! jsonbin benchmark

use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use jsonbin::{
    enumerate_array_items, enumerate_object_properties, get_value_length, BinaryJsonBuf, StringDictionary, Writer,
    WriterOptions,
};
use serde_json::{json, Value};

fn create_document() -> Value {
    let items: Vec<Value> = (0..100)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("item-{}", i),
                "price": i as f64 * 1.5,
                "tags": ["red", "green", "blue"],
                "nested": {"enabled": i % 2 == 0, "value": null},
            })
        })
        .collect();
    Value::Array(items)
}

fn bench_value_length(bench: &mut Bencher) {
    let value = BinaryJsonBuf::try_from(&create_document()).unwrap();
    let bytes = value.as_bytes();
    bench.iter(|| {
        black_box(get_value_length(bytes).unwrap());
    })
}

fn bench_single_item_length(bench: &mut Bencher) {
    let value = BinaryJsonBuf::parse("[[[[[[[[[[{\"key\": [[[[1]]]]}]]]]]]]]]]").unwrap();
    let bytes = value.as_bytes();
    bench.iter(|| {
        black_box(get_value_length(bytes).unwrap());
    })
}

fn bench_enumerate_array(bench: &mut Bencher) {
    let value = BinaryJsonBuf::try_from(&create_document()).unwrap();
    let bytes = value.as_bytes();
    bench.iter(|| {
        let mut count = 0;
        for item in enumerate_array_items(bytes).unwrap() {
            let item = item.unwrap();
            count += enumerate_object_properties(item).unwrap().count();
        }
        black_box(count);
    })
}

fn bench_dictionary_lookup(bench: &mut Bencher) {
    let strings: Vec<String> = (0..1000).map(|i| format!("field_name_{}", i)).collect();
    let dict = StringDictionary::from_strings(&strings).unwrap();
    bench.iter(|| {
        for s in &strings {
            black_box(dict.try_get_index(s));
        }
    })
}

fn bench_encode_json(bench: &mut Bencher) {
    let json = create_document();
    bench.iter(|| {
        black_box(BinaryJsonBuf::try_from(&json).unwrap());
    })
}

fn bench_encode_json_with_dictionary(bench: &mut Bencher) {
    let json = create_document();
    let mut dict = StringDictionary::new();
    bench.iter(|| {
        let mut writer = Writer::with_dictionary(WriterOptions::default(), &mut dict).unwrap();
        writer.write_json(&json).unwrap();
        black_box(writer.finish().unwrap());
    })
}

fn bench_decode_json(bench: &mut Bencher) {
    let value = BinaryJsonBuf::try_from(&create_document()).unwrap();
    bench.iter(|| {
        black_box(value.to_json(None).unwrap());
    })
}

benchmark_group!(
    jsonbin_benches,
    bench_value_length,
    bench_single_item_length,
    bench_enumerate_array,
    bench_dictionary_lookup,
    bench_encode_json,
    bench_encode_json_with_dictionary,
    bench_decode_json,
);
benchmark_main!(jsonbin_benches);
