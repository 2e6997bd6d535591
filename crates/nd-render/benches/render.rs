//! Benchmarks for state building and composite rendering.

#![allow(clippy::format_push_string, clippy::cast_precision_loss)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nd_render::{Bindings, FieldMap, RenderOptions, Renderer, parse_markup};
use nd_state::StateBuilder;

struct Product {
    id: u64,
    name: String,
    price: f64,
}

/// Generate markup with `groups` tab groups of `items` tabs each.
fn generate_tabs(groups: usize, items: usize) -> String {
    let mut markup = String::with_capacity(groups * items * 80);
    for g in 0..groups {
        markup.push_str("<nd-tabs>");
        for i in 0..items {
            markup.push_str(&format!(
                r#"<nd-tab-item title="Tab {g}.{i}"><p>Panel <strong>{i}</strong></p></nd-tab-item>"#
            ));
        }
        markup.push_str("</nd-tabs>");
    }
    markup
}

fn bench_state_builder(c: &mut Criterion) {
    c.bench_function("state_builder_mixed", |b| {
        b.iter(|| {
            StateBuilder::new()
                .add_boolean_property("open", false)
                .add_string_property("label", "It's \"quoted\"\n")
                .add_property("count", 42)
                .add_toggle_method("open")
                .add_method("close() { this.open = false; }")
                .build()
        });
    });
}

fn bench_render_tabs(c: &mut Criterion) {
    let renderer = Renderer::new(RenderOptions::default()).with_builtins();
    let mut group = c.benchmark_group("render_tabs");

    for (groups, items) in [(1, 3), (10, 5), (50, 10)] {
        let nodes = parse_markup(&generate_tabs(groups, items)).unwrap();
        group.throughput(Throughput::Elements((groups * items) as u64));
        group.bench_with_input(
            BenchmarkId::new("tabs", format!("{groups}g_{items}i")),
            &nodes,
            |b, nodes| b.iter(|| renderer.render(nodes)),
        );
    }

    group.finish();
}

fn bench_render_bound_table(c: &mut Criterion) {
    let renderer = Renderer::new(RenderOptions::default()).with_builtins();
    let fields = FieldMap::new()
        .field("id", |p: &Product| p.id)
        .field("name", |p: &Product| p.name.clone())
        .field("pricing.price", |p: &Product| p.price);
    let products: Vec<_> = (0..500)
        .map(|i| Product {
            id: i,
            name: format!("Product {i}"),
            price: i as f64 * 1.5,
        })
        .collect();
    let bindings = Bindings::new().with_collection("products", &fields, &products);
    let nodes = parse_markup(
        r#"<nd-data-table bind="products"><nd-data-table-column key="id" sortable /><nd-data-table-column key="name" /><nd-data-table-column key="pricing.price" /></nd-data-table>"#,
    )
    .unwrap();

    c.bench_function("render_bound_table_500_rows", |b| {
        b.iter(|| renderer.render_with(&nodes, &bindings));
    });
}

criterion_group!(
    benches,
    bench_state_builder,
    bench_render_tabs,
    bench_render_bound_table
);
criterion_main!(benches);
