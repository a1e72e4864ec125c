//! Benchmarks for highlighted markdown rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sheen_highlight::CodeBlockRenderer;
use sheen_renderer::markdown_to_html;

/// Generate a document alternating prose sections and fenced code blocks.
fn generate_code_document(blocks: usize) -> String {
    let languages = [
        ("rust", "fn add(a: u32, b: u32) -> u32 {\n    a + b\n}\n"),
        ("python", "def add(a, b):\n    return a + b\n"),
        ("javascript", "function add(a, b) {\n    return a + b;\n}\n"),
    ];

    let mut md = String::with_capacity(blocks * 200);
    md.push_str("# Code Samples\n\n");
    for i in 0..blocks {
        let (lang, body) = languages[i % languages.len()];
        md.push_str(&format!("Paragraph {i} introducing the next sample.\n\n"));
        md.push_str(&format!("```{lang}\n{body}```\n\n"));
    }
    md
}

fn bench_single_block(c: &mut Criterion) {
    let renderer = CodeBlockRenderer::new();
    let markdown = "```rust\nfn main() {\n    println!(\"Hello, world!\");\n}\n```";

    c.bench_function("highlight_single_rust_block", |b| {
        b.iter(|| markdown_to_html(markdown, &renderer));
    });
}

fn bench_mixed_languages(c: &mut Criterion) {
    let renderer = CodeBlockRenderer::new();
    let markdown = r#"# Code Examples

## Rust

```rust
fn main() {
    println!("Hello, world!");
    let x = 42;
    for i in 0..10 {
        println!("{}", i * x);
    }
}
```

## Python

```python
def greet(name):
    return f"Hello, {name}!"

if __name__ == "__main__":
    print(greet("World"))
```

## JavaScript

```javascript
function fibonacci(n) {
    if (n <= 1) return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

console.log(fibonacci(10));
```
"#;

    c.bench_function("highlight_mixed_languages", |b| {
        b.iter(|| markdown_to_html(markdown, &renderer));
    });
}

fn bench_prose_passthrough(c: &mut Criterion) {
    let renderer = CodeBlockRenderer::new();
    let markdown = "# Title\n\nProse with **bold**, *italic* and a [link](https://example.com).\n\n\
                    > A quote\n\n- one\n- two\n- three\n";

    c.bench_function("passthrough_prose_only", |b| {
        b.iter(|| markdown_to_html(markdown, &renderer));
    });
}

fn bench_inline_vs_classed(c: &mut Criterion) {
    let markdown = generate_code_document(10);
    let inline = CodeBlockRenderer::new();
    let classed = CodeBlockRenderer::builder().css_classes(true).build();

    let mut group = c.benchmark_group("output_mode");

    group.bench_function("inline_styles", |b| {
        b.iter(|| markdown_to_html(&markdown, &inline));
    });
    group.bench_function("css_classes", |b| {
        b.iter(|| markdown_to_html(&markdown, &classed));
    });

    group.finish();
}

fn bench_varying_block_counts(c: &mut Criterion) {
    let renderer = CodeBlockRenderer::new();

    let mut group = c.benchmark_group("highlight_by_size");

    for blocks in [5, 20, 50] {
        let markdown = generate_code_document(blocks);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("blocks", blocks),
            &markdown,
            |b, markdown| b.iter(|| markdown_to_html(markdown, &renderer)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_block,
    bench_mixed_languages,
    bench_prose_passthrough,
    bench_inline_vs_classed,
    bench_varying_block_counts,
);

criterion_main!(benches);
