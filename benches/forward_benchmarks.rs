use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use phone_forward::script::Interpreter;
use phone_forward::ForwardTrie;

/// Deterministic rules resembling a national numbering plan
fn generate_rules(size: usize) -> Vec<(String, String)> {
    let mut rules = Vec::with_capacity(size);
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

    for i in 0..size {
        // xorshift keeps the benchmark reproducible without a rand dependency
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let key = format!("{}{}", i % 10, seed % 1_000_000);
        let target = format!("48{}", (seed >> 20) % 10_000);
        if key != target {
            rules.push((key, target));
        }
    }
    rules
}

fn build(rules: &[(String, String)]) -> ForwardTrie {
    let mut trie = ForwardTrie::new();
    for (key, target) in rules {
        let _ = trie.add(key, target);
    }
    trie
}

fn queries(rules: &[(String, String)]) -> Vec<String> {
    rules
        .iter()
        .take(100)
        .map(|(key, _)| format!("{}123", key))
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_add");

    for size in [100, 1000, 10_000].iter() {
        let rules = generate_rules(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(build(&rules)));
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_get");

    for size in [100, 1000, 10_000].iter() {
        let rules = generate_rules(*size);
        let trie = build(&rules);
        let numbers = queries(&rules);

        group.throughput(Throughput::Elements(numbers.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                for number in &numbers {
                    black_box(trie.get(black_box(number)));
                }
            });
        });
    }

    group.finish();
}

/// Reverse lookup scans every rule, so cost grows with the trie
fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_reverse");

    for size in [100, 1000, 10_000].iter() {
        let rules = generate_rules(*size);
        let trie = build(&rules);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(trie.reverse(black_box("4812345678"))));
        });
    }

    group.finish();
}

fn bench_non_trivial_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_non_trivial_count");

    for size in [100, 1000, 10_000].iter() {
        let rules = generate_rules(*size);
        let trie = build(&rules);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(trie.non_trivial_count(black_box("0123456789"), 12)));
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let rules = generate_rules(10_000);

    c.bench_function("forward_remove_subtrees", |b| {
        b.iter_batched(
            || build(&rules),
            |mut trie| {
                for digit in ["1", "3", "5", "7", "9"] {
                    trie.remove(digit);
                }
                trie
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_script(c: &mut Criterion) {
    let rules = generate_rules(1000);
    let mut source = String::from("NEW bench\n");
    for (key, target) in &rules {
        source.push_str(&format!("{} > {}\n", key, target));
    }
    for number in queries(&rules) {
        source.push_str(&format!("{} ?\n", number));
    }

    c.bench_function("script_interpreter_1000_rules", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            let mut interpreter = Interpreter::new();
            let _ = interpreter.run(black_box(source.as_bytes()), &mut out);
            black_box(out)
        });
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_get,
    bench_reverse,
    bench_non_trivial_count,
    bench_remove,
    bench_script
);
criterion_main!(benches);
