// ABOUTME: Criterion benchmarks for prompt composition and the composition cache
// ABOUTME: Measures compose latency per task, fingerprinting, and memory tier lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for prompt composition.
//!
//! Composition runs on every keystroke-debounced preview, so it needs to stay
//! well under a millisecond even with long inputs.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prompt_forge::cache::{fingerprint, MemoryTier};
use prompt_forge::models::{DetailLevel, GenerationOptions, OutputFormat, TaskType, Tone};
use prompt_forge::prompts::{Composer, PromptComposer, DEFAULT_SYSTEM_PROMPT};
use tokio::runtime::Runtime;

/// Input lengths for benchmarking
#[derive(Debug, Clone, Copy)]
enum InputSize {
    Short,
    Paragraph,
    Document,
}

impl InputSize {
    const fn sentences(self) -> usize {
        match self {
            Self::Short => 1,
            Self::Paragraph => 8,
            Self::Document => 200,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Paragraph => "paragraph",
            Self::Document => "document",
        }
    }
}

fn generate_input(size: InputSize) -> String {
    std::iter::repeat("Write a short story about a lighthouse keeper who collects storms.")
        .take(size.sentences())
        .collect::<Vec<_>>()
        .join(" ")
}

fn full_options(task: TaskType) -> GenerationOptions {
    GenerationOptions::for_task(task)
        .with_tone(Tone::Friendly)
        .with_detail(DetailLevel::Detailed)
        .with_format(OutputFormat::Markdown)
        .with_temperature(0.7)
}

/// Benchmark compose for every task type
fn bench_compose_tasks(c: &mut Criterion) {
    let composer = PromptComposer::with_defaults().unwrap();
    let input = generate_input(InputSize::Paragraph);
    let mut group = c.benchmark_group("compose_task");

    for &task in TaskType::ALL {
        let options = full_options(task);
        group.bench_with_input(BenchmarkId::from_parameter(task), &options, |b, options| {
            b.iter(|| {
                composer.compose(
                    black_box(&input),
                    black_box(options),
                    DEFAULT_SYSTEM_PROMPT,
                )
            });
        });
    }

    group.finish();
}

/// Benchmark compose and fingerprint against input length
#[allow(clippy::cast_possible_truncation)]
fn bench_input_sizes(c: &mut Criterion) {
    let composer = PromptComposer::with_defaults().unwrap();
    let options = full_options(TaskType::Writing);
    let mut group = c.benchmark_group("input_size");

    for size in [InputSize::Short, InputSize::Paragraph, InputSize::Document] {
        let input = generate_input(size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("compose", size.name()), &input, |b, input| {
            b.iter(|| composer.compose(black_box(input), &options, DEFAULT_SYSTEM_PROMPT));
        });
        group.bench_with_input(
            BenchmarkId::new("fingerprint", size.name()),
            &input,
            |b, input| b.iter(|| fingerprint(black_box(input), &options)),
        );
    }

    group.finish();
}

/// Benchmark memory tier hits and misses
fn bench_memory_tier(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let composer = PromptComposer::with_defaults().unwrap();
    let options = full_options(TaskType::Writing);
    let tier = MemoryTier::new(1_000);
    let mut group = c.benchmark_group("memory_tier");

    // Pre-populate with 1000 compositions
    rt.block_on(async {
        for i in 0..1_000 {
            let input = format!("write a poem about harbour number {i}");
            let composition = composer.compose(&input, &options, DEFAULT_SYSTEM_PROMPT);
            tier.put(fingerprint(&input, &options), composition).await;
        }
    });
    let keys: Vec<String> = (0..1_000)
        .map(|i| fingerprint(&format!("write a poem about harbour number {i}"), &options))
        .collect();

    group.bench_function("hit", |b| {
        let mut key_index = 0_usize;
        b.iter(|| {
            let key = &keys[key_index % keys.len()];
            key_index = key_index.wrapping_add(1);
            rt.block_on(async { tier.get(black_box(key)).await })
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| rt.block_on(async { tier.get(black_box("absent")).await }));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compose_tasks,
    bench_input_sizes,
    bench_memory_tier
);
criterion_main!(benches);
