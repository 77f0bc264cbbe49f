//! # Permission Engine Benchmarks
//!
//! Cost of the combinatorial paths:
//!
//! | Path | Driver |
//! |------|--------|
//! | First-match compilation | rules × axis ranges, pairwise subtraction |
//! | Update validation | all-pairs diff of two flattened sets |
//! | Merge | greedy pair scan to a fixed point |

use bc_permissions::{
    compile_first_match, merge_details, validate_universal_permission_update, CompileOptions,
    MergeMode, UsedAxes, DEFAULT_MAX_COMPARISONS,
};
use bc_tests::fixtures::striped_balances_rules;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn options() -> CompileOptions {
    CompileOptions::with_catch_all(UsedAxes::BALANCES_ACTION, 100_000)
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("first-match-compile");
    group.measurement_time(Duration::from_secs(5));

    for rule_count in [4u64, 8, 16, 32] {
        let rules = striped_balances_rules(rule_count, 2);
        group.throughput(Throughput::Elements(rule_count));
        group.bench_with_input(
            BenchmarkId::new("striped_rules", rule_count),
            &rules,
            |b, rules| b.iter(|| black_box(compile_first_match(rules, &options()))),
        );
    }

    group.finish();
}

fn bench_validate_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update-validation");
    group.measurement_time(Duration::from_secs(5));

    for rule_count in [4u64, 8, 16] {
        let rules = striped_balances_rules(rule_count, 2);
        let Ok(flat) = compile_first_match(&rules, &options()) else {
            continue;
        };
        group.throughput(Throughput::Elements(flat.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("identical_revision", rule_count),
            &flat,
            |b, flat| {
                b.iter(|| {
                    black_box(validate_universal_permission_update(
                        flat,
                        flat,
                        DEFAULT_MAX_COMPARISONS,
                    ))
                })
            },
        );
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    group.measurement_time(Duration::from_secs(5));

    for rule_count in [4u64, 8] {
        let rules = striped_balances_rules(rule_count, 2);
        let Ok(flat) = compile_first_match(&rules, &options()) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::new("compiled_stripes", rule_count),
            &flat,
            |b, flat| b.iter(|| black_box(merge_details(flat, MergeMode::RangesOnly))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_validate_update, bench_merge);
criterion_main!(benches);
