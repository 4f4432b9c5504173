use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use medlist::listing::{build_list, filter_records, PageSize, Paginator};
use medlist::records::{Lab, Medication};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

const LAB_WORDS: [&str; 6] = ["Alpha", "Central", "Nile", "Delta", "Cairo", "Horizon"];
const DRUGS: [&str; 6] = [
    "Amoxicillin",
    "Paracetamol",
    "Ibuprofen",
    "Metformin",
    "Omeprazole",
    "Atorvastatin",
];

fn generate_labs(count: usize, seed: u64) -> Vec<Lab> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let word = LAB_WORDS[rng.gen_range(0..LAB_WORDS.len())];
            Lab {
                id: format!("lab-{i}"),
                name: format!("{word} Lab {i}"),
                contact: rng
                    .gen_bool(0.7)
                    .then(|| format!("+20 1{:09}", rng.gen_range(0..1_000_000_000u64))),
                address: rng.gen_bool(0.5).then(|| format!("Street {}", i % 300)),
                created_at: base + chrono::Duration::minutes(i as i64),
            }
        })
        .collect()
}

fn generate_medications(count: usize, seed: u64) -> Vec<Medication> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| Medication {
            id: format!("med-{i}"),
            name: format!("{} {}mg", DRUGS[rng.gen_range(0..DRUGS.len())], 50 * (i % 10 + 1)),
            instructions: rng.gen_bool(0.6).then(|| "after meals".to_string()),
            created_at: base + chrono::Duration::minutes(i as i64),
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(2));

    for &count in &[100usize, 1_000, 10_000] {
        let labs = generate_labs(count, 42);
        let meds = generate_medications(count, 43);

        group.bench_with_input(BenchmarkId::new("labs_by_name", count), &labs, |b, labs| {
            b.iter(|| black_box(filter_records(labs, black_box("nile")).len()));
        });

        group.bench_with_input(BenchmarkId::new("labs_by_contact", count), &labs, |b, labs| {
            b.iter(|| black_box(filter_records(labs, black_box("+20 15")).len()));
        });

        group.bench_with_input(
            BenchmarkId::new("medications_by_instructions", count),
            &meds,
            |b, meds| {
                b.iter(|| black_box(filter_records(meds, black_box("MEALS")).len()));
            },
        );
    }

    group.finish();
}

fn bench_page_render_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_model");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(2));

    let labs = generate_labs(10_000, 44);
    for size in PageSize::ALL {
        group.bench_with_input(
            BenchmarkId::new("random_page", size.get()),
            &size,
            |b, &size| {
                let mut rng = ChaCha8Rng::seed_from_u64(45);
                b.iter(|| {
                    let mut paginator = Paginator::new(size);
                    let hops = rng.gen_range(0..50);
                    for _ in 0..hops {
                        paginator.next(labs.len());
                    }
                    black_box(build_list(&labs, "lab", false, &paginator).is_table())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_page_render_model);
criterion_main!(benches);
