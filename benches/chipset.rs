use schip::{
    chip8::{ChipSet, Mode},
    devices::{Headless, Keyboard},
    resources::Rom,
};
use criterion::{criterion_group, criterion_main, Criterion};

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(Rom::maze);

fn get_base() -> Rom {
    BASE_ROM.clone()
}

/// will setup the default configured chip
fn get_default_chip() -> ChipSet<Headless, Headless, Keyboard> {
    ChipSet::new(&get_base(), Mode::SuperChip, Headless, Headless, Keyboard::new())
        .expect("The maze fits into memory.")
}

pub fn advance_bench(c: &mut Criterion) {
    c.bench_function("advance_bench", |b| {
        b.iter_batched(
            get_default_chip,
            |mut chip| {
                // enough to draw the whole maze
                for _ in 0..1_500 {
                    chip.advance().expect("The maze is valid.");
                }
                chip
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, advance_bench, print_bench);
criterion_main!(benches);
