use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizbank_core::matching::{best_match, fold, DEFAULT_MIN_SCORE};
use quizbank_core::model::InventoryRow;

const NAMES: &[&str] = &[
    "Pare",
    "Ceda el paso",
    "Prohibido girar a la izquierda",
    "Prohibido girar a la derecha",
    "Prohibido adelantar",
    "Prohibido parquear",
    "Velocidad máxima permitida",
    "Zona escolar",
    "Curva peligrosa a la derecha",
    "Curva peligrosa a la izquierda",
    "Vía en construcción",
    "Paso peatonal",
];

fn inventory(copies: usize) -> Vec<InventoryRow> {
    (0..copies)
        .flat_map(|n| {
            NAMES.iter().enumerate().map(move |(i, name)| InventoryRow {
                nombre_visible: format!("{name} {n}"),
                archivo: format!("img/{n}-{i}.png"),
                url: None,
            })
        })
        .collect()
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let small = inventory(1);
    let large = inventory(10);

    group.bench_function("fold", |b| {
        b.iter(|| fold(black_box("Señal: ¿Prohibido GIRAR a la izquierda?")))
    });

    group.bench_function("12_rows", |b| {
        b.iter(|| best_match(black_box("Prohibido girar izquierda"), &small, DEFAULT_MIN_SCORE))
    });

    group.bench_function("120_rows", |b| {
        b.iter(|| best_match(black_box("Prohibido girar izquierda"), &large, DEFAULT_MIN_SCORE))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| best_match(black_box("Semáforo intermitente"), &large, DEFAULT_MIN_SCORE))
    });

    group.finish();
}

criterion_group!(benches, bench_matching);
criterion_main!(benches);
