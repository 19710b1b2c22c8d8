use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use akikan_core::phonetic::RomSliceList;
use akikan_core::romaji::RomanizationTable;

const PHRASES: &[&str] = &[
    "すし",
    "きょうはいいてんきですね",
    "ちゅうしゃじょうのまっちゃ",
    "しんかんせんでとうきょうへいく",
];

fn bench_build(c: &mut Criterion) {
    let table = RomanizationTable::default();
    let mut group = c.benchmark_group("build");
    for phrase in PHRASES {
        group.bench_with_input(BenchmarkId::from_parameter(phrase), phrase, |b, phrase| {
            b.iter(|| RomSliceList::build(&table, phrase))
        });
    }
    group.finish();
}

/// Type the phrase with alternate spellings so every unit gets rewritten.
fn bench_alternate_typing(c: &mut Criterion) {
    let table = RomanizationTable::default();
    c.bench_function("type_alternates", |b| {
        b.iter(|| {
            let mut list = RomSliceList::build(&table, "しゃしんをとる").unwrap();
            let mut cursor = 0;
            for key in "sixyasinwotoru".chars() {
                if list.accept(&table, cursor, key).is_some() {
                    cursor += 1;
                }
            }
            cursor
        })
    });
}

criterion_group!(benches, bench_build, bench_alternate_typing);
criterion_main!(benches);
