use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use engine::tokenizer::tokenize;
use std::hint::black_box;

// Mixed punctuation, digits, fullwidth and ligature forms NFKC folds, and combining marks.
const SNIPPETS: &[&str] = &[
    "Re: [sci.space] Shuttle launch delayed -- again?! (STS-51L, 1986)",
    "ＦＵＬＬＷＩＤＴＨ ｔｅｘｔ and the ﬁnal ﬂight plan, v2.0.1",
    "e-mail: someone@example.com; ph. 555-0199 #42",
    "cafe\u{301} naïve résumé — coöperate",
    "हिन्दी भाषा, नदी; 日本語のテキスト 123",
];

fn mixed_document(lines: usize) -> String {
    (0..lines).map(|i| SNIPPETS[i % SNIPPETS.len()]).collect::<Vec<_>>().join("\n")
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for lines in [10, 1_000] {
        let text = mixed_document(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("mixed_{lines}_lines"), |b| b.iter(|| tokenize(black_box(&text))));
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
