use comment_reflow::{
    ReflowConfig, ReflowEngine, RopeBuffer, TextCursor, Token, WrapOptions, tokenize, wrap,
};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn long_comment(line_count: usize) -> Vec<String> {
    (0..line_count)
        .map(|i| {
            format!(
                "    # {i:05} the quick brown fox jumps over the lazy dog. Then it naps: briefly, \
                 in the warm afternoon sun"
            )
        })
        .collect()
}

fn bench_wrap_paragraph(c: &mut Criterion) {
    let paragraph: Vec<Vec<Token>> = long_comment(1_000)
        .iter()
        .map(|line| tokenize(line.trim_start_matches([' ', '#'])))
        .collect();
    let options = WrapOptions::new(72)
        .with_prefix_width(5)
        .with_cursor(Some(TextCursor::new(0, 10)));
    c.bench_function("wrap/1k_lines", |b| {
        b.iter(|| black_box(wrap(black_box(&paragraph), &options)))
    });
}

fn bench_reflow_whole_block(c: &mut Criterion) {
    let lines = long_comment(1_000);
    let engine = ReflowEngine::new(ReflowConfig::default()).unwrap();
    c.bench_function("reflow_whole_block/1k_lines", |b| {
        b.iter_batched(
            || RopeBuffer::from_lines(&lines, "python").with_cursor(500, 20),
            |mut buffer| black_box(engine.reflow_whole_block(&mut buffer)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_reflow_stable_block(c: &mut Criterion) {
    let engine = ReflowEngine::new(ReflowConfig::default()).unwrap();
    let mut wrapped = RopeBuffer::from_lines(&long_comment(1_000), "python");
    engine.reflow_whole_block(&mut wrapped);
    let lines = wrapped.lines();
    c.bench_function("reflow_whole_block/stable_1k_lines", |b| {
        b.iter_batched(
            || RopeBuffer::from_lines(&lines, "python").with_cursor(2, 10),
            |mut buffer| black_box(engine.reflow_whole_block(&mut buffer)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_wrap_paragraph,
    bench_reflow_whole_block,
    bench_reflow_stable_block
);
criterion_main!(benches);
