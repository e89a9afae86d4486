use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use livemark_engine::masking::compute_masks;
use livemark_engine::{Document, EditorSession, Edit, MarkerKinds, SelectionRange, Span};

mod common;

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    group.sample_size(20);

    let content = common::generate_markdown_content(200);
    let doc = Document::from_text(&content);
    let tree = doc.syntax();
    let caret = [SelectionRange::caret(content.len() / 2)];

    group.bench_function("whole_document_visible", |b| {
        let visible = [Span::new(0, content.len())];
        b.iter(|| {
            let masks = compute_masks(&tree, black_box(&visible), &caret, MarkerKinds::all());
            black_box(masks);
        });
    });

    group.bench_function("one_screen_visible", |b| {
        let start = content.len() / 2;
        let visible = [Span::new(start, start + 2_000)];
        b.iter(|| {
            let masks = compute_masks(&tree, black_box(&visible), &caret, MarkerKinds::all());
            black_box(masks);
        });
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.sample_size(20);

    let content = common::generate_markdown_content(50);

    group.bench_function("move_caret", |b| {
        let mut session = EditorSession::new(Document::from_text(&content));
        let mut offset = 0;
        b.iter(|| {
            offset = (offset + 17) % content.len();
            session.set_selection(vec![SelectionRange::caret(black_box(offset))]);
        });
    });

    group.bench_function("type_and_reparse", |b| {
        b.iter_batched(
            || EditorSession::new(Document::from_text(&content)),
            |mut session| {
                session.apply_edit(Edit::insert(0, "*")).unwrap();
                black_box(session);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_recompute, bench_session);
criterion_main!(benches);
