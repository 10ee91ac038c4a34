//! Scanner throughput benchmarks.
//! Run with: `cargo bench --package fspl-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fspl_lex::Lexer;
use fspl_util::Handler;

fn token_count(source: &str) -> usize {
    let handler = Handler::new();
    Lexer::from_source(source, &handler).count()
}

fn bench_lexer_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let small = "program P is integer X; begin X := 3 + 4 * 2; end program.";
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("small_program", |b| b.iter(|| token_count(black_box(small))));

    let larger = r#"
        program P is
            integer A[0:9];
            integer I;
            procedure SUMINTO (integer X[0:9] in, integer N in, integer RESULT out)
            is
                integer J;
            begin
                RESULT := 0;
                for (J := 0; J < N)
                    RESULT := RESULT + X[J];
                end for;
            end procedure;
        begin
            for (I := 0; I < 10)
                A[I] := I * I;
            end for;
        end program.
    "#;
    group.throughput(Throughput::Bytes(larger.len() as u64));
    group.bench_function("procedure_with_array", |b| b.iter(|| token_count(black_box(larger))));

    group.finish();
}

fn bench_lexer_comments(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_comments");

    let line_comment = "// a comment that runs to end of line\nintegerX";
    group.bench_function("line_comment", |b| b.iter(|| token_count(black_box(line_comment))));

    let nested_block = "/* outer /* middle /* inner */ middle */ outer */ integerX";
    group.bench_function("nested_block_comment", |b| {
        b.iter(|| token_count(black_box(nested_block)))
    });

    group.finish();
}

fn bench_lexer_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_literals");

    group.bench_function("integer", |b| b.iter(|| token_count(black_box("123456"))));
    group.bench_function("float", |b| b.iter(|| token_count(black_box("3.14159"))));
    group.bench_function("string", |b| {
        b.iter(|| token_count(black_box(r#""a longer string literal for benchmarking""#)))
    });

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("short_ident", |b| b.iter(|| token_count(black_box("X"))));
    group.bench_function("long_ident", |b| {
        b.iter(|| token_count(black_box("SOME_VERY_LONG_VARIABLE_NAME")))
    });
    group.bench_function("many_idents", |b| {
        b.iter(|| token_count(black_box("A B C D E F G H I J K L M N O P")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_program,
    bench_lexer_comments,
    bench_lexer_literals,
    bench_lexer_identifiers
);
criterion_main!(benches);
