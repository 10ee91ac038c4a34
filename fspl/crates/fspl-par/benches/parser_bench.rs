//! Parser/emitter throughput benchmarks.
//! Run with: `cargo bench --package fspl-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fspl_par::Parser;
use fspl_util::Handler;
use inkwell::context::Context;

fn compile(source: &str) -> String {
    let handler = Handler::new();
    let context = Context::create();
    Parser::new(source, &handler, &context).compile()
}

fn bench_parser_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let small = "program P is integer X; begin X := 3 + 4 * 2; end program.";
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("small_program", |b| b.iter(|| compile(black_box(small))));

    let procedure_with_array = r#"
        program P is
            integer A[0:9];
            integer I;
            procedure SUMINTO (integer X[0:9] in, integer N in, integer RESULT out)
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
    group.throughput(Throughput::Bytes(procedure_with_array.len() as u64));
    group.bench_function("procedure_with_array", |b| {
        b.iter(|| compile(black_box(procedure_with_array)))
    });

    group.finish();
}

fn bench_parser_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_expressions");

    let arithmetic = "program P is integer X; begin X := 1 + 2 * 3 - 4 / 2 + 5 * 6 - 7; end program.";
    group.bench_function("arithmetic_chain", |b| b.iter(|| compile(black_box(arithmetic))));

    let relational = "program P is bool B; integer X; begin B := X > 1 & X < 10 | X == 5; end program.";
    group.bench_function("relational_and_bitwise", |b| b.iter(|| compile(black_box(relational))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let nested_if = r#"
        program P is
            integer X;
        begin
            if (X > 0) then
                if (X > 10) then
                    X := 1;
                else
                    X := 2;
                end if;
            else
                X := 0;
            end if;
        end program.
    "#;
    group.bench_function("nested_if", |b| b.iter(|| compile(black_box(nested_if))));

    let loop_body = r#"
        program P is
            integer I;
            integer TOTAL;
        begin
            TOTAL := 0;
            for (I := 0; I < 100)
                TOTAL := TOTAL + I;
            end for;
        end program.
    "#;
    group.bench_function("counting_loop", |b| b.iter(|| compile(black_box(loop_body))));

    group.finish();
}

fn bench_parser_procedure_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_procedure_calls");

    let builtin_calls = r#"
        program P is
            integer X;
        begin
            X := 1;
            PUTINTEGER(X);
            GETINTEGER(X);
        end program.
    "#;
    group.bench_function("builtin_io_calls", |b| b.iter(|| compile(black_box(builtin_calls))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_program,
    bench_parser_expressions,
    bench_parser_control_flow,
    bench_parser_procedure_calls
);
criterion_main!(benches);
