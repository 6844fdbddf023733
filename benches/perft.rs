use criterion::{criterion_group, criterion_main, Criterion};
use okapi::board::Board;
use okapi::perft::perft;

fn perft_bench(c: &mut Criterion) {
    // The positions are taken from the chess programming wiki
    // https://www.chessprogramming.org/Perft_Results
    let mut board = Board::default();
    c.bench_function("perft initial 4", |b| {
        b.iter(|| perft(&mut board, 4).unwrap())
    });
    board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    c.bench_function("perft kiwipete 3", |b| {
        b.iter(|| perft(&mut board, 3).unwrap())
    });
    board = Board::from_fen("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10")
        .unwrap();
    c.bench_function("perft alternative 3", |b| {
        b.iter(|| perft(&mut board, 3).unwrap())
    });
}

criterion_group!(benches, perft_bench);
criterion_main!(benches);
