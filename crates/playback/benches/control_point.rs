//! Criterion benchmarks for control point dispatch.
//!
//! Run: cargo bench -p playback --bench control_point
//!
//! Results show:
//!   transport_cycle   - play, fast forward, pause, stop on one track
//!   track_walk        - next track through a whole group and back to first
//!   group_walk        - next group through every sibling, then first group
//!   search_validate   - parse a full-length search

#![allow(
    clippy::expect_used,
    clippy::arithmetic_side_effects,
    missing_docs, // criterion_group! macro generates undocumented items
)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use platform::CcidAllocator;
use playback::{search, Command, MediaPlayer, Mpl, NullSink, Opcode};

fn player() -> Mpl {
    Mpl::builtin(&mut CcidAllocator::new()).expect("builtin catalog")
}

fn bench_transport(c: &mut Criterion) {
    let mut mpl = player();
    let cycle = [
        Command::new(Opcode::Play),
        Command::new(Opcode::FastForward),
        Command::new(Opcode::FastForward),
        Command::new(Opcode::Pause),
        Command::with_param(Opcode::MoveRelative, 1500),
        Command::new(Opcode::Stop),
    ];
    c.bench_function("transport_cycle", |b| {
        b.iter(|| {
            for cmd in cycle {
                mpl.send_command(black_box(cmd), &mut NullSink);
            }
        });
    });
}

fn bench_tracks(c: &mut Criterion) {
    let mut mpl = player();
    c.bench_function("track_walk", |b| {
        b.iter(|| {
            for _ in 0..5 {
                mpl.send_command(Command::new(Opcode::NextTrack), &mut NullSink);
            }
            mpl.send_command(Command::new(Opcode::FirstTrack), &mut NullSink);
        });
    });
}

fn bench_groups(c: &mut Criterion) {
    let mut mpl = player();
    c.bench_function("group_walk", |b| {
        b.iter(|| {
            for _ in 0..4 {
                mpl.send_command(Command::new(Opcode::NextGroup), &mut NullSink);
            }
            mpl.send_command(Command::with_param(Opcode::GotoGroup, 1), &mut NullSink);
        });
    });
}

fn bench_search(c: &mut Criterion) {
    // 21 items of "len 2, track name, one octet" plus one type-only item.
    let mut query = Vec::new();
    for i in 0..21u8 {
        query.extend_from_slice(&[2, 1, b'a' + i]);
    }
    query.extend_from_slice(&[1, 8]);
    c.bench_function("search_validate", |b| {
        b.iter(|| search::validate(black_box(&query)));
    });
}

criterion_group!(benches, bench_transport, bench_tracks, bench_groups, bench_search);
criterion_main!(benches);
