//! Benchmarks for redwire codec operations

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use redwire::protocol::{decode_reply, encode_command, Arg, ReadBuffer};

fn encode_benchmark(c: &mut Criterion) {
    c.bench_function("encode_set", |b| {
        b.iter(|| {
            encode_command(vec![
                Arg::from(black_box("SET")),
                Arg::from(black_box("benchmark:key")),
                Arg::from(black_box("benchmark value payload")),
            ])
            .unwrap()
        })
    });
}

fn decode_benchmark(c: &mut Criterion) {
    // One 100-element array of short bulk strings
    let mut reply = b"*100\r\n".to_vec();
    for i in 0..100 {
        let item = format!("item:{}", i);
        reply.extend_from_slice(format!("${}\r\n{}\r\n", item.len(), item).as_bytes());
    }

    c.bench_function("decode_array_100", |b| {
        b.iter(|| {
            let mut buf = ReadBuffer::new();
            let mut src = Cursor::new(black_box(&reply[..]));
            decode_reply(&mut buf, &mut src).unwrap()
        })
    });
}

criterion_group!(benches, encode_benchmark, decode_benchmark);
criterion_main!(benches);
