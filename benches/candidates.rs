use criterion::{black_box, criterion_group, Criterion};
use iptrack::probe::{LocalAddress, PrivateRanges};

criterion_group!(benches_candidates, bench_candidates);

const CANDIDATES: [&str; 4] = [
    "candidate:842163049 1 udp 1677729535 192.168.1.5 54321 typ host generation 0",
    "candidate:1 1 udp 1677729535 203.0.113.5 61000 typ srflx raddr 192.168.1.5 rport 54321",
    "candidate:3 1 tcp 1518280447 10.0.0.7 9 typ host tcptype active",
    "candidate:4 1 udp 2113937151 3c3a1a5e-09d6-4b4e-a0c1-2b7e8a6d1f03.local 50000 typ host",
];

pub fn bench_candidates(c: &mut Criterion) {
    for (name, ranges) in [
        ("LocalAddress::from_candidate/prefix", PrivateRanges::Prefix),
        ("LocalAddress::from_candidate/strict", PrivateRanges::Strict),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                for candidate in CANDIDATES {
                    LocalAddress::from_candidate(black_box(candidate), ranges);
                }
            })
        });
    }
}
