//! Benchmark decoding of scan status snapshots and library pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scenescape::api::{Movie, Page};
use scenescape::scan::ScanSnapshot;

const SNAPSHOT: &str = r#"{
    "status": "scanning",
    "progress": 42.5,
    "current_file": "/media/movies/The.Matrix.1999.1080p.BluRay.x264.mkv",
    "total_files": 1200,
    "processed_files": 510
}"#;

fn movie_page(count: usize, wrapped: bool) -> String {
    let movies: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "title": format!("Movie {i}"),
                "release_date": "1999-03-31",
                "vote_average": 7.9,
                "genres": ["Action", {"id": 2, "name": "Science Fiction"}]
            })
        })
        .collect();
    let body = if wrapped {
        serde_json::json!({"results": movies, "page": 1, "total_pages": 1, "total_results": count})
    } else {
        serde_json::json!(movies)
    };
    body.to_string()
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    group.bench_function("decode", |b| {
        b.iter(|| serde_json::from_str::<ScanSnapshot>(black_box(SNAPSHOT)).unwrap())
    });

    group.bench_function("decode_into_task", |b| {
        b.iter(|| {
            serde_json::from_str::<ScanSnapshot>(black_box(SNAPSHOT))
                .unwrap()
                .into_task("bench")
                .unwrap()
        })
    });

    group.finish();
}

fn bench_pages(c: &mut Criterion) {
    let bare = movie_page(100, false);
    let wrapped = movie_page(100, true);
    let mut group = c.benchmark_group("movie_page");

    group.bench_function("bare_100", |b| {
        b.iter(|| serde_json::from_str::<Page<Movie>>(black_box(&bare)).unwrap())
    });
    group.bench_function("wrapped_100", |b| {
        b.iter(|| serde_json::from_str::<Page<Movie>>(black_box(&wrapped)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_pages);
criterion_main!(benches);
