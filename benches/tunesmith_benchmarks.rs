//! # Tunesmith Performance Benchmarks
//!
//! Benchmarks for the filesystem-bound parts of a conversion run. Encoding
//! itself is an external process and is not measured here.
//!
//! ## Benchmark Categories
//!
//! - **Scanning**: Recursive discovery over a synthetic library tree
//! - **Planning**: Turning scan results into a job batch
//! - **Path Resolution**: Destination path computation per file
//! - **Filenames**: Tag-derived filename sanitizing
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench scanning
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tunesmith::format::AudioFormat;
use tunesmith::job::{BatchOptions, JobBatch};
use tunesmith::{paths, scanner, tags};

/// Build `artists × albums × tracks` FLAC files plus one cover image per album.
fn create_library(artists: usize, albums: usize, tracks: usize) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for a in 0..artists {
        for b in 0..albums {
            let album_dir = temp_dir.path().join(format!("Artist {a}/Album {b}"));
            fs::create_dir_all(&album_dir).expect("Failed to create album directory");
            fs::write(album_dir.join("cover.jpg"), b"jpg").expect("Failed to write cover");
            for t in 0..tracks {
                fs::write(album_dir.join(format!("{t:02} Track.flac")), b"fLaC")
                    .expect("Failed to write track");
            }
        }
    }

    temp_dir
}

fn bench_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");

    for &(artists, albums) in &[(5, 2), (20, 5)] {
        let library = create_library(artists, albums, 10);
        let files = artists * albums * 10;
        group.bench_with_input(BenchmarkId::from_parameter(files), &library, |b, library| {
            b.iter(|| scanner::scan(black_box(library.path()), AudioFormat::Flac).unwrap());
        });
    }

    group.finish();
}

fn bench_planning(c: &mut Criterion) {
    let library = create_library(10, 5, 10);
    let files = scanner::scan(library.path(), AudioFormat::Flac).unwrap();
    let options = BatchOptions {
        output_root: Some(PathBuf::from("/tmp/tunesmith-bench-out")),
        ..BatchOptions::default()
    };

    c.bench_function("planning/500_files", |b| {
        b.iter(|| JobBatch::from_files(black_box(&files), library.path(), &options));
    });
}

fn bench_path_resolution(c: &mut Criterion) {
    let source = Path::new("/music/lossless/Artist/Album (Deluxe)/07. Song.v2.flac");
    let root = Path::new("/music/lossless");
    let out = Path::new("/music/mp3");

    c.bench_function("paths/alongside", |b| {
        b.iter(|| paths::destination_path(black_box(source), root, None, AudioFormat::Mp3));
    });
    c.bench_function("paths/rerooted", |b| {
        b.iter(|| paths::destination_path(black_box(source), root, Some(out), AudioFormat::Mp3));
    });
}

fn bench_filenames(c: &mut Criterion) {
    c.bench_function("filenames/sanitize", |b| {
        b.iter(|| tags::sanitize_filename(black_box("AC/DC: Live at \"River Plate\"? - Remastered*.mp3")));
    });
}

criterion_group!(
    benches,
    bench_scanning,
    bench_planning,
    bench_path_resolution,
    bench_filenames
);
criterion_main!(benches);
