//! Measure collapsing a long box-by-box path into waypoints
//!
//! Grid is 101 boxes by 101 boxes, the same serpentine maze as `calc_path_maze`
//!

use bevy_gridbox_pathing_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Create the maze and the raw path through it
fn prepare(size: usize) -> (Grid, Vec<usize>) {
	let mut grid = Grid::new(size, size).unwrap();
	for row in (1..size).step_by(2) {
		let gap = if (row / 2) % 2 == 0 { size - 1 } else { 0 };
		for column in 0..size {
			if column != gap {
				grid.set_obstruction(row * size + column, true).unwrap();
			}
		}
	}
	let path = find_path(&grid, 0, size * size - size).unwrap();
	(grid, path)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let (grid, path) = prepare(101);
	group.bench_function("naturalize_path", |b| {
		b.iter(|| naturalize(black_box(&grid), black_box(&path)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
