use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazechase::cells::GridCoordinate;
use mazechase::geometry::Point;
use mazechase::grid::Maze;
use mazechase::grid_layout::GridLayout;
use mazechase::path_tracker::PathTracker;
use mazechase::pathing;
use mazechase::units::{ColumnsCount, Height, RowsCount, Width};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn large_maze(loop_percent: u8) -> Maze {
    let layout = GridLayout::configure(Width(3600), Height(3600), RowsCount(350), ColumnsCount(350))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    Maze::generate(layout, GridCoordinate::new(0, 0), loop_percent, &mut rng).unwrap()
}

fn bench_find_path_perfect(c: &mut Criterion) {
    c.bench_function("find_path_perfect", |b| {
        let maze = large_maze(0);
        let start = GridCoordinate::new(250, 250);
        let goal = GridCoordinate::new(0, 0);
        b.iter(|| pathing::find_path(&maze, start, goal))
    });
}

fn bench_find_path_braided(c: &mut Criterion) {
    c.bench_function("find_path_braided", |b| {
        let maze = large_maze(20);
        let start = GridCoordinate::new(250, 250);
        let goal = GridCoordinate::new(0, 0);
        b.iter(|| pathing::find_path(&maze, start, goal))
    });
}

fn bench_tracker_recompute(c: &mut Criterion) {
    c.bench_function("tracker_recompute", |b| {
        let maze = large_maze(20);
        let agent = GridCoordinate::new(0, 0);
        let targets = [GridCoordinate::new(349, 349), GridCoordinate::new(0, 349)];
        let mut tracker = PathTracker::new(0);
        let mut toggle = 0;
        b.iter(|| {
            toggle ^= 1;
            tracker.update(&maze, agent, targets[toggle], Point::new(-1, -1))
        })
    });
}

criterion_group!(
    benches,
    bench_find_path_perfect,
    bench_find_path_braided,
    bench_tracker_recompute
);
criterion_main!(benches);
