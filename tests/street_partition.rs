use assert_approx_eq::assert_approx_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use city_streets::bsp::{Rectangle, SplitOrientation, StreetPartition};
use city_streets::city::{CityConfig, CityLayout};

const TOLERANCE: f64 = 1e-9;

fn assert_tiles(partition: &StreetPartition) {
    let footprint = partition.footprint();
    let blocks = partition.blocks();
    let total: f64 = blocks.iter().map(Rectangle::area).sum();
    assert!(
        (total - footprint.area()).abs() <= footprint.area() * 1e-9,
        "blocks cover {total}, footprint is {}",
        footprint.area()
    );
    for block in &blocks {
        assert!(block.min.x >= footprint.min.x - TOLERANCE && block.max.x <= footprint.max.x + TOLERANCE);
        assert!(block.min.z >= footprint.min.z - TOLERANCE && block.max.z <= footprint.max.z + TOLERANCE);
        assert!(block.width() > 0.0 && block.depth() > 0.0);
    }
    if blocks.len() <= 500 {
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                assert!(a.overlap_area(b) <= TOLERANCE, "{a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn test_blocks_tile_the_footprint() {
    let cases = [
        (100.0, 80.0, 28.0, 13.0),
        (200.0, 200.0, 38.0, 13.0),
        (50.0, 190.0, 30.0, 10.0),
        (137.5, 61.25, 21.0, 6.5),
    ];
    for (width, depth, max, min) in cases {
        for seed in 0..25 {
            let partition =
                StreetPartition::build_seeded(Rectangle::centered(width, depth), max, min, seed).unwrap();
            assert_tiles(&partition);
        }
    }
}

#[test]
fn test_blocks_respect_max_side() {
    for seed in 0..50 {
        let partition =
            StreetPartition::build_seeded(Rectangle::centered(200.0, 150.0), 28.0, 13.0, seed).unwrap();
        for block in partition.blocks() {
            assert!(block.width() <= 28.0 + TOLERANCE, "width {}", block.width());
            assert!(block.depth() <= 28.0 + TOLERANCE, "depth {}", block.depth());
        }
    }
}

#[test]
fn test_footprint_below_max_on_one_axis_is_never_cut_there() {
    let partition =
        StreetPartition::build_seeded(Rectangle::centered(300.0, 20.0), 25.0, 8.0, 4).unwrap();
    for block in partition.blocks() {
        assert_approx_eq!(block.depth(), 20.0);
        assert!(block.width() <= 25.0 + TOLERANCE);
    }
}

#[test]
fn test_streets_keep_minimum_margin() {
    for seed in 0..50 {
        let partition =
            StreetPartition::build_seeded(Rectangle::centered(160.0, 120.0), 30.0, 12.0, seed).unwrap();
        for (bounds, node) in partition.splits() {
            let (start, end) = bounds.range(node.orientation);
            assert!(node.coordinate - start >= 12.0 - TOLERANCE);
            assert!(end - node.coordinate >= 12.0 - TOLERANCE);
            assert!(bounds.extent(node.orientation) > 30.0);
        }
    }
}

#[test]
fn test_large_footprint_terminates() {
    // 10 000 x min_side along x.
    let partition =
        StreetPartition::build_seeded(Rectangle::centered(10_000.0, 100.0), 50.0, 1.0, 8).unwrap();
    assert_eq!(partition.blocks().len(), partition.len() + 1);
    assert_tiles(&partition);

    // Many narrow blocks in a single row.
    let partition =
        StreetPartition::build_seeded(Rectangle::centered(10_000.0, 1.0), 2.0, 0.5, 8).unwrap();
    assert!(partition.len() > 1000);
    assert!(partition.depth() < partition.len());
    assert_tiles(&partition);
}

#[test]
fn test_same_seed_same_tree() {
    let footprint = Rectangle::centered(120.0, 90.0);
    let a = StreetPartition::build_seeded(footprint, 28.0, 13.0, 1234).unwrap();
    let b = StreetPartition::build_seeded(footprint, 28.0, 13.0, 1234).unwrap();
    assert_eq!(a.nodes(), b.nodes());
    assert_eq!(a.blocks(), b.blocks());
    assert_eq!(a.street_segments(), b.street_segments());

    let mut rng = StdRng::seed_from_u64(1234);
    let c = StreetPartition::build(footprint, 28.0, 13.0, &mut rng).unwrap();
    assert_eq!(a.nodes(), c.nodes());
}

#[test]
fn test_degenerate_city_is_one_block() {
    let footprint = Rectangle::centered(60.0, 60.0);
    let partition = StreetPartition::build_seeded(footprint, 1000.0, 5.0, 42).unwrap();
    assert_eq!(partition.blocks(), vec![footprint]);
    assert!(partition.street_segments().is_empty());
}

#[test]
fn test_footprint_narrower_than_margins_is_one_block() {
    let footprint = Rectangle::centered(20.0, 20.0);
    let partition = StreetPartition::build_seeded(footprint, 10.0, 11.0, 42);
    assert!(partition.is_err());

    let partition = StreetPartition::build_seeded(footprint, 15.0, 11.0, 42).unwrap();
    assert_eq!(partition.blocks(), vec![footprint]);
}

#[test]
fn test_concrete_city() {
    let footprint = Rectangle::centered(100.0, 80.0);
    assert_eq!(footprint, Rectangle::from_bounds(-50.0, -40.0, 50.0, 40.0));
    for seed in [7, 99, 2024] {
        let partition = StreetPartition::build_seeded(footprint, 28.0, 13.0, seed).unwrap();
        let root = partition.root().expect("100x80 must be split");
        let (start, end) = footprint.range(root.orientation);
        assert!(root.coordinate > start + 13.0 && root.coordinate < end - 13.0);

        let blocks = partition.blocks();
        assert!(blocks.len() >= 2);
        for block in &blocks {
            assert!(block.width() <= 28.0 + TOLERANCE);
            assert!(block.depth() <= 28.0 + TOLERANCE);
        }
        assert_tiles(&partition);
    }
}

#[test]
fn test_segments_span_their_rectangle() {
    let partition =
        StreetPartition::build_seeded(Rectangle::centered(150.0, 150.0), 28.0, 13.0, 31).unwrap();
    let segments = partition.street_segments();
    for ((bounds, node), segment) in partition.splits().into_iter().zip(&segments) {
        assert_eq!(segment.orientation, node.orientation);
        match segment.orientation {
            SplitOrientation::Horizontal => {
                assert_eq!(segment.start.x, bounds.min.x);
                assert_eq!(segment.end.x, bounds.max.x);
                assert_eq!(segment.start.z, node.coordinate);
            }
            SplitOrientation::Vertical => {
                assert_eq!(segment.start.z, bounds.min.z);
                assert_eq!(segment.end.z, bounds.max.z);
                assert_eq!(segment.start.x, node.coordinate);
            }
        }
    }
}

#[test]
fn test_both_axes_get_split() {
    // Across many seeds a square city should see both street directions.
    let mut horizontal = 0;
    let mut vertical = 0;
    for seed in 0..30 {
        let partition =
            StreetPartition::build_seeded(Rectangle::centered(200.0, 200.0), 28.0, 13.0, seed).unwrap();
        for segment in partition.street_segments() {
            match segment.orientation {
                SplitOrientation::Horizontal => horizontal += 1,
                SplitOrientation::Vertical => vertical += 1,
            }
        }
    }
    assert!(horizontal > 0 && vertical > 0);
}

/// Share of 2000 seeded builds whose first street is vertical.
fn vertical_root_share(width: f64, depth: f64) -> f64 {
    let footprint = Rectangle::centered(width, depth);
    let runs = 2000;
    let vertical = (0..runs)
        .filter(|&seed| {
            let partition = StreetPartition::build_seeded(footprint, 28.0, 13.0, seed).unwrap();
            partition.root().unwrap().orientation == SplitOrientation::Vertical
        })
        .count();
    vertical as f64 / runs as f64
}

#[test]
fn test_wide_city_is_mostly_cut_across_its_width() {
    let share = vertical_root_share(200.0, 100.0);
    assert!((0.75..=0.85).contains(&share), "vertical share {share}");
}

#[test]
fn test_deep_city_is_mostly_cut_across_its_depth() {
    let share = vertical_root_share(100.0, 200.0);
    assert!((0.15..=0.25).contains(&share), "vertical share {share}");
}

#[test]
fn test_square_city_breaks_ties_toward_width() {
    let share = vertical_root_share(150.0, 150.0);
    assert!((0.75..=0.85).contains(&share), "vertical share {share}");
}

#[test]
fn test_narrow_footprint_stays_one_block() {
    let footprint = Rectangle::from_bounds(0.0, 0.0, 100.0, 24.0);
    for seed in 0..10 {
        let partition = StreetPartition::build_seeded(footprint, 20.0, 13.0, seed).unwrap();
        assert_eq!(partition.blocks(), vec![footprint]);
        assert!(partition.street_segments().is_empty());
    }
}

#[test]
fn test_traffic_lights_stay_off_the_city_edge() {
    for seed in 0..10 {
        let config = CityConfig {
            width: 160.0,
            depth: 140.0,
            seed: Some(seed),
            ..Default::default()
        };
        let layout = CityLayout::generate(&config).unwrap();
        for light in &layout.traffic_lights {
            let on_own_axis_edge = match light.orientation {
                SplitOrientation::Horizontal => {
                    light.position.x == layout.footprint.min.x || light.position.x == layout.footprint.max.x
                }
                SplitOrientation::Vertical => {
                    light.position.z == layout.footprint.min.z || light.position.z == layout.footprint.max.z
                }
            };
            assert!(!on_own_axis_edge, "{light:?}");
        }
    }
}

#[test]
fn test_block_plans_follow_partition() {
    let config = CityConfig {
        seed: Some(5),
        ..Default::default()
    };
    let layout = CityLayout::generate(&config).unwrap();
    let partition = StreetPartition::build_seeded(
        config.footprint(),
        config.partition_limits().unwrap().max_side,
        config.partition_limits().unwrap().min_side,
        5,
    )
    .unwrap();
    let blocks = partition.blocks();
    assert_eq!(layout.blocks.len(), blocks.len());
    for (plan, block) in layout.blocks.iter().zip(&blocks) {
        assert_eq!(plan.bounds, *block);
        assert_approx_eq!(plan.width, block.width() - 4.0);
        assert_approx_eq!(plan.depth, block.depth() - 4.0);
    }
}
