#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

//! Inserts random keys into both map engines and plots how their load factor and
//! bucket usage evolve as they grow.

use plotters::prelude::*;
use prime_hashmap::{HashTable, OpenAddressingMap, SeparateChainingMap, default_hash};
use rand::Rng;

const INITIAL_CAPACITY: usize = 11;
const NUM_KEYS: usize = 5_000;
// Record a sample every SAMPLE_EVERY insertions
const SAMPLE_EVERY: usize = 25;

const ENGINES: [&str; 2] = ["Open Addressing", "Separate Chaining"];

/// One measurement taken after an insertion
#[derive(Debug, Clone, Copy)]
struct Sample {
    inserted: usize,
    load: f64,
    empty_share: f64,
    capacity: usize,
}

fn profile<M: HashTable<u64, u64>>(map: &mut M, keys: &[u64]) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(keys.len() / SAMPLE_EVERY + 1);

    for (i, &key) in keys.iter().enumerate() {
        map.put(key, i as u64);
        let inserted = i + 1;
        if inserted % SAMPLE_EVERY == 0 {
            samples.push(Sample {
                inserted,
                load: map.table_load(),
                empty_share: map.empty_buckets() as f64 / map.capacity() as f64,
                capacity: map.capacity(),
            });
        }
    }

    samples
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    y_max: f64,
    series: &[Vec<Sample>],
    value: fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // red
        RGBColor(50, 90, 220), // blue
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for ((engine, samples), color) in ENGINES.iter().zip(series).zip(colors.iter()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.inserted, value(sample))),
                line_style,
            ))?
            .label(*engine)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..NUM_KEYS).map(|_| rng.random()).collect();

    let mut probing: OpenAddressingMap<u64, u64> =
        OpenAddressingMap::new(INITIAL_CAPACITY, default_hash::<u64>);
    let mut chaining: SeparateChainingMap<u64, u64> =
        SeparateChainingMap::new(INITIAL_CAPACITY, default_hash::<u64>);
    let series = [profile(&mut probing, &keys), profile(&mut chaining, &keys)];

    for (engine, samples) in ENGINES.iter().zip(&series) {
        let resizes = samples
            .windows(2)
            .filter(|w| matches!(w, [a, b] if a.capacity != b.capacity))
            .count();
        println!(
            "{engine}: final capacity = {}, load = {:.3}, capacity changes seen = {resizes}",
            samples.last().map_or(0, |s| s.capacity),
            samples.last().map_or(0.0, |s| s.load),
        );
    }

    draw_chart(
        "load_factor.png",
        "Load Factor While Growing",
        "Load Factor (entries / buckets)",
        1.1,
        &series,
        |sample| sample.load,
    )?;
    draw_chart(
        "empty_buckets.png",
        "Share of Empty Buckets While Growing",
        "Empty Buckets / Capacity",
        1.0,
        &series,
        |sample| sample.empty_share,
    )?;

    println!("Generated plot images: load_factor.png, empty_buckets.png");

    Ok(())
}
