use chrono::NaiveDate;
use std::fs;
use streamviz::models::{Record, SeriesKey, series_samples};
use streamviz::viz::{self, minichart};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sample_records() -> Vec<Record> {
    vec![
        Record::new(d("2024-01-01"), [10.0, 5.0, 2.0, 4.0, 1.0]),
        Record::new(d("2024-02-01"), [12.0, 6.0, 2.0, 5.0, 2.0]),
        Record::new(d("2024-03-01"), [20.0, 5.0, 1.0, 7.0, 4.0]),
    ]
}

#[test]
fn streamgraph_file_is_written() {
    let records = sample_records();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.svg");
    viz::render_streamgraph(&records, &path, viz::CHART_WIDTH, viz::CHART_HEIGHT).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "svg has content");
}

#[test]
fn scene_has_one_band_per_series_and_all_legend_labels() {
    let records = sample_records();
    let svg = viz::streamgraph_svg(&records, viz::CHART_WIDTH, viz::CHART_HEIGHT).unwrap();
    assert_eq!(svg.matches("<polygon").count(), SeriesKey::ALL.len());
    for key in SeriesKey::ALL {
        assert!(svg.contains(key.label()), "legend misses {}", key.label());
    }
}

#[test]
fn rendering_is_deterministic() {
    let records = sample_records();
    let a = viz::streamgraph_svg(&records, viz::CHART_WIDTH, viz::CHART_HEIGHT).unwrap();
    let b = viz::streamgraph_svg(&records, viz::CHART_WIDTH, viz::CHART_HEIGHT).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_records_are_a_recoverable_error() {
    let records: Vec<Record> = vec![];
    assert!(viz::streamgraph_svg(&records, viz::CHART_WIDTH, viz::CHART_HEIGHT).is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    assert!(
        viz::render_streamgraph(&records, &path, viz::CHART_WIDTH, viz::CHART_HEIGHT).is_err()
    );
}

#[test]
fn nan_cell_still_renders() {
    let mut records = sample_records();
    records[1] = Record::new(d("2024-02-01"), [12.0, f64::NAN, 2.0, 5.0, 2.0]);
    let svg = viz::streamgraph_svg(&records, viz::CHART_WIDTH, viz::CHART_HEIGHT).unwrap();
    assert_eq!(svg.matches("<polygon").count(), SeriesKey::ALL.len());
    // No NaN coordinate may leak into the scene.
    assert!(!svg.to_lowercase().contains("nan"));
}

fn color_hex(key: SeriesKey) -> String {
    let (r, g, b) = key.color();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn count_color(svg: &str, key: SeriesKey) -> usize {
    svg.to_lowercase().matches(&color_hex(key)).count()
}

#[test]
fn mini_chart_draws_one_bar_per_record() {
    let records = sample_records();
    let samples = series_samples(&records, SeriesKey::Claude);
    let svg = minichart::mini_chart_svg(SeriesKey::Claude, &samples).unwrap();
    assert_eq!(count_color(&svg, SeriesKey::Claude), records.len());
    assert!(svg.contains("Month"));
    assert!(svg.contains("Value"));
}

#[test]
fn hovering_another_series_fully_replaces_the_mini_scene() {
    let records = sample_records();
    let a = minichart::mini_chart_svg(
        SeriesKey::Gpt4,
        &series_samples(&records, SeriesKey::Gpt4),
    )
    .unwrap();
    let b = minichart::mini_chart_svg(
        SeriesKey::Gemini,
        &series_samples(&records, SeriesKey::Gemini),
    )
    .unwrap();
    assert_ne!(a, b);
    // Only the hovered series' color appears in each scene.
    assert_eq!(count_color(&a, SeriesKey::Gemini), 0);
    assert_eq!(count_color(&b, SeriesKey::Gpt4), 0);
}

#[test]
fn mini_chart_with_no_samples_is_blank_not_an_error() {
    let svg = minichart::mini_chart_svg(SeriesKey::Palm2, &[]).unwrap();
    assert_eq!(count_color(&svg, SeriesKey::Palm2), 0);
}

#[test]
fn mini_chart_file_is_written() {
    let records = sample_records();
    let samples = series_samples(&records, SeriesKey::Llama31);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mini.svg");
    minichart::render_mini_chart(SeriesKey::Llama31, &samples, &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
