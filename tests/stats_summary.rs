use chrono::NaiveDate;
use streamviz::models::{Record, SeriesKey};
use streamviz::stats::series_summary;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn summary_per_series_in_canonical_order() {
    let records = vec![
        Record::new(d("2024-01-01"), [1.0, 10.0, 0.0, 2.0, 5.0]),
        Record::new(d("2024-02-01"), [3.0, 20.0, 0.0, 4.0, 5.0]),
        Record::new(d("2024-03-01"), [2.0, 30.0, 0.0, 6.0, 5.0]),
    ];
    let out = series_summary(&records);
    assert_eq!(out.len(), 5);
    assert_eq!(out[0].key, SeriesKey::Gpt4);

    let gpt4 = &out[0];
    assert_eq!(gpt4.count, 3);
    assert_eq!(gpt4.missing, 0);
    assert_eq!(gpt4.min, Some(1.0));
    assert_eq!(gpt4.max, Some(3.0));
    assert_eq!(gpt4.mean, Some(2.0));
    assert_eq!(gpt4.median, Some(2.0));

    let gemini = &out[1];
    assert_eq!(gemini.mean, Some(20.0));
    assert_eq!(gemini.median, Some(20.0));
}

#[test]
fn nan_counts_as_missing() {
    let records = vec![
        Record::new(d("2024-01-01"), [1.0, f64::NAN, 0.0, 0.0, 0.0]),
        Record::new(d("2024-02-01"), [3.0, 4.0, 0.0, 0.0, 0.0]),
    ];
    let out = series_summary(&records);
    let gemini = &out[SeriesKey::Gemini.index()];
    assert_eq!(gemini.count, 1);
    assert_eq!(gemini.missing, 1);
    assert_eq!(gemini.median, Some(4.0));
}

#[test]
fn even_count_median_averages() {
    let records = vec![
        Record::new(d("2024-01-01"), [1.0, 0.0, 0.0, 0.0, 0.0]),
        Record::new(d("2024-02-01"), [2.0, 0.0, 0.0, 0.0, 0.0]),
        Record::new(d("2024-03-01"), [3.0, 0.0, 0.0, 0.0, 0.0]),
        Record::new(d("2024-04-01"), [4.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    let out = series_summary(&records);
    assert_eq!(out[0].median, Some(2.5));
}

#[test]
fn empty_records_give_empty_summaries() {
    let out = series_summary(&[]);
    assert_eq!(out.len(), 5);
    for s in &out {
        assert_eq!(s.count, 0);
        assert_eq!(s.missing, 0);
        assert_eq!(s.min, None);
        assert_eq!(s.mean, None);
        assert_eq!(s.median, None);
    }
}
