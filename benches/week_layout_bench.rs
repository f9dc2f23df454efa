// Benchmark for month grid construction and week packing
// Measures layout cost as the number of allocations on screen grows

use chrono::{NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resource_calendar::layout::{build_month_grid, layout_month, PreviewOverride};
use resource_calendar::models::event::{CalendarEvent, EventId};
use resource_calendar::utils::date::add_days;

/// Deterministic spread of allocations across a six-week window
fn allocations(count: usize) -> Vec<CalendarEvent> {
    let base = NaiveDate::from_ymd_opt(2025, 2, 24).unwrap();
    (0..count)
        .map(|i| {
            let start = add_days(base, ((i * 7) % 42) as i64);
            let end = add_days(start, (i % 9) as i64);
            CalendarEvent::new(EventId(i as u64 + 1), "ana".into(), format!("Allocation {}", i), start, end)
                .unwrap()
        })
        .collect()
}

fn bench_layout_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_month");
    let rows = build_month_grid(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), Weekday::Mon);

    for count in [10, 100, 1000].iter() {
        let events = allocations(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| layout_month(black_box(&rows), black_box(events), None));
        });
    }

    group.finish();
}

fn bench_resize_preview(c: &mut Criterion) {
    let rows = build_month_grid(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), Weekday::Mon);
    let events = allocations(100);
    let preview = PreviewOverride {
        event_id: EventId(1),
        end: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
    };

    // One relayout per pointer move while resizing
    c.bench_function("layout_month_with_preview_100", |b| {
        b.iter(|| layout_month(black_box(&rows), black_box(&events), Some(&preview)));
    });
}

fn bench_month_grid(c: &mut Criterion) {
    c.bench_function("build_month_grid", |b| {
        b.iter(|| {
            build_month_grid(
                black_box(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()),
                black_box(Weekday::Sun),
            )
        });
    });
}

criterion_group!(benches, bench_layout_month, bench_resize_preview, bench_month_grid);
criterion_main!(benches);
