//! End-to-end flow: CSV on disk -> store -> session -> rendered pages

use chanboard_core::models::{MetricCatalog, NavAction, Page, Section};
use chanboard_core::view::{MetricCard, PageView};
use chanboard_core::watcher::WatcherConfig;
use chanboard_core::{
    render, DashboardConfig, DashboardSession, DataEvent, DataStore, FileWatcher, RenderOptions,
};
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const HEADER: &str =
    "DATE,VIEWS,WATCH_HOURS,LIKES,SHARES,COMMENTS,SUBSCRIBERS_GAINED,SUBSCRIBERS_LOST\n";

fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("youtube_channel_data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn section_cards(view: &PageView) -> Vec<&MetricCard> {
    match view {
        PageView::Section(section) => section.cards.iter().filter_map(|c| c.ready()).collect(),
        other => panic!("expected section page, got {:?}", other),
    }
}

#[test]
fn test_two_row_example_daily_and_weekly() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "2024-01-01,10,0.5,1,0,0,2,1\n2024-01-02,20,1.5,2,0,0,3,1\n",
    );
    let store = DataStore::with_defaults(path);
    let dataset = store.dataset().unwrap();
    let catalog = MetricCatalog::default();

    let mut session = DashboardSession::from_config(&dataset, &DashboardConfig::default(), today());
    assert!(session.navigate(NavAction::OpenSection(Section::A), &catalog));

    let view = render(&session, &dataset, &catalog, today(), RenderOptions::default());
    let views = section_cards(&view)[1];
    let daily: Vec<(String, f64)> = views
        .chart
        .points
        .iter()
        .map(|p| (p.label.clone(), p.value))
        .collect();
    assert_eq!(
        daily,
        vec![("2024-01-01".to_string(), 10.0), ("2024-01-02".to_string(), 20.0)]
    );
    assert_eq!(views.delta_label, "+10 (+100.00%)");

    session.filter.cycle_granularity();
    let view = render(&session, &dataset, &catalog, today(), RenderOptions::default());
    let views = section_cards(&view)[1];
    assert_eq!(views.chart.points.len(), 1);
    assert_eq!(views.chart.points[0].value, 30.0);
    assert_eq!(views.delta.absolute, 0.0);
}

#[test]
fn test_navigation_round_trip_through_pages() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n");
    let store = DataStore::with_defaults(path);
    let dataset = store.dataset().unwrap();
    let catalog = MetricCatalog::default();
    let mut session = DashboardSession::from_config(&dataset, &DashboardConfig::default(), today());

    session.navigate(NavAction::OpenSection(Section::A), &catalog);
    session.navigate(NavAction::OpenMetric("Total Views".into()), &catalog);
    match render(&session, &dataset, &catalog, today(), RenderOptions::default()) {
        PageView::MetricDetail(detail) => assert_eq!(detail.heading, "Total Views Chart"),
        other => panic!("expected detail page, got {:?}", other),
    }

    session.navigate(NavAction::Back, &catalog);
    assert_eq!(session.page(), Page::Section);
    assert_eq!(session.navigation.metric(), None);

    session.navigate(NavAction::Back, &catalog);
    assert_eq!(session.page(), Page::Welcome);
    assert_eq!(session.section(), None);
    assert!(matches!(
        render(&session, &dataset, &catalog, today(), RenderOptions::default()),
        PageView::Welcome(_)
    ));
}

#[test]
fn test_missing_data_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::with_defaults(dir.path().join("youtube_channel_data.csv"));

    let err = store.dataset().unwrap_err();
    assert!(err.is_fatal());

    let report = store.initial_load();
    assert!(report.has_fatal_errors());
    assert!(!report.dataset_loaded);
}

#[tokio::test]
async fn test_rewrite_after_invalidate_reloads() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n");
    let store = Arc::new(DataStore::with_defaults(path));
    let mut rx = store.event_bus().subscribe();

    let first = store.dataset().unwrap();
    assert_eq!(first.len(), 1);

    write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n2024-01-02,5,0.5,1,0,0,2,1\n");
    store.invalidate();
    assert_eq!(rx.recv().await.unwrap(), DataEvent::DatasetChanged);

    let second = store.dataset().unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(store.load_count(), 2);
    // The old snapshot is still valid for whoever holds it
    assert_eq!(first.len(), 1);
}

async fn next_change(rx: &mut tokio::sync::broadcast::Receiver<DataEvent>) {
    let wait = async {
        loop {
            if let Ok(DataEvent::DatasetChanged) = rx.recv().await {
                return;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(10), wait)
        .await
        .expect("no DatasetChanged within 10s");
}

fn watcher_config() -> WatcherConfig {
    WatcherConfig {
        debounce_delay: Duration::from_millis(100),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_reports_rewritten_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n");
    let store = Arc::new(DataStore::with_defaults(path));
    let mut rx = store.event_bus().subscribe();
    assert_eq!(store.dataset().unwrap().len(), 1);

    let watcher = FileWatcher::start(Arc::clone(&store), watcher_config())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n2024-01-02,5,0.5,1,0,0,2,1\n");
    next_change(&mut rx).await;
    assert_eq!(store.dataset().unwrap().len(), 2);

    watcher.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_recovers_after_broken_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n");
    let store = Arc::new(DataStore::with_defaults(path.clone()));
    let mut rx = store.event_bus().subscribe();
    store.dataset().unwrap();

    let watcher = FileWatcher::start(Arc::clone(&store), watcher_config())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    std::fs::write(&path, "DATE,VIEWS\n2024-01-01,1\n").unwrap();
    next_change(&mut rx).await;
    assert!(store.dataset().is_err());

    write_csv(&dir, "2024-01-01,10,0.5,1,0,0,2,1\n2024-01-02,5,0.5,1,0,0,2,1\n");
    let recovered = async {
        loop {
            next_change(&mut rx).await;
            if let Ok(ds) = store.dataset() {
                return ds.len();
            }
        }
    };
    let rows = tokio::time::timeout(Duration::from_secs(10), recovered)
        .await
        .expect("fixed CSV never reloaded");
    assert_eq!(rows, 2);

    watcher.stop().await;
}
