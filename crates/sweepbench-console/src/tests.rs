use super::*;

fn visitor(event: &str) -> EventVisitor {
    EventVisitor {
        event: Some(event.to_string()),
        ..EventVisitor::default()
    }
}

#[test]
fn test_sweep_start_lists_range_and_variants() {
    let v = EventVisitor {
        name: Some("Removed optimization".to_string()),
        generator: Some("Worst-case graph".to_string()),
        variants: Some(2),
        steps: Some(1200),
        start: Some(1),
        stop: Some(12000),
        step: Some(10),
        iterations: Some(3),
        ..visitor("sweep_start")
    };

    let output = format_event(&v, Level::INFO);
    assert!(output.contains("Removed optimization"));
    assert!(output.contains("Worst-case graph"));
    assert!(output.contains("1,200"));
    assert!(output.contains("1..=12,000 by 10"));
    assert!(output.contains("variants"));
}

#[test]
fn test_single_variant_omits_variant_count() {
    let output = format_event(&visitor("sweep_start"), Level::INFO);
    assert!(!output.contains("variants"));
}

#[test]
fn test_step_shows_best_and_total() {
    let v = EventVisitor {
        parameter: Some(55),
        best_secs: Some(0.0125),
        total_secs: Some(2.5),
        ..visitor("step")
    };

    let output = format_event(&v, Level::DEBUG);
    assert!(output.contains("55"));
    assert!(output.contains("12.50ms"));
    assert!(output.contains("2.500s"));
}

#[test]
fn test_sample_only_at_trace() {
    let v = EventVisitor {
        nanos: Some(1_500_000),
        ..visitor("sample")
    };
    assert!(format_event(&v, Level::DEBUG).is_empty());
    assert!(format_event(&v, Level::TRACE).contains("1,500,000"));
}

#[test]
fn test_unknown_event_is_silent() {
    assert!(format_event(&visitor("solve_start"), Level::INFO).is_empty());
    assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
}

#[test]
fn test_plot_written_names_path() {
    let v = EventVisitor {
        path: Some("plots/ladder.svg".to_string()),
        ..visitor("plot_written")
    };
    assert!(format_event(&v, Level::INFO).contains("plots/ladder.svg"));
}

#[test]
fn test_format_seconds_units() {
    assert_eq!(format_seconds(0.0000025), "2.5µs");
    assert_eq!(format_seconds(0.25), "250.00ms");
    assert_eq!(format_seconds(12.0), "12.000s");
    assert_eq!(format_seconds(125.0), "2m 5s");
}

#[test]
fn test_visitor_records_tracing_fields() {
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push(format_event(&visitor, *event.metadata().level()));
        }
    }

    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(event = "sweep_end", name = %"Ladder", steps = 4usize, total_secs = 0.5f64);
    });

    let lines = capture.0.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Ladder"));
    assert!(lines[0].contains("500.00ms"));
}

#[test]
fn test_init_is_idempotent() {
    init();
    init();
}
