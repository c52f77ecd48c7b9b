use exohood_events::{ListenerError, PURCHASE_COMPLETED};
use exohood_view::{FailureKind, RenderError};
use exohood_widget::*;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// Home view stand-in: renders a label, emits one event per render, and
/// fails while the shared switch is on.
fn home(broken: Arc<Mutex<bool>>, event_type: &'static str) -> impl SubtreeFactory {
    move |token: InstanceToken| -> Box<dyn Component> {
        let broken = broken.clone();
        Box::new(move |cx: &RenderContext| {
            if *broken.lock() {
                return Err(RenderError::failed("quotes unavailable"));
            }
            cx.emit(&EventContext::new(event_type, "g1"));
            Ok(text(format!("home {} for {}", token, cx.config().api_key)))
        })
    }
}

fn document() -> MemoryDocument {
    MemoryDocument::new().with_element("#widget")
}

#[test]
fn missing_selector_renders_nothing() {
    let document = document();

    let mounted = mount(
        &document,
        "#nope",
        HostProperties::new("k1"),
        home(Arc::default(), "test.mount.missing"),
    );

    assert!(mounted.is_none());
    assert_eq!(document.commit_count(), 0);
    assert_eq!(document.markup("#widget").as_deref(), Some(""));
}

#[test]
fn mount_commits_themed_root_markup() {
    let document = document().with_cookies("_ga=GA1.2.42");
    let properties = HostProperties::from_value(json!({
        "API_KEY": "k1",
        "color": "#112233",
        "className": "host",
    }))
    .unwrap();

    let mounted = mount(
        &document,
        "#widget",
        properties,
        home(Arc::default(), "test.mount.themed"),
    )
    .unwrap();

    assert_eq!(
        document.markup("#widget").unwrap(),
        r##"<div class="isolate-inheritance theme host" id="main" data-instance="0" style="--primary-color: #112233; --font-family: inherit">home 0 for k1</div>"##
    );
    assert_eq!(mounted.config().theme.theme_token, "112233");
    assert_eq!(
        mounted.config().analytics.data_layer.client_id.as_deref(),
        Some("GA1.2.42")
    );
    assert_eq!(mounted.target().selector(), "#widget");
}

#[test]
fn crash_then_reset_recovers_under_new_token() {
    let document = document();
    let broken = Arc::new(Mutex::new(true));

    let mut mounted = mount(
        &document,
        "#widget",
        HostProperties::new("k1"),
        home(broken.clone(), "test.mount.crash"),
    )
    .unwrap();

    let crashed = document.markup("#widget").unwrap();
    assert!(crashed.contains(r#"data-action="reset""#));
    assert!(crashed.contains(r#"data-instance="0""#));
    match mounted.state() {
        BoundaryState::Failed(report) => assert_eq!(report.kind, FailureKind::Error),
        BoundaryState::Stable => panic!("subtree failure should be contained"),
    }
    let config_before = mounted.config().clone();

    *broken.lock() = false;
    let token = mounted.activate(RESET_ACTION).unwrap();

    assert_eq!(token, InstanceToken::INITIAL.next());
    assert_eq!(*mounted.state(), BoundaryState::Stable);
    assert_eq!(**mounted.config(), *config_before);
    let recovered = document.markup("#widget").unwrap();
    assert!(recovered.contains(r#"data-instance="1""#));
    assert!(recovered.contains("home 1 for k1"));
    assert_eq!(document.commit_count(), 2);
}

#[test]
fn repeated_failure_after_reset_shows_fallback_again() {
    let document = document();
    let mut mounted = mount(
        &document,
        "#widget",
        HostProperties::new("k1"),
        home(Arc::new(Mutex::new(true)), "test.mount.repeat"),
    )
    .unwrap();

    let token = mounted.reset().unwrap();

    assert_eq!(token.value(), 1);
    assert!(matches!(mounted.state(), BoundaryState::Failed(r) if r.token == token));
    assert!(document.markup("#widget").unwrap().contains(r#"data-action="reset""#));
}

#[test]
fn reset_on_stable_widget_leaves_markup_alone() {
    let document = document();
    let mut mounted = mount(
        &document,
        "#widget",
        HostProperties::new("k1"),
        home(Arc::default(), "test.mount.stable"),
    )
    .unwrap();

    assert!(mounted.reset().is_err());
    assert_eq!(mounted.activate(RESET_ACTION), None);
    assert_eq!(mounted.token(), InstanceToken::INITIAL);
    assert_eq!(document.commit_count(), 1);
}

#[test]
fn host_listener_registered_before_mount_sees_widget_events() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    on("test.mount.global", move |event| sink.lock().push(event.clone()));

    let document = document();
    let mut mounted = mount(
        &document,
        "#widget",
        HostProperties::new("k1"),
        home(Arc::default(), "test.mount.global"),
    )
    .unwrap();
    mounted.render();

    assert_eq!(
        *seen.lock(),
        vec![
            EventContext::new("test.mount.global", "g1"),
            EventContext::new("test.mount.global", "g1"),
        ]
    );
}

#[test]
fn failing_host_listener_does_not_disturb_widget() {
    let bus = EventBus::new();
    let delivered = Arc::new(Mutex::new(0));

    bus.subscribe_fallible(PURCHASE_COMPLETED, |_| Err(ListenerError::failed("host bug")));
    bus.subscribe(PURCHASE_COMPLETED, |_| panic!("host listener panicked"));
    let counter = delivered.clone();
    bus.subscribe(PURCHASE_COMPLETED, move |_| *counter.lock() += 1);

    let widget = Widget::builder(HostProperties::new("k1"))
        .bus(bus)
        .build(home(Arc::default(), PURCHASE_COMPLETED));

    let document = document();
    let mounted = mount_widget(&document, "#widget", widget).unwrap();

    assert_eq!(*mounted.state(), BoundaryState::Stable);
    assert_eq!(*delivered.lock(), 1);
    assert!(document.markup("#widget").unwrap().contains("home 0 for k1"));
}
