//! Stage event processing and handle guarding.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use cmk::prelude::*;

/// Collects formatted log output.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.contents())
}

fn press(x: f32, y: f32) -> StageEvent {
    StageEvent::PointerPress {
        button: MouseButton::Left,
        pos: Point::new(x, y),
    }
}

fn release(x: f32, y: f32) -> StageEvent {
    StageEvent::PointerRelease {
        button: MouseButton::Left,
        pos: Point::new(x, y),
    }
}

fn clicks(stage: &Stage, id: ButtonId) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    stage.get(id).unwrap().clicked.connect(move |_| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn test_resize_is_applied_before_pointer_events() {
    let mut stage = Stage::default();
    let id = stage.create_button_with_text("OK");
    let clicked = clicks(&stage, id);

    // Pointer events posted before the resize still see the new size.
    stage.post(press(10.0, 10.0));
    stage.post(release(10.0, 10.0));
    stage.post(StageEvent::Resize {
        id,
        size: Size::new(50.0, 20.0),
    });

    let stats = stage.process_events();
    assert_eq!(stats.resizes, 1);
    assert_eq!(stats.pointer_events, 2);
    assert_eq!(stats.consumed, 2);
    assert_eq!(clicked.load(Ordering::SeqCst), 1);
    assert_eq!(stage.pending_events(), 0);
}

#[test]
fn test_resize_is_applied_before_paint() {
    let mut stage = Stage::default();
    let id = stage.create_button();
    stage.post(StageEvent::Resize {
        id,
        size: Size::new(64.0, 32.0),
    });
    let stats = stage.process_events();

    let button = stage.get(id).unwrap();
    assert_eq!(stats.repainted, 1);
    assert_eq!(button.canvas().size(), (64, 32));
    assert_eq!(button.canvas().redraw_count(), 1);
    assert!(button.canvas().is_valid());

    // Nothing left to repaint.
    assert_eq!(stage.process_events().repainted, 0);
}

#[test]
fn test_grab_routes_release_to_pressed_button() {
    let mut stage = Stage::default();
    let left = stage.create_button();
    let right = stage.create_button();
    stage.set_geometry(left, Rect::new(0.0, 0.0, 50.0, 20.0));
    stage.set_geometry(right, Rect::new(60.0, 0.0, 50.0, 20.0));
    let left_clicks = clicks(&stage, left);
    let right_clicks = clicks(&stage, right);

    stage.post(press(10.0, 10.0));
    stage.process_events();
    assert_eq!(stage.pointer_grab(), Some(left));
    assert_eq!(stage.get(left).unwrap().state(), ButtonState::Pressed);

    // Released over the other button: the grab holder gets it, outside its bounds.
    stage.post(release(70.0, 10.0));
    stage.process_events();
    assert_eq!(stage.pointer_grab(), None);
    assert_eq!(stage.get(left).unwrap().state(), ButtonState::Idle);
    assert_eq!(left_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(right_clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn test_press_goes_to_topmost() {
    let mut stage = Stage::default();
    let bottom = stage.create_button();
    let top = stage.create_button();
    stage.set_geometry(bottom, Rect::new(0.0, 0.0, 100.0, 100.0));
    stage.set_geometry(top, Rect::new(20.0, 20.0, 40.0, 40.0));
    let bottom_clicks = clicks(&stage, bottom);
    let top_clicks = clicks(&stage, top);

    stage.post(press(30.0, 30.0));
    stage.post(release(30.0, 30.0));
    stage.process_events();
    assert_eq!(top_clicks.load(Ordering::SeqCst), 1);
    assert_eq!(bottom_clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cancel_breaks_grab() {
    let mut stage = Stage::default();
    let id = stage.create_button();
    stage.set_geometry(id, Rect::new(0.0, 0.0, 50.0, 20.0));
    let clicked = clicks(&stage, id);

    stage.post(press(5.0, 5.0));
    stage.post(StageEvent::PointerCancel);
    stage.post(release(5.0, 5.0));
    let stats = stage.process_events();

    assert_eq!(stats.consumed, 2);
    assert_eq!(stage.pointer_grab(), None);
    assert_eq!(stage.get(id).unwrap().state(), ButtonState::Idle);
    assert_eq!(clicked.load(Ordering::SeqCst), 0);
}

#[test]
fn test_press_on_empty_space_is_not_consumed() {
    let mut stage = Stage::default();
    let id = stage.create_button();
    stage.set_geometry(id, Rect::new(0.0, 0.0, 50.0, 20.0));

    stage.post(press(200.0, 200.0));
    stage.post(StageEvent::PointerPress {
        button: MouseButton::Right,
        pos: Point::new(5.0, 5.0),
    });
    let stats = stage.process_events();
    assert_eq!(stats.consumed, 0);
    assert_eq!(stage.pointer_grab(), None);
}

#[test]
fn test_stale_handle_operations_are_guarded() {
    let mut stage = Stage::default();
    let id = stage.create_button_with_text("gone");
    let style = stage.style_context().default_style();
    let button = stage.destroy(id).unwrap();
    drop(button);

    let ((), logs) = with_captured_logs(|| {
        stage.set_text(id, "x");
        stage.set_name(id, "x");
        stage.set_background_color_name(id, "background");
        stage.set_style(id, style.clone());
        stage.set_geometry(id, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(stage.text(id), None);
        assert_eq!(stage.name(id), None);
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("set_text"));
    assert!(logs.contains("set_style"));

    assert!(matches!(stage.try_set_text(id, "x"), Err(Error::InvalidHandle(bad)) if bad == id));
    assert!(matches!(stage.try_text(id), Err(Error::InvalidHandle(_))));
    assert!(matches!(stage.try_name(id), Err(Error::InvalidHandle(_))));
    assert!(matches!(stage.try_set_name(id, "x"), Err(Error::InvalidHandle(_))));
    assert!(matches!(stage.try_set_style(id, style), Err(Error::InvalidHandle(_))));
    assert!(matches!(
        stage.try_set_background_color_name(id, "background"),
        Err(Error::InvalidHandle(_))
    ));
    assert!(matches!(
        stage.try_set_geometry(id, Rect::ZERO),
        Err(Error::InvalidHandle(_))
    ));
}

#[test]
fn test_stale_resize_event_is_skipped() {
    let mut stage = Stage::default();
    let keep = stage.create_button();
    let gone = stage.create_button();
    stage.destroy(gone);

    stage.post(StageEvent::Resize {
        id: gone,
        size: Size::new(10.0, 10.0),
    });
    stage.post(StageEvent::Resize {
        id: keep,
        size: Size::new(10.0, 10.0),
    });
    let (stats, logs) = with_captured_logs(|| stage.process_events());
    assert_eq!(stats.resizes, 1);
    assert!(logs.contains("resize"));
    assert_eq!(stage.get(keep).unwrap().size(), Size::new(10.0, 10.0));
}

#[test]
fn test_destroy_releases_style() {
    let mut stage = Stage::default();
    let style = Arc::new(Style::new("custom"));
    let id = stage.create_button();
    stage.set_style(id, style.clone());
    assert_eq!(Arc::strong_count(&style), 2);

    stage.destroy(id);
    assert_eq!(Arc::strong_count(&style), 1);
}

#[test]
fn test_try_ops_on_live_handle() {
    let mut stage = Stage::default();
    let id = stage.create_button();
    stage.try_set_text(id, "Apply").unwrap();
    stage.try_set_name(id, "apply").unwrap();
    assert_eq!(stage.try_text(id).unwrap(), "Apply");
    assert_eq!(stage.try_name(id).unwrap(), "apply");
}

#[test]
fn test_stage_from_style_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.toml");
    std::fs::write(&path, "name = \"flat\"\nbevel-radius = 0.0\n").unwrap();

    let mut stage = Stage::from_style_file(&path).unwrap();
    let id = stage.create_button();
    assert_eq!(stage.get(id).unwrap().style().name(), "flat");

    let missing = dir.path().join("missing.toml");
    assert!(matches!(Stage::from_style_file(missing), Err(Error::Style(_))));
}

#[test]
fn test_second_press_while_grabbed_is_ignored() {
    let mut stage = Stage::default();
    let a = stage.create_button();
    let b = stage.create_button();
    stage.set_geometry(a, Rect::new(0.0, 0.0, 50.0, 20.0));
    stage.set_geometry(b, Rect::new(60.0, 0.0, 50.0, 20.0));
    let a_clicks = clicks(&stage, a);
    let b_clicks = clicks(&stage, b);

    stage.post(press(5.0, 5.0));
    stage.post(press(70.0, 5.0));
    stage.post(release(70.0, 5.0));
    let stats = stage.process_events();

    // The release belongs to `a`, which took the first press.
    assert_eq!(stats.consumed, 2);
    assert_eq!(stage.pointer_grab(), None);
    assert_eq!(stage.get(a).unwrap().state(), ButtonState::Idle);
    assert_eq!(stage.get(b).unwrap().state(), ButtonState::Idle);
    assert_eq!(a_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(b_clicks.load(Ordering::SeqCst), 0);

    // `a` still responds afterwards.
    stage.post(press(5.0, 5.0));
    stage.post(release(5.0, 5.0));
    assert_eq!(stage.process_events().consumed, 2);
    assert_eq!(a_clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_destroying_grab_holder_cancels_press() {
    let mut stage = Stage::default();
    let id = stage.create_button();
    stage.set_geometry(id, Rect::new(0.0, 0.0, 50.0, 20.0));
    let released = Arc::new(AtomicUsize::new(0));
    let released_clone = released.clone();
    stage.get(id).unwrap().released.connect(move |_| {
        released_clone.fetch_add(1, Ordering::SeqCst);
    });
    let clicked = clicks(&stage, id);

    stage.post(press(5.0, 5.0));
    stage.process_events();
    assert_eq!(stage.pointer_grab(), Some(id));

    let button = stage.destroy(id).unwrap();
    assert_eq!(button.state(), ButtonState::Idle);
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert_eq!(clicked.load(Ordering::SeqCst), 0);
    assert_eq!(stage.pointer_grab(), None);
}
