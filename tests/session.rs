use std::io::Cursor;

use snipmark::config::{Config, KeybindingsConfig};
use snipmark::draw::{Layer, Screenshot};
use snipmark::input::{InputState, Key, MouseButton, Tool};

fn input_state(screenshot: Screenshot) -> InputState {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    InputState::new(screenshot, &Config::default(), action_map)
}

fn drag(state: &mut InputState, from: (i32, i32), to: (i32, i32)) {
    state.on_mouse_press(MouseButton::Left, from.0, from.1);
    state.on_mouse_motion(to.0, to.1);
    state.on_mouse_release(MouseButton::Left, to.0, to.1);
}

fn ctrl(state: &mut InputState, c: char) {
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Char(c));
    state.on_key_release(Key::Char(c));
    state.on_key_release(Key::Ctrl);
}

fn snapshot(state: &InputState) -> Layer {
    state.canvas().unwrap().layer().snapshot().unwrap()
}

/// 30x30 screenshot: columns 0..4 red, the rest blue.
fn split_screenshot() -> Screenshot {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 30, 30).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.paint().unwrap();
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 4.0, 30.0);
        ctx.fill().unwrap();
    }
    let mut png = Vec::new();
    surface.write_to_png(&mut png).unwrap();
    Screenshot::from_png(&mut Cursor::new(png)).unwrap()
}

#[test]
fn undo_redo_restores_every_state_bit_for_bit() {
    let mut state = input_state(Screenshot::solid(200, 150, 0.3, 0.3, 0.3).unwrap());
    drag(&mut state, (10, 10), (190, 140));
    let mut states = vec![snapshot(&state)];

    let gestures: [(Tool, (i32, i32), (i32, i32)); 5] = [
        (Tool::Pen, (20, 20), (80, 60)),
        (Tool::Rectangle, (30, 30), (120, 90)),
        (Tool::Arrow, (150, 20), (60, 110)),
        (Tool::Marker, (20, 100), (170, 100)),
        (Tool::Ellipse, (90, 40), (160, 130)),
    ];
    for (tool, from, to) in gestures {
        state.set_tool(tool);
        drag(&mut state, from, to);
        states.push(snapshot(&state));
    }
    assert_eq!(state.canvas().unwrap().history().undo_len(), 5);

    for expected in states.iter().rev().skip(1) {
        ctrl(&mut state, 'z');
        assert!(state.canvas().unwrap().layer().same_pixels(expected).unwrap());
    }
    assert!(state.canvas().unwrap().layer().is_blank().unwrap());

    for expected in states.iter().skip(1) {
        ctrl(&mut state, 'y');
        assert!(state.canvas().unwrap().layer().same_pixels(expected).unwrap());
    }
}

#[test]
fn history_keeps_only_the_most_recent_twenty_edits() {
    let mut state = input_state(Screenshot::solid(200, 150, 0.3, 0.3, 0.3).unwrap());
    drag(&mut state, (0, 0), (200, 150));
    state.set_tool(Tool::Line);

    for i in 0..25 {
        let y = 5 + i * 5;
        drag(&mut state, (10, y), (190, y));
    }
    assert_eq!(state.canvas().unwrap().history().undo_len(), 20);

    for _ in 0..25 {
        ctrl(&mut state, 'z');
    }
    // The five oldest lines were evicted and cannot be undone
    let canvas = state.canvas().unwrap();
    assert!(!canvas.layer().is_blank().unwrap());
    assert_eq!(canvas.layer().pixel(100, 5).unwrap(), Some(0xFFFF_0000));
    assert_eq!(canvas.layer().pixel(100, 30).unwrap(), Some(0));
}

#[test]
fn pixelate_uses_majority_colour_per_block() {
    let mut state = input_state(split_screenshot());
    drag(&mut state, (0, 0), (12, 12));
    state.set_tool(Tool::Pixelate);
    drag(&mut state, (0, 0), (12, 12));

    let layer = state.canvas().unwrap().layer();
    assert_eq!(layer.pixel(1, 1).unwrap(), Some(0xFFFF_0000));
    // Block 3..6 holds one red and two blue columns
    assert_eq!(layer.pixel(3, 1).unwrap(), Some(0xFF00_00FF));
    assert_eq!(layer.pixel(10, 10).unwrap(), Some(0xFF00_00FF));
    assert_eq!(state.canvas().unwrap().history().undo_len(), 1);
}

#[test]
fn composite_blends_layer_over_crop() {
    let mut state = input_state(split_screenshot());
    drag(&mut state, (2, 2), (22, 22));
    state.set_tool(Tool::Pen);
    drag(&mut state, (5, 12), (20, 12));

    let image = state.composite().unwrap().unwrap();
    assert_eq!((image.width(), image.height()), (20, 20));

    // Crop origin (2, 2): column 0..2 of the crop is red, the rest blue
    let px = |x, y| snipmark::draw::surface_pixel(&image, x, y).unwrap().unwrap();
    assert_eq!(px(0, 0), 0xFFFF_0000);
    assert_eq!(px(15, 0), 0xFF00_00FF);
    // Red pen stroke along crop row 10
    assert_eq!(px(10, 10), 0xFFFF_0000);
}
