//! Type a PIN into a field and print the frames it draws.
//!
//! Run with: `cargo run -p pin-entry --example pin_pad -- [style.css] [digits]`
//!
//! Set `RUST_LOG=pin_entry=trace` to see the field's log output.

use pin_entry::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let style_path = args.next();
    let digits = args.next().unwrap_or_else(|| "2580".to_string());

    let mut pin = match style_path {
        Some(path) => PinEdit::from_stylesheet_file(path, Some("demo"), DisplayMetrics::new(2.0)),
        None => PinEdit::new(),
    };

    pin.completed.connect(|code| {
        println!("completed with {} digits", code.chars().count());
    });

    let hint = pin.size_hint().preferred;
    let bounds = Rect::new(0.0, 0.0, hint.width, hint.height);

    for c in digits.chars() {
        pin.key_press(&KeyPressEvent::char(c));
        print_frame(&pin, bounds);
    }

    pin.key_press(&KeyPressEvent::key(Key::Backspace));
    print_frame(&pin, bounds);
}

fn print_frame(pin: &PinEdit, bounds: Rect) {
    let mut surface = RecordingSurface::new();
    pin.render(&mut surface, bounds);

    let slots: Vec<String> = (0..pin.capacity())
        .map(|i| surface.texts().get(i).map_or("_".to_string(), |g| g.to_string()))
        .collect();
    println!("[{}]  ({} draw calls)", slots.join(" "), surface.commands().len());
}
