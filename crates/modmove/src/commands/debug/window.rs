#[cfg(windows)]
pub fn execute() {
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, ContentArrangement, Table};
    use modmove_core::{Window as _, closest_corner, screen};
    use modmove_windows::{Window, keys};

    let cursor = match keys::cursor_position() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: could not read the cursor position: {e}");
            std::process::exit(1);
        }
    };

    let Some(window) = Window::at_point(cursor) else {
        println!("No movable window at ({}, {})", cursor.x, cursor.y);
        return;
    };

    let rect = match window.rect() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: could not read window geometry: {e}");
            std::process::exit(1);
        }
    };
    let corner = closest_corner(rect.origin(), rect.size(), cursor);
    let usable = screen::resolve(&modmove_windows::enumerate_displays(), Some(rect.origin()));
    let pid = window
        .pid()
        .map_or_else(|e| format!("unknown ({e})"), |p| p.to_string());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Property"), Cell::new("Value")]);

    let rows = [
        ("HWND", format!("0x{:X}", window.hwnd().0 as usize)),
        ("Title", window.title()),
        ("Class", window.class()),
        ("PID", pid),
        ("Cursor", format!("{}, {}", cursor.x, cursor.y)),
        ("Position", format!("{}, {}", rect.x, rect.y)),
        ("Size", format!("{}x{}", rect.width, rect.height)),
        ("Resize corner", format!("{corner:?}")),
        (
            "Usable frame",
            usable.map_or("none".into(), |s| {
                let f = s.frame;
                format!("{},{} {}x{} @ {:.2}x", f.x, f.y, f.width, f.height, s.scale)
            }),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    println!("{table}");
}

#[cfg(not(windows))]
pub fn execute() {
    super::super::unsupported("debug window");
}
