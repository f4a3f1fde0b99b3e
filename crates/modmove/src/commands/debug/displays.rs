#[cfg(windows)]
pub fn execute() {
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
    use modmove_core::screen;

    let monitors = modmove_windows::monitor::enumerate_monitors();
    let screens = screen::usable_screens(&modmove_windows::monitor::to_layout(&monitors));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#"),
            Cell::new("Primary"),
            Cell::new("Bounds"),
            Cell::new("Work area"),
            Cell::new("Usable frame"),
            Cell::new("Scale").set_alignment(CellAlignment::Right),
        ]);

    for (index, (monitor, usable)) in monitors.iter().zip(&screens).enumerate() {
        let b = monitor.bounds;
        let w = monitor.work_area;
        let f = usable.frame;
        table.add_row(vec![
            Cell::new(index),
            Cell::new(if monitor.primary { "yes" } else { "" }),
            Cell::new(format!("{},{} - {},{}", b.left, b.top, b.right, b.bottom)),
            Cell::new(format!("{},{} - {},{}", w.left, w.top, w.right, w.bottom)),
            Cell::new(format!("{},{} {}x{}", f.x, f.y, f.width, f.height)),
            Cell::new(format!("{:.2}", usable.scale)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
    println!("\n{} displays found", monitors.len());
}

#[cfg(not(windows))]
pub fn execute() {
    super::super::unsupported("debug displays");
}
