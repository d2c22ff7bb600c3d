//! End-to-end dialog feature showcase.
//!
//! Builds each dialog variant headlessly and drives it through its full
//! surface, printing the state a rendering layer would observe: message
//! dialogs, choice lists, shared item swaps, spinner and bar progress, a
//! worker-driven progress flow with cancellation wiring, edit fields, grid
//! styling, and a staged multi-phase flow.
//!
//! Run with: cargo run -p meridian-dialog --example showcase

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use meridian_dialog::Indicator;
use meridian_dialog::prelude::*;
use meridian_dialog_core::PerfSpan;

fn indicator_glyph(indicator: &Indicator) -> &'static str {
    match indicator {
        Indicator::None => "",
        Indicator::CheckBox { checked: true } => "[x] ",
        Indicator::CheckBox { checked: false } => "[ ] ",
        Indicator::Radio { checked: true } => "(o) ",
        Indicator::Radio { checked: false } => "( ) ",
    }
}

/// Print every list row the way a list view would bind it.
fn print_rows(dialog: &Dialog) {
    for position in 0..dialog.item_count() {
        let view = dialog.row(position, None);
        let glyph = indicator_glyph(&view.indicator);
        let label = view
            .label
            .as_ref()
            .map(|text| text.text.as_str())
            .unwrap_or("");
        match view.sub_label.as_ref() {
            Some(sub) => println!("    {position}: {glyph}{label} ({})", sub.text),
            None => println!("    {position}: {glyph}{label}"),
        }
    }
}

/// Print the visible buttons and the divider layout they produce.
fn print_buttons(dialog: &Dialog) {
    let labels: Vec<String> = dialog
        .buttons()
        .iter()
        .filter(|(_, state)| state.visible)
        .map(|(kind, state)| {
            let marker = if state.enabled { "" } else { " (disabled)" };
            format!("{kind:?} \"{}\"{marker}", state.text)
        })
        .collect();
    let dividers = dialog.button_dividers();
    println!("    buttons: {}", labels.join(" | "));
    println!(
        "    dividers: outer={} inner_left={} inner_right={}",
        dividers.outer, dividers.inner_left, dividers.inner_right
    );
}

/// A plain title-plus-message dialog with two buttons.
fn message_dialog() {
    println!("\n=== Message dialog ===");

    let mut dialog = DialogBuilder::new()
        .title("Update available")
        .message("Version 2.4 is ready to install.")
        .positive_button("Install")
        .negative_button("Later")
        .on_button(|kind| println!("  [listener] button: {kind:?}"))
        .build()
        .expect("message dialog config is valid");

    dialog.shown.connect(|_| println!("  [signal] shown"));
    dialog.dismissed.connect(|_| println!("  [signal] dismissed"));

    dialog.show();
    println!("  title:   {:?}", dialog.title_bar().title);
    println!("  message: {:?}", dialog.message());
    print_buttons(&dialog);

    dialog.click_button(ButtonKind::Positive);

    dialog.remove_button(ButtonKind::Negative);
    println!("  after removing the negative button:");
    print_buttons(&dialog);

    dialog.dismiss();
}

/// A single-choice list where the positive button stays disabled until a
/// selection exists. The enable runs as a closure posted to the UI queue so
/// the slot never locks the dialog while the emitting call still holds it.
fn single_choice_list() {
    println!("\n=== Single-choice list ===");

    let ui = UiHandle::new();
    let dialog = DialogBuilder::new()
        .title("Default ringtone")
        .single_choice_items(["Aurora", "Pebble", "Signal"], None)
        .positive_button_enabled("Select", false)
        .negative_button("Cancel")
        .build()
        .expect("single-choice config is valid")
        .into_shared();

    {
        let guard = dialog.lock();
        let chosen = Arc::clone(&dialog);
        guard.item_activated.connect_queued(&ui, move |&position| {
            let mut dialog = chosen.lock();
            dialog.set_button_enabled(ButtonKind::Positive, true);
            println!("  [ui] row {position} chosen, positive button enabled");
        });
        guard
            .button_clicked
            .connect(|&kind| println!("  [signal] button: {kind:?}"));
    }

    dialog.lock().show();
    println!("  before any selection:");
    print_rows(&dialog.lock());
    print_buttons(&dialog.lock());

    dialog.lock().activate_row(1);
    ui.process_all();
    println!("  after activating row 1:");
    print_rows(&dialog.lock());
    print_buttons(&dialog.lock());

    dialog.lock().activate_row(2);
    ui.process_all();
    println!("  after activating row 2 (the check moves):");
    print_rows(&dialog.lock());

    dialog.lock().click_button(ButtonKind::Positive);
    println!("  chosen positions: {:?}", dialog.lock().checked_positions());
    dialog.lock().dismiss();
}

/// A multi-choice list where activation toggles the activated row only.
fn multi_choice_list() {
    println!("\n=== Multi-choice list ===");

    let mut dialog = DialogBuilder::new()
        .title("Back up now")
        .multi_choice_items(
            ["Contacts", "Messages", "Call history", "App data"],
            &[true, true, false, false],
        )
        .positive_button("Back up")
        .negative_button("Skip")
        .on_multi_choice(|position, checked| {
            println!("  [listener] row {position} toggled to {checked}");
        })
        .build()
        .expect("multi-choice config is valid");

    dialog.show();
    println!("  initial flags:");
    print_rows(&dialog);

    dialog.activate_row(2);
    dialog.activate_row(0);
    println!("  after toggling rows 2 and 0:");
    print_rows(&dialog);

    let labels: Vec<String> = dialog
        .checked_items()
        .iter()
        .filter_map(|item| item.label().map(str::to_string))
        .collect();
    println!("  queued for backup: {labels:?}");

    dialog.click_button(ButtonKind::Positive);
    dialog.dismiss();
}

/// A plain list over shared items. The owner swaps the contents in place and
/// the dialog keeps reading the same storage across a rebuild.
fn shared_list_rebuild() {
    println!("\n=== Shared items and rebuild ===");

    let items = share_items(vec![
        ListItem::new("alpha.log").with_sub_label("2.1 MB"),
        ListItem::new("beta.log").with_sub_label("648 KB"),
    ]);

    let mut dialog = DialogBuilder::new()
        .title("Recent captures")
        .shared_items(ListStyle::List, Arc::clone(&items))
        .neutral_button("Refresh")
        .build()
        .expect("list config is valid");

    dialog.show();
    print_rows(&dialog);

    {
        let mut items = items.write();
        items.clear();
        items.push(ListItem::new("gamma.log").with_sub_label("12 KB"));
        items.push(ListItem::new("delta.log").with_sub_label("3.4 MB"));
        items.push(ListItem::new("epsilon.log").with_sub_label("901 KB"));
    }
    println!("  after swapping the items in place:");
    print_rows(&dialog);

    dialog.rebuild();
    let same_storage = dialog
        .list()
        .map(|list| Arc::ptr_eq(&list.items, &items))
        .unwrap_or(false);
    println!("  rebuild keeps the same storage: {same_storage}");
    println!("  item count: {}", dialog.item_count());
    dialog.dismiss();
}

/// An indeterminate spinner. Bar operations do not apply to it, and cancel
/// is ignored while the dialog is marked non-cancelable.
fn indeterminate_progress() {
    println!("\n=== Indeterminate progress ===");

    let mut dialog = DialogBuilder::new()
        .title("Connecting")
        .indeterminate_progress()
        .progress_message("Contacting relay")
        .cancelable(false)
        .build()
        .expect("spinner config is valid");

    dialog.show();
    println!(
        "  indeterminate: {}, message: {:?}",
        dialog.is_progress_indeterminate(),
        dialog.progress_message()
    );

    dialog.set_progress(50);
    println!(
        "  percent after set_progress on a spinner: {:?}",
        dialog.progress_percent()
    );

    dialog.set_progress_message("Negotiating session");
    println!("  message: {:?}", dialog.progress_message());

    dialog.cancel();
    println!(
        "  cancel ignored while non-cancelable, visible: {}",
        dialog.is_visible()
    );
    dialog.dismiss();
}

/// A horizontal progress bar driven from a worker thread. Each step is a
/// closure posted to the UI queue; the steps check a cancellation token that
/// the cancel button would trip. The flow ends by rebuilding the same dialog
/// into a completion message.
fn worker_progress() {
    println!("\n=== Worker-driven progress ===");

    let ui = UiHandle::new();
    let dialog = DialogBuilder::new()
        .title("Exporting")
        .horizontal_progress(8)
        .progress_message("Writing pages")
        .negative_button("Cancel")
        .build()
        .expect("progress config is valid")
        .into_shared();

    let worker = Worker::<()>::new();
    let token = worker.cancellation_token().clone();

    {
        let guard = dialog.lock();
        guard
            .progress_changed
            .connect(|&current| println!("  [signal] progress: {current}"));
        let cancel_token = token.clone();
        guard.button_clicked.connect(move |&kind| {
            if kind == ButtonKind::Negative {
                cancel_token.cancel();
                println!("  [signal] cancel requested");
            }
        });
    }
    dialog.lock().show();

    // Times the export from first posted step to the final drain.
    let export_span = PerfSpan::new("export");

    let step_ui = ui.clone();
    let step_dialog = Arc::clone(&dialog);
    let step_token = token.clone();
    worker.send(move || {
        for step in 1..=8 {
            if step_token.is_cancelled() {
                return;
            }
            let dialog = Arc::clone(&step_dialog);
            let token = step_token.clone();
            step_ui.post(move || {
                if token.is_cancelled() {
                    return;
                }
                let mut dialog = dialog.lock();
                dialog.increment_progress();
                if step == 5 {
                    dialog.set_progress_message("Compressing output");
                }
            });
            thread::sleep(Duration::from_millis(5));
        }
    });

    // Drain posted steps until the bar fills. Nobody clicks cancel in this
    // run, so the token stays clear and every step applies.
    while dialog.lock().progress_current() != Some(8) {
        ui.process_all();
        thread::sleep(Duration::from_millis(2));
    }
    worker.stop_and_join();
    drop(export_span);

    {
        let dialog = dialog.lock();
        println!("  percent: {:?}", dialog.progress_percent());
        println!("  count:   {:?}", dialog.progress_count_text());
        println!("  message: {:?}", dialog.progress_message());
    }

    let done = DialogBuilder::new()
        .title("Export complete")
        .message("8 pages written.")
        .positive_button("Open")
        .neutral_button("Share")
        .negative_button("Close")
        .into_config()
        .expect("completion config is valid");
    dialog.lock().rebuild_with(done);

    {
        let dialog = dialog.lock();
        println!("  after rebuild_with:");
        println!("  title:   {:?}", dialog.title_bar().title);
        println!("  message: {:?}", dialog.message());
        println!("  still visible: {}", dialog.is_visible());
        println!("  has progress: {}", dialog.progress().is_some());
        print_buttons(&dialog);
    }
    dialog.lock().dismiss();
}

/// An edit field with a hint. The change signal fires only when the text
/// actually changes.
fn edit_field() {
    println!("\n=== Edit field ===");

    let mut dialog = DialogBuilder::new()
        .title("Rename device")
        .edit_field("Pixel 6")
        .edit_hint("Device name")
        .positive_button("Rename")
        .negative_button("Cancel")
        .on_edit_changed(|text| println!("  [listener] edit: {text:?}"))
        .build()
        .expect("edit config is valid");

    dialog.show();
    println!(
        "  text: {:?}, hint: {:?}",
        dialog.edit_text(),
        dialog.edit().and_then(|edit| edit.hint.as_deref())
    );

    dialog.set_edit_text("Kitchen tablet");
    dialog.set_edit_text("Kitchen tablet");
    println!("  text: {:?} (second set was a no-op)", dialog.edit_text());

    dialog.click_button(ButtonKind::Positive);
    dialog.dismiss();
}

/// A grid of tiles with per-item label colors, a title-bar checkbox, and a
/// busy spinner toggled by the dialog checkbox.
fn grid_and_title_controls() {
    println!("\n=== Grid, colors, and title controls ===");

    let tiles = vec![
        ListItem::new("Wi-Fi").with_icon(Icon::named("network-wireless")),
        ListItem::new("Bluetooth").with_icon(Icon::named("bluetooth")),
        ListItem::new("Offline")
            .with_icon(Icon::named("airplane-mode"))
            .with_label_color(Color::from_rgb8(220, 68, 55)),
        ListItem::new("Location")
            .with_icon(Icon::named("location"))
            .with_label_color(Color::from_rgb8(15, 157, 88)),
    ];

    let ui = UiHandle::new();
    let dialog = DialogBuilder::new()
        .theme(DialogTheme::Dark)
        .icon(Icon::named("settings"))
        .title("Quick settings")
        .subtitle("Radios and sensors")
        .title_checkbox("All radios", true)
        .list_items(ListStyle::Grid, tiles)
        .checkbox("Keep scanning", false)
        .positive_button("Done")
        .neutral_button("More")
        .negative_button("Reset")
        .build()
        .expect("grid config is valid")
        .into_shared();

    {
        let guard = dialog.lock();
        let spinner = Arc::clone(&dialog);
        guard.checkbox_toggled.connect_queued(&ui, move |&checked| {
            spinner.lock().set_title_spinner_visible(checked);
            println!("  [ui] title spinner set to {checked}");
        });
    }

    dialog.lock().show();
    print_rows(&dialog.lock());
    print_buttons(&dialog.lock());

    let view = dialog.lock().row(2, None);
    if let Some(label) = &view.label {
        println!("  row 2 label color: {:?}", label.color);
    }
    println!("  row 2 background:  {:?}", view.background);

    dialog.lock().set_checkbox_checked(true);
    ui.process_all();
    println!(
        "  spinner visible: {}",
        dialog.lock().title_bar().spinner_visible
    );

    dialog.lock().set_checkbox_checked(false);
    ui.process_all();
    println!(
        "  spinner visible: {}",
        dialog.lock().title_bar().spinner_visible
    );

    dialog.lock().dismiss();
}

/// One dialog carried through three phases: an indeterminate scan, a counted
/// pass, then a multi-choice confirmation whose title checkbox checks or
/// clears every row at once.
fn multi_phase_flow() {
    println!("\n=== Multi-phase flow ===");

    let mut dialog = DialogBuilder::new()
        .title("Device cleanup")
        .indeterminate_progress()
        .progress_message("Scanning for stale files")
        .build()
        .expect("scan config is valid");
    dialog.show();
    println!("  phase 1: spinner, message {:?}", dialog.progress_message());

    let counted = DialogBuilder::new()
        .title("Device cleanup")
        .horizontal_progress(4)
        .progress_message("Checking candidates")
        .into_config()
        .expect("counted config is valid");
    dialog.rebuild_with(counted);
    for _ in 0..4 {
        dialog.increment_progress();
    }
    println!(
        "  phase 2: {} ({:?}%)",
        dialog.progress_count_text().unwrap_or_default(),
        dialog.progress_percent()
    );

    let confirm = DialogBuilder::new()
        .title("Remove these files?")
        .title_checkbox("Select all", false)
        .multi_choice_items(
            ["cache.bin", "trace.old", "thumbs.db", "core.tmp"],
            &[true, false, false, false],
        )
        .positive_button("Remove")
        .negative_button("Keep")
        .into_config()
        .expect("confirm config is valid");
    dialog.rebuild_with(confirm);

    let ui = UiHandle::new();
    let shared = dialog.into_shared();
    {
        let guard = shared.lock();
        let all = Arc::clone(&shared);
        guard
            .title_checkbox_toggled
            .connect_queued(&ui, move |&checked| {
                all.lock().check_all(checked);
                println!("  [ui] select all set to {checked}");
            });
    }

    println!("  phase 3 before select-all:");
    print_rows(&shared.lock());

    shared.lock().set_title_checkbox_checked(true);
    ui.process_all();
    println!("  phase 3 after select-all:");
    print_rows(&shared.lock());
    println!(
        "  checked positions: {:?}",
        shared.lock().checked_positions()
    );

    shared.lock().click_button(ButtonKind::Positive);
    shared.lock().dismiss();
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("╔════════════════════════════════════════════╗");
    println!("║   Meridian Dialog Feature Showcase         ║");
    println!("║   Every dialog surface, driven headlessly  ║");
    println!("╚════════════════════════════════════════════╝");

    message_dialog();
    single_choice_list();
    multi_choice_list();
    shared_list_rebuild();
    indeterminate_progress();
    worker_progress();
    edit_field();
    grid_and_title_controls();
    multi_phase_flow();

    println!("\nAll showcase flows completed.");
}
