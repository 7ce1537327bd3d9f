use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keysuggest::core_types::Suggestion;
use keysuggest::policy::{GesturePolicy, TypingPolicy};
use keysuggest::profiler::OperationCounter;
use keysuggest::{CostPolicy, EditOperation, Modality};
use strum::IntoEnumIterator;

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_suggestions(input: &str, suggestions: &[Suggestion]) {
    println!("\nInput: {}", input);
    if suggestions.is_empty() {
        println!("(no suggestions)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Word").add_attribute(Attribute::Bold),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Spatial"),
        Cell::new("Lang"),
        Cell::new("Edits").fg(Color::Red),
        Cell::new("Prox"),
    ]);
    right_align(&mut table, 2..=6);

    for (rank, s) in suggestions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&s.word).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.4}", s.cost)).fg(Color::Cyan),
            Cell::new(format!("{:.4}", s.spatial_distance)),
            Cell::new(format!("{:.4}", s.language_distance)),
            Cell::new(s.edit_count).fg(Color::Red),
            Cell::new(s.proximity_count),
        ]);
    }
    println!("{}", table);
}

pub fn print_operation_counts(counter: &OperationCounter) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Operation").add_attribute(Attribute::Bold),
        Cell::new("Updates"),
    ]);
    right_align(&mut table, 1..=1);

    for (op, count) in counter.iter().filter(|(_, n)| *n > 0) {
        table.add_row(vec![Cell::new(op), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        Cell::new(counter.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{}", table);
}

fn yes_no(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("-")
    }
}

pub fn print_operation_table(only: Option<Modality>) {
    let typing = TypingPolicy::default();
    let gesture = GesturePolicy::default();

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Tag"),
        Cell::new("Operation").add_attribute(Attribute::Bold),
        Cell::new("Edit"),
        Cell::new("Forward"),
        Cell::new("Language"),
        Cell::new("Typing"),
        Cell::new("Gesture"),
    ]);
    right_align(&mut table, 3..=3);

    for op in EditOperation::iter() {
        let in_typing = typing.supports(op);
        let in_gesture = gesture.supports(op);
        let shown = match only {
            Some(Modality::Typing) => in_typing,
            Some(Modality::Gesture) => in_gesture,
            None => true,
        };
        if !shown {
            continue;
        }
        table.add_row(vec![
            Cell::new(op.tag()),
            Cell::new(op).add_attribute(Attribute::Bold),
            yes_no(op.is_edit_correction()),
            Cell::new(op.forward_input_count()),
            yes_no(op.has_language_cost()),
            yes_no(in_typing),
            yes_no(in_gesture),
        ]);
    }
    println!("{}", table);
}
