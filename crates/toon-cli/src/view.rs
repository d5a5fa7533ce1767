//! Table rendering for catalog and shelf listings.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use toon_model::{Genre, Series, UserState, format_age, format_count};
use toon_state::Library;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per series, with the reader's flags and unread count.
pub fn series_table(series: &[&Series], library: &Library<'_>, state: &UserState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Author"),
        header_cell("Genre"),
        header_cell("Status"),
        header_cell("Rating"),
        header_cell("Subscribers"),
        header_cell("Unread"),
        header_cell("Sub"),
        header_cell("Fav"),
    ]);
    apply_table_style(&mut table);
    for index in [0, 6, 7, 8] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 9, CellAlignment::Center);
    align_column(&mut table, 10, CellAlignment::Center);
    for series in series {
        table.add_row(vec![
            series.rank.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&series.id),
            Cell::new(&series.title).add_attribute(Attribute::Bold),
            Cell::new(&series.author),
            Cell::new(&series.genre),
            Cell::new(series.status),
            Cell::new(format!("{:.2}", series.rating)),
            Cell::new(format_count(series.subscribers)),
            unread_cell(library.unread_count(&series.id)),
            flag_cell(state.is_subscribed(&series.id), Color::Green),
            flag_cell(state.is_favorite(&series.id), Color::Red),
        ]);
    }
    table
}

/// Episodes of one series, marking the ones already read.
pub fn episode_table(series: &Series, state: &UserState, today: NaiveDate) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Uploaded"),
        header_cell("Likes"),
        header_cell("Panels"),
        header_cell("Read"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for episode in &series.episodes {
        let uploaded = match episode.upload_date() {
            Ok(date) => Cell::new(format_age(date, today)),
            Err(_) => dim_cell(&episode.upload_date),
        };
        table.add_row(vec![
            Cell::new(episode.number),
            Cell::new(&episode.id),
            Cell::new(&episode.title),
            uploaded,
            Cell::new(format_count(episode.likes)),
            Cell::new(episode.panel_count()),
            flag_cell(state.has_read(&episode.id), Color::Green),
        ]);
    }
    table
}

pub fn genre_table(genres: &[Genre]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Genre"),
        header_cell("Titles"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for genre in genres {
        table.add_row(vec![
            Cell::new(&genre.id),
            Cell::new(format!("{} {}", genre.icon, genre.name)),
            Cell::new(format_count(u64::from(genre.count))),
        ]);
    }
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn flag_cell(set: bool, color: Color) -> Cell {
    if set {
        Cell::new("✓").fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn unread_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}
