//! Plain-text rendering of the grid and form panels.

use super::{
    form::{FormView, PROCESSING},
    grid::{GridView, COLUMNS},
};
use crate::users::User;
use std::fmt::Write;

/// Shown in place of a panel while a request is outstanding.
#[must_use]
pub fn processing() -> String {
    format!("[ {PROCESSING} ]")
}

fn banner(out: &mut String, message: Option<&str>) {
    if let Some(message) = message {
        let _ = writeln!(out, "! {message}");
    }
}

fn cells(user: &User) -> [String; 5] {
    [
        user.id.to_string(),
        user.first_name.clone(),
        user.last_name.clone(),
        user.email.clone(),
        if user.active { "yes" } else { "no" }.to_string(),
    ]
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

#[must_use]
pub fn grid(view: &GridView) -> String {
    let mut out = String::new();
    banner(&mut out, view.banner.as_deref());

    let _ = writeln!(
        out,
        "{} {} {}",
        button("New", view.buttons.new),
        button("Edit", view.buttons.edit),
        button("Delete", view.buttons.delete)
    );

    let rows: Vec<[String; 5]> = view.rows.iter().map(cells).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect();
    let _ = writeln!(out, "  {}", header.join(" | "));

    if rows.is_empty() {
        let _ = writeln!(out, "  No users found.");
    }

    for (user, row) in view.rows.iter().zip(&rows) {
        let marker = if view.selected == Some(user.id) { '>' } else { ' ' };
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{marker} {}", line.join(" | "));
    }

    let _ = writeln!(
        out,
        "  page {}/{} ({} per page, {} total)",
        view.page + 1,
        view.page_count,
        view.page_size,
        view.total
    );

    if let Some(dialog) = &view.dialog {
        let _ = writeln!(out, "== {} ==", dialog.title);
        let _ = writeln!(out, "{}", dialog.message);
        let _ = writeln!(out, "[Cancel] [Delete]");
    }

    out
}

#[must_use]
pub fn form(view: &FormView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);
    banner(&mut out, view.banner.as_deref());

    for field in &view.fields {
        let required = if field.required { "*" } else { "" };
        let lock = if field.disabled { " (read-only)" } else { "" };
        let _ = writeln!(out, "{}{required}: {}{lock}", field.label, field.value);
        if let Some(error) = &field.error {
            let _ = writeln!(out, "    ^ {error}");
        }
    }
    let _ = writeln!(
        out,
        "Active: {}",
        if view.active { "on" } else { "off" }
    );

    let action = if view.danger {
        format!("[{}!]", view.action)
    } else {
        format!("[{}]", view.action)
    };
    let _ = writeln!(out, "{action} [Back]");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{
        controller::{
            tests::{seeded, FakeApi},
            Controller,
        },
        grid::Pager,
    };

    #[tokio::test]
    async fn grid_marks_selection_and_disabled_buttons() {
        let mut controller = Controller::new(FakeApi::with_users(seeded()));
        assert!(controller.load().await);

        let text = grid(&GridView::new(&controller, &Pager::default()));
        assert!(text.contains("[New] (Edit) (Delete)"));
        assert!(text.contains("grace@example.com"));
        assert!(text.contains("page 1/1"));

        assert_eq!(controller.select(Some(2)), Ok(()));
        let text = grid(&GridView::new(&controller, &Pager::default()));
        assert!(text.contains("[New] [Edit] [Delete]"));
        assert!(text
            .lines()
            .any(|line| line.starts_with('>') && line.contains("Grace")));
    }

    #[tokio::test]
    async fn empty_grid_says_so() {
        let mut controller = Controller::new(FakeApi::default());
        assert!(controller.load().await);
        let text = grid(&GridView::new(&controller, &Pager::default()));
        assert!(text.contains("No users found."));
    }

    #[tokio::test]
    async fn form_shows_errors_under_fields() {
        let mut controller = Controller::new(FakeApi::with_users(seeded()));
        controller.enter_new();
        controller.set_first_name("J");

        let view = FormView::new(&controller, false);
        let text = view.as_ref().map(form).unwrap_or_default();
        assert!(text.contains("== New User =="));
        assert!(text.contains("^ First name must be at least 2 characters"));
        assert!(text.contains("[Create] [Back]"));
    }
}
