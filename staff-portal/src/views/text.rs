//! Plain-text drawing of pages and toasts for the console

use super::{BannerKind, Block, Page, Table};
use crate::auth::Presentation;
use crate::toast::Toast;
use std::fmt::Write;

/// Navigation bar: the label plus the links the presentation flags allow
pub fn render_nav(label: &str, presentation: Presentation) -> String {
    let mut links = vec!["home"];
    if presentation.authenticated {
        links.extend(["profile", "requests"]);
        if presentation.is_admin {
            links.extend(["accounts", "departments", "employees"]);
        }
        links.push("logout");
    } else {
        links.extend(["register", "login"]);
    }
    format!("[{label}]  {}", links.join(" | "))
}

pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", page.title, page.route.fragment());
    for block in &page.blocks {
        match block {
            Block::Heading(text) => {
                let _ = writeln!(out, "\n{text}\n{}", "-".repeat(text.chars().count()));
            }
            Block::Text(text) => {
                let _ = writeln!(out, "{text}");
            }
            Block::Banner { kind, text } => {
                let tag = match kind {
                    BannerKind::Success => "OK",
                    BannerKind::Info => "i",
                };
                let _ = writeln!(out, "[{tag}] {text}");
            }
            Block::Fields(fields) => {
                let width = fields.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
                for (label, value) in fields {
                    let _ = writeln!(out, "{label:<width$} : {value}");
                }
            }
            Block::Table(table) => out.push_str(&render_table(table)),
            Block::Actions(actions) => {
                for action in actions {
                    let _ = writeln!(out, "  > {:<28} `{}`", action.label, action.command);
                }
            }
        }
    }
    out
}

fn render_table(table: &Table) -> String {
    let mut out = String::new();
    if table.is_empty() {
        let _ = writeln!(out, "{}", table.headers.join(" | "));
        let _ = writeln!(out, "{}", table.empty);
        return out;
    }

    let cell_text = |row: &super::Row, i: usize| -> String {
        row.cells
            .get(i)
            .map(|c| match c.badge {
                Some(_) => format!("[{}]", c.text),
                None => c.text.clone(),
            })
            .unwrap_or_default()
    };

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, w) in widths.iter_mut().enumerate() {
            *w = (*w).max(cell_text(row, i).chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let _ = writeln!(out, "{}", line(table.headers.clone()).trim_end());
    let separator = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-");
    let _ = writeln!(out, "{}", separator.trim_end());
    for row in &table.rows {
        let cells = (0..widths.len()).map(|i| cell_text(row, i)).collect();
        let mut text = line(cells);
        if !row.actions.is_empty() {
            let commands = row
                .actions
                .iter()
                .map(|a| a.command.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(text, "   ({commands})");
        }
        let _ = writeln!(out, "{}", text.trim_end());
    }
    out
}

pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|t| format!("({}) {}\n", t.kind, t.message))
        .collect()
}
