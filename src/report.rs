//! Human-readable text rendering of a shopping list.
//!
//! The output is meant for people and is never parsed back.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::config::CURRENCY_SYMBOL;
use crate::models::{timestamp, Item};

/// `<name> (数量: <qty>) - ¥<price>`, without the price segment when the
/// price is not tracked.
pub fn item_line(item: &Item) -> String {
    let mut line = format!("{} (数量: {})", item.name, item.quantity);
    if let Some(price) = item.price {
        let _ = write!(line, " - {CURRENCY_SYMBOL}{price}");
    }
    line
}

/// Render the full report.
///
/// The completed section is left out when nothing has been completed, and
/// the total line when the total is zero.
pub fn render(
    pending: &[Item],
    completed: &[Item],
    total: f64,
    created_at: &NaiveDateTime,
) -> String {
    let mut out = String::new();
    out.push_str("=== 買い物リスト ===\n");
    let _ = writeln!(out, "作成日時: {}", timestamp::format(created_at));
    out.push('\n');

    out.push_str("【未完了アイテム】\n");
    for (i, item) in pending.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item_line(item));
    }

    if !completed.is_empty() {
        out.push_str("\n【完了済みアイテム】\n");
        for item in completed {
            let _ = writeln!(out, "✓ {}", item_line(item));
        }
    }

    if total > 0.0 {
        let _ = writeln!(out, "\n合計金額: {CURRENCY_SYMBOL}{total}");
    }
    out
}
