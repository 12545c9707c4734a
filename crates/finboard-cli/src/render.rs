//! Terminal rendering of a derived dashboard
//!
//! [`render_frame`] turns a [`Dashboard`] into text; [`Screen`] owns the
//! output stream and replaces the previous frame with each new one.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use finboard_core::models::{AlertKind, BudgetStatus, Outlook};
use finboard_core::palette::{category_color, hex_to_rgb};
use finboard_core::{Dashboard, DisplayConfig};

/// Width of share and budget bars in cells
const BAR_WIDTH: usize = 24;

const CLEAR: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

/// Owns the terminal for the dashboard
pub struct Screen<W: Write> {
    out: W,
    display: DisplayConfig,
    color: bool,
    drawn: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, display: DisplayConfig, color: bool) -> Self {
        Self {
            out,
            display,
            color,
            drawn: false,
        }
    }

    /// Draw `dashboard`, clearing whatever the last call drew
    pub fn render(&mut self, dashboard: &Dashboard) -> io::Result<()> {
        let frame = render_frame(dashboard, &self.display, self.color)
            .map_err(io::Error::other)?;
        self.draw(&frame)
    }

    /// Draw an error frame in place of the dashboard
    pub fn render_error(&mut self, message: &str) -> io::Result<()> {
        let frame = format!("\n  🚨 {}\n", message);
        self.draw(&frame)
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.drawn && self.color {
            self.out.write_all(CLEAR.as_bytes())?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render one dashboard frame
pub fn render_frame(
    dashboard: &Dashboard,
    display: &DisplayConfig,
    color: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_frame(&mut out, dashboard, display, color)?;
    Ok(out)
}

fn write_frame(
    out: &mut String,
    dashboard: &Dashboard,
    display: &DisplayConfig,
    color: bool,
) -> fmt::Result {
    let money = |amount: f64| display.money(amount);

    writeln!(out)?;
    writeln!(out, "╭─────────────────────────────────────────╮")?;
    writeln!(out, "│          💰 finboard · {}        │", dashboard.as_of)?;
    writeln!(out, "╰─────────────────────────────────────────╯")?;

    if let finboard_core::DataSource::Sample { reason } = &dashboard.source {
        writeln!(out)?;
        writeln!(out, "  ⚠️  SAMPLE DATA - the financial API is unavailable")?;
        writeln!(out, "     {}", reason)?;
    }

    let summary = &dashboard.summary;
    writeln!(out)?;
    writeln!(out, "  📈 Income:     {:>14}", money(summary.total_income))?;
    writeln!(out, "  📉 Expenses:   {:>14}", money(summary.total_expenses))?;
    writeln!(out, "  💼 Balance:    {:>14}", money(summary.available_balance))?;

    section(out, "🔔 Alerts")?;
    for alert in &dashboard.alerts {
        let tag = match alert.kind {
            AlertKind::Danger => "[!!]",
            AlertKind::Warning => "[! ]",
            AlertKind::Positive => "[ok]",
            AlertKind::Info => "[i ]",
        };
        writeln!(out, "     {} {} {}", tag, alert.icon, alert.message)?;
    }

    section(out, "🥧 Spending by category")?;
    if dashboard.categories.is_empty() {
        writeln!(out, "     No category data")?;
    }
    for expense in &dashboard.categories {
        let bar = bar(expense.percentage, BAR_WIDTH);
        writeln!(
            out,
            "     {:<18} {} {:>6.1}%  {:>12}",
            truncate(&expense.category, 18),
            paint(&bar, category_color(&expense.category), color),
            expense.percentage,
            money(expense.amount)
        )?;
    }

    section(out, "🎯 Budgets")?;
    for budget in &dashboard.budgets {
        let marker = match budget.status {
            BudgetStatus::Ok => "🟢",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::Exceeded => "🔴",
        };
        let icon = budget.icon.as_deref().unwrap_or("•");
        writeln!(
            out,
            "     {} {} {:<16} {} {:>5.0}%  {} / {}",
            marker,
            icon,
            truncate(&budget.category, 16),
            bar(budget.percentage, BAR_WIDTH),
            budget.raw_percentage,
            money(budget.spent),
            money(budget.limit)
        )?;
    }

    let projection = &dashboard.projection;
    section(
        out,
        &format!(
            "🔮 Month-end projection (day {} of {})",
            projection.days_elapsed, projection.days_in_month
        ),
    )?;
    for scenario in projection.scenarios() {
        writeln!(
            out,
            "     {:<12} {:>14}  (×{:.1} spending)",
            scenario.kind.label(),
            money(scenario.projected_balance),
            scenario.factor
        )?;
    }
    writeln!(
        out,
        "     Daily spend: {} now, {} recommended",
        money(projection.daily_expense_rate),
        money(projection.recommended_daily_spend)
    )?;
    match projection.outlook {
        Outlook::OnTrack => writeln!(out, "     ✅ On track to finish the month in the black"),
        Outlook::Shortfall { amount } => {
            writeln!(out, "     ⚠️  Projected shortfall of {}", money(amount))
        }
        Outlook::MonthClosed => writeln!(out, "     🏁 Last day of the month: the balance is final"),
    }
}

/// Blank line, indented title and rule
fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "     ─────────────────────────────")
}

/// Filled/empty bar for a percentage in [0, 100]
fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Wrap `text` in a truecolor escape for `hex`
fn paint(text: &str, hex: &str, color: bool) -> String {
    match (color, hex_to_rgb(hex)) {
        (true, Some((r, g, b))) => format!("\x1b[38;2;{};{};{}m{}{}", r, g, b, text, RESET),
        _ => text.to_string(),
    }
}

/// Truncate to `max` characters with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
