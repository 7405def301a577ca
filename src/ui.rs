// src/ui.rs

use crate::{constants, models::Category, symbols, utils};
use colored::*;

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

/// 一条分类结果，例如 `[VIDEO] B17_2: https://...`
pub fn print_link_line(category: Category, stem: &str, url: &str) {
    println!("{} {}: {}", category.symbol(), stem, utils::display_url(url));
}

pub fn print_failure_line(stem: &str, url: &str, reason: &str) {
    println!(
        "{} {}: {} ({})",
        *symbols::ERROR,
        stem,
        utils::display_url(url),
        reason.red()
    );
}
