// src/symbols.rs

use colored::{ColoredString, Colorize};
use std::sync::LazyLock;

pub static OK: LazyLock<ColoredString> = LazyLock::new(|| "[OK]".green());
pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static INFO: LazyLock<ColoredString> = LazyLock::new(|| "[i]".cyan());
pub static WARN: LazyLock<ColoredString> = LazyLock::new(|| "[!]".yellow());
pub static CTRL_C: LazyLock<ColoredString> = LazyLock::new(|| "Ctrl+C".yellow());

// 分类标签
pub static IMAGE: LazyLock<ColoredString> = LazyLock::new(|| "[IMAGE]".magenta());
pub static VIDEO: LazyLock<ColoredString> = LazyLock::new(|| "[VIDEO]".blue());
pub static NEWS: LazyLock<ColoredString> = LazyLock::new(|| "[NEWS]".cyan());
pub static UNRECOGNIZED: LazyLock<ColoredString> = LazyLock::new(|| "[?]".red());
