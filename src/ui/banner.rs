// Thu Feb 12 2026 - Alex

use colored::*;

pub struct Banner;

impl Banner {
    pub fn print() {
        let width = 60;
        let line = "=".repeat(width);

        println!("{}", line.cyan());
        println!("{}", Self::center("ART Offset Prober", width).cyan().bold());
        println!(
            "{}",
            Self::center("field layout across AOSP history", width).cyan()
        );
        println!("{}", line.cyan());
        println!();
    }

    fn center(text: &str, width: usize) -> String {
        if text.len() >= width {
            return text.to_string();
        }
        let padding = (width - text.len()) / 2;
        format!("{}{}", " ".repeat(padding), text)
    }
}
