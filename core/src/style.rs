use std::{collections::HashMap, path::Path, time::Duration};

use colored::{Color, ColoredString, Colorize};

use crate::testing::{CaseResult, CaseStatus, JudgeCode};

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    match v.as_str() {
        "truecolor" | "24bit" => true,
        _ => false,
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for JudgeCode {
    fn color(&self) -> Color {
        use JudgeCode::*;
        if !self::is_truecolor_supported() {
            return match self {
                OK => Color::Green,
                WA => Color::Yellow,
                TLE => Color::Red,
                RE => Color::Magenta,
            };
        }

        match self {
            OK => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WA => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TLE => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RE => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
        }
    }
}

pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {:<4} ", judge.to_string())
        .on_color(judge.color())
        .bold()
        .color(fg)
}

/// `1536` => `"1.50 KiB"`
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.2} {}", value, unit)
}

pub fn memory_cell(memory_usage: Option<u64>) -> String {
    memory_usage.map_or_else(|| "unsupported".to_owned(), human_bytes)
}

/// Seconds with two decimals, e.g. `"0.25s"`.
pub fn seconds_cell(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

fn dir_cell(dir: Option<&Path>) -> String {
    dir.map_or_else(|| ".".to_owned(), |d| d.to_string_lossy().into_owned())
}

fn print_header_row(cells: &[(&str, String)]) {
    let widths: Vec<usize> = cells.iter().map(|(k, v)| k.len().max(v.len())).collect();
    let keys: Vec<String> = cells
        .iter()
        .zip(&widths)
        .map(|((k, _), &w)| format!("{:<w$}", k, w = w))
        .collect();
    let values: Vec<String> = cells
        .iter()
        .zip(&widths)
        .map(|((_, v), &w)| format!("{:<w$}", v, w = w))
        .collect();
    println!("{}", keys.join(" | ").cyan().bold());
    println!("{}", values.join(" | "));
    println!();
}

pub fn print_test_header(program: &Path, dir: Option<&Path>, n: usize) {
    print_header_row(&[
        ("Program", program.to_string_lossy().into_owned()),
        ("Directory", dir_cell(dir)),
        ("Tests", n.to_string()),
    ]);
}

pub fn print_generate_header(program: &Path, generator: &Path, dir: Option<&Path>, n: usize) {
    print_header_row(&[
        ("Program", program.to_string_lossy().into_owned()),
        ("Generator", generator.to_string_lossy().into_owned()),
        ("Directory", dir_cell(dir)),
        ("Tests", n.to_string()),
    ]);
}

pub fn generate_summary(created_tests: usize) -> String {
    format!("{} test(s) has been created.", created_tests)
}

pub fn print_generate_summary(created_tests: usize) {
    let msg = self::generate_summary(created_tests);
    if created_tests > 0 {
        println!("{}", msg.green());
    } else {
        println!("{}", msg.bright_red());
    }
}

pub fn print_result_table(results: &[CaseResult]) {
    if results.is_empty() {
        return;
    }
    let index_width = results
        .iter()
        .map(|r| r.testcase.index().to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);

    println!(
        "{}",
        format!(
            "{:>iw$}  {:<6}  {:>8}  {:>11}",
            "#",
            "Status",
            "Time",
            "Memory",
            iw = index_width
        )
        .cyan()
        .bold()
    );

    for r in results {
        match &r.status {
            CaseStatus::Judged(outcome) => println!(
                "{:>iw$}  {}  {:>8}  {:>11}",
                r.testcase.index(),
                judge_icon(outcome.judge),
                seconds_cell(outcome.execution_time),
                memory_cell(outcome.memory_usage),
                iw = index_width
            ),
            CaseStatus::CannotOpen(path) => println!(
                "{:>iw$}  {}  {}",
                r.testcase.index(),
                " --   ".dimmed(),
                format!("Cannot open {}", path.to_string_lossy()).bright_red(),
                iw = index_width
            ),
        }
    }
}

pub fn print_test_result_summary(results: &[CaseResult]) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let mut count: HashMap<Option<JudgeCode>, usize> = HashMap::new();
    for r in results {
        *count.entry(r.judge()).or_default() += 1;
    }

    let num_total_test = results.len();
    let num_passed = *count.get(&Some(JudgeCode::OK)).unwrap_or(&0);
    let num_failed = num_total_test - num_passed;

    if num_passed == num_total_test {
        let msg = format!("All {} tests passed", num_total_test);
        print!("{}", msg.green());
    } else {
        let summary_msg = if num_passed > 0 {
            format!("{}/{} tests failed", num_failed, num_total_test)
        } else {
            format!("All {} tests failed", num_total_test)
        };

        let mut details: Vec<_> = count
            .iter()
            .filter(|(&judge, _)| judge != Some(JudgeCode::OK))
            .map(|(&judge, &cnt)| (judge, cnt))
            .collect();
        details.sort_by_key(|(judge, _)| judge.map(|j| j.to_string()));

        let detail_msg = details
            .into_iter()
            .map(|(judge, cnt)| {
                let icon = match judge {
                    Some(judge) => judge_icon(judge),
                    None => " --   ".dimmed(),
                };
                format!("{}{}{}", icon, "x".dimmed(), cnt.to_string().bold().bright_white())
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", summary_msg.bright_red(), detail_msg);
    }

    println!(" {}", bar);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn human_bytes_should_pick_unit() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(1023), "1023 B");
        assert_eq!(human_bytes(1536), "1.50 KiB");
        assert_eq!(human_bytes(256 * 1024 * 1024), "256.00 MiB");
        assert_eq!(human_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }

    #[test]
    fn unmeasured_memory_should_be_unsupported() {
        assert_eq!(memory_cell(None), "unsupported");
        assert_eq!(memory_cell(Some(2048)), "2.00 KiB");
    }

    #[test]
    fn generate_summary_wording() {
        assert_eq!(generate_summary(1), "1 test(s) has been created.");
        assert_eq!(generate_summary(0), "0 test(s) has been created.");
    }

    #[test]
    fn seconds_should_have_two_decimals() {
        assert_eq!(seconds_cell(Duration::from_millis(0)), "0.00s");
        assert_eq!(seconds_cell(Duration::from_millis(1234)), "1.23s");
        assert_eq!(seconds_cell(Duration::from_secs(10)), "10.00s");
    }
}
