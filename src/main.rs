use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use is_terminal::IsTerminal;
use minus::Pager;
use sesdiff::artifacts::core::PagerWriter;
use sesdiff::artifacts::diff::{DiffOptions, Edit, Element, MyersDiff, Operation};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "sesdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Show the shortest edit script between two files",
    long_about = "This command computes the shortest edit script turning OLD into NEW \
    and prints every edit on its own line(s), prefixed with ' ' (equal), '+' (insert) \
    or '-' (remove). Boundaries are moved to human-friendly positions unless \
    --no-semantic is given.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(index = 1, help = "The original file")]
    old: PathBuf,
    #[arg(index = 2, help = "The modified file")]
    new: PathBuf,
    #[arg(long, value_enum, default_value_t = Mode::Chars, help = "Granularity of the diff")]
    mode: Mode,
    #[arg(long, help = "Keep the minimal edit script, skip the semantic cleanup")]
    no_semantic: bool,
    #[arg(long, help = "Never diff line by line first, even for large text")]
    no_line_mode: bool,
    #[arg(long, value_name = "N", help = "Minimum size of both inputs before line-mode kicks in")]
    line_threshold: Option<usize>,
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, help = "When to color the output")]
    color: ColorChoice,
    #[arg(long, help = "Only print a summary of unchanged, inserted and removed elements")]
    stat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Chars,
    Bytes,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// An edit rendered to text, ready to be printed
struct RenderedEdit {
    operation: Operation,
    text: String,
    size: usize,
}

impl RenderedEdit {
    fn from_edit<T>(edit: &Edit<T>, render: impl Fn(&[T]) -> String) -> Self {
        Self {
            operation: edit.operation,
            text: render(&edit.segment),
            size: edit.len(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = std::io::stdout().is_terminal();
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => colored::control::set_override(interactive),
    }

    let mut options = DiffOptions::default().with_line_mode(!cli.no_line_mode);
    if let Some(threshold) = cli.line_threshold {
        options = options.with_line_mode_min_size(threshold);
    }

    let edits = match cli.mode {
        Mode::Chars => {
            let old: Vec<char> = read_text(&cli.old)?.chars().collect();
            let new: Vec<char> = read_text(&cli.new)?.chars().collect();
            run_diff(&old, &new, options, !cli.no_semantic, |segment| {
                segment.iter().collect()
            })
        }
        Mode::Bytes => {
            let old = read_bytes(&cli.old)?;
            let new = read_bytes(&cli.new)?;
            run_diff(&old, &new, options, !cli.no_semantic, |segment| {
                String::from_utf8_lossy(segment).into_owned()
            })
        }
        Mode::Lines => {
            let old_text = read_text(&cli.old)?;
            let new_text = read_text(&cli.new)?;
            let old: Vec<&str> = old_text.split_inclusive('\n').collect();
            let new: Vec<&str> = new_text.split_inclusive('\n').collect();
            run_diff(&old, &new, options, !cli.no_semantic, |segment| {
                segment.concat()
            })
        }
    };

    let paged = interactive && std::env::var_os("NO_PAGER").is_none();
    if paged {
        let mut writer = PagerWriter::new(Pager::new());
        print_output(&mut writer, &edits, cli.stat)?;
        minus::page_all(writer.pager().clone()).context("failed to run the pager")?;
    } else {
        let mut writer = std::io::stdout().lock();
        print_output(&mut writer, &edits, cli.stat)?;
        writer.flush()?;
    }

    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_diff<T: Element>(
    old: &[T],
    new: &[T],
    options: DiffOptions,
    semantic: bool,
    render: impl Fn(&[T]) -> String,
) -> Vec<RenderedEdit> {
    let diff = MyersDiff::new(old, new).with_options(options);
    let script = if semantic {
        diff.diff_semantic()
    } else {
        diff.diff()
    };

    script
        .iter()
        .map(|edit| RenderedEdit::from_edit(edit, &render))
        .collect()
}

fn print_output(writer: &mut impl Write, edits: &[RenderedEdit], stat: bool) -> Result<()> {
    if stat {
        return print_stat(writer, edits);
    }

    for edit in edits {
        print_edit(writer, edit)?;
    }

    Ok(())
}

/// Prints every line of the edit prefixed with the operation symbol
fn print_edit(writer: &mut impl Write, edit: &RenderedEdit) -> Result<()> {
    let symbol = edit.operation.symbol();

    for line in edit.text.split_inclusive('\n') {
        let line = format!("{symbol}{}", line.strip_suffix('\n').unwrap_or(line));
        match edit.operation {
            Operation::Insert => writeln!(writer, "{}", line.green())?,
            Operation::Remove => writeln!(writer, "{}", line.red())?,
            Operation::Equal => writeln!(writer, "{line}")?,
        }
    }

    Ok(())
}

fn print_stat(writer: &mut impl Write, edits: &[RenderedEdit]) -> Result<()> {
    let total = |operation: Operation| -> usize {
        edits
            .iter()
            .filter(|edit| edit.operation == operation)
            .map(|edit| edit.size)
            .sum()
    };

    writeln!(
        writer,
        "{} edits, {} unchanged, {} inserted(+), {} removed(-)",
        edits.len(),
        total(Operation::Equal),
        format!("{}", total(Operation::Insert)).green(),
        format!("{}", total(Operation::Remove)).red(),
    )?;

    Ok(())
}
