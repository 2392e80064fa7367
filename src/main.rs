//! svgpager – command-line content stream → SVG pages.
//!
//! Usage:
//!   svgpager <contents.json> [out_dir] [--options opts.json] [--font family[:bold]=path.ttf]
//!
//! `contents.json` holds a JSON array of content items. If `out_dir` is
//! omitted the pages are written next to the input file into a directory
//! named after its stem (e.g. `chapter1.json` → `chapter1/page-1.svg`).

use std::{env, fs, path::PathBuf, process};

use svg_pager::{Content, FontManager, SvgRender, SvgRenderOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut options_path: Option<PathBuf> = None;
    let mut fonts: Vec<(String, bool, PathBuf)> = Vec::new();
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--options" | "-o" => match iter.next() {
                Some(v) => options_path = Some(PathBuf::from(v)),
                None => fail(&args[0], "--options needs a file"),
            },
            "--font" | "-f" => match iter.next().and_then(|v| v.split_once('=')) {
                Some((family, path)) => {
                    let (family, bold) = match family.strip_suffix(":bold") {
                        Some(f) => (f, true),
                        None => (family, false),
                    };
                    fonts.push((family.to_string(), bold, PathBuf::from(path)));
                }
                None => fail(&args[0], "--font needs family[:bold]=path.ttf"),
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => fail(&args[0], &format!("Unknown flag: {other}")),
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_dir = Some(PathBuf::from(path));
                } else {
                    fail(&args[0], &format!("Unexpected argument: {path}"));
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => fail(&args[0], "Error: no input file specified."),
    };

    // Default output: same directory + stem of the input.
    let output = output_dir.unwrap_or_else(|| input.with_extension(""));

    let contents = match fs::read_to_string(&input)
        .map_err(|e| e.to_string())
        .and_then(|s| Content::list_from_json(&s))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let options = match &options_path {
        Some(path) => match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| SvgRenderOptions::from_json(&s))
        {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Error reading options '{}': {e}", path.display());
                process::exit(1);
            }
        },
        None => SvgRenderOptions::default(),
    };

    let mut manager = FontManager::new();
    for (family, bold, path) in &fonts {
        let loaded = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| manager.load_font(family, *bold, bytes));
        if let Err(e) = loaded {
            eprintln!("Error loading font '{}': {e}", path.display());
            process::exit(1);
        }
    }
    if manager.face_count() == 0 {
        log::info!("no font faces loaded, measuring with width heuristics");
    } else {
        log::info!("{} font face(s) loaded", manager.face_count());
    }

    let mut render = match SvgRender::new(options, manager) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = render.add_contents(&contents) {
        eprintln!("Error laying out '{}': {e}", input.display());
        process::exit(1);
    }
    for warning in render.warnings() {
        eprintln!("warning: {warning}");
    }

    if let Err(e) = fs::create_dir_all(&output) {
        eprintln!("Error creating output directory: {e}");
        process::exit(1);
    }
    let pages = render.into_pages();
    for page in &pages {
        let path = output.join(format!("page-{}.svg", page.index() + 1));
        if let Err(e) = fs::write(&path, page.svg()) {
            eprintln!("Error writing '{}': {e}", path.display());
            process::exit(1);
        }
    }
    eprintln!(
        "Wrote {} page{} to '{}'",
        pages.len(),
        if pages.len() == 1 { "" } else { "s" },
        output.display()
    );
}

fn fail(prog: &str, msg: &str) -> ! {
    eprintln!("{msg}");
    print_usage(prog);
    process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("svgpager – lay out a content stream into SVG pages (svg-pager)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  {prog} <contents.json> [out_dir] [--options opts.json] [--font family[:bold]=path.ttf]"
    );
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <contents.json>  JSON array of content items");
    eprintln!("  [out_dir]        Output directory (default: input path without extension)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --options, -o    JSON render options; missing fields use defaults");
    eprintln!("  --font, -f       Load a TrueType/OpenType face for a family (repeatable);");
    eprintln!("                   `family:bold=path` registers the bold face used by headings");
    eprintln!("  --help           Print this message");
}
