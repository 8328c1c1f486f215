// Copyright 2018 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;

use textpath::fontdb;
use textpath::kurbo::Point;
use textpath::text::{Font, FontShaper};
use textpath::{AlignmentMode, LayoutOptions, Shaper};
use textpath_render::svg::GuideStroke;
use textpath_render::{Shadow, TextStyle};

const HELP: &str = "\
textpath lays out text along an SVG path and renders it.

USAGE:
  textpath [OPTIONS] <text> <out.png|out.svg>

  textpath --path 'M 30 30 Q 80 40 95 100' 'Hello, World!' out.png

OPTIONS:
  -h, --help                Prints help information
  -V, --version             Prints version information

  --path DATA               SVG path data the text follows [required]
  --font PATH               Font file to use
  --family NAME             Font family to use [default: sans-serif]
  --size NUM                Font size [default: 14]
  --embolden                Emulates a bold face

  --align ALIGN             Text alignment along the path
                            [default: center] [possible values: start, center, end]
  --offset NUM              Baseline shift along the path normal [default: 0]
  --origin-x NUM            Run origin X [default: 0]
  --origin-y NUM            Run origin Y [default: 0]
  --tolerance NUM           Path flattening tolerance [default: 0.1]

  --color COLOR             Text color [default: black]
  --background COLOR        Background color
  --guide COLOR             Strokes the path with the specified color
  --guide-width NUM         Guide stroke width [default: 1]

  --shadow-color COLOR      Enables a drop shadow of the specified color
  --shadow-blur NUM         Shadow blur radius, up to 512 [default: 2.5]
  --shadow-dx NUM           Shadow horizontal offset [default: 0]
  --shadow-dy NUM           Shadow vertical offset [default: 0]

  -w, --width LENGTH        Output width [default: 500]
  --height LENGTH           Output height [default: 400]

  --quiet                   Disables warnings

ARGS:
  <text>                    Text to render
  <out.png|out.svg>         Output file. The format is derived from the extension
";

#[derive(Debug)]
struct Args {
    path: String,
    font: Option<PathBuf>,
    family: Option<String>,
    size: f32,
    embolden: bool,
    align: AlignmentMode,
    offset: f64,
    origin: Point,
    tolerance: f64,
    color: svgtypes::Color,
    background: Option<svgtypes::Color>,
    guide: Option<svgtypes::Color>,
    guide_width: f32,
    shadow_color: Option<svgtypes::Color>,
    shadow_blur: f32,
    shadow_dx: f32,
    shadow_dy: f32,
    width: u32,
    height: u32,
    quiet: bool,
    text: String,
    output: PathBuf,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(Args {
        path: input.value_from_str("--path")?,
        font: input.opt_value_from_str("--font")?,
        family: input.opt_value_from_str("--family")?,
        size: input.opt_value_from_fn("--size", parse_positive)?.unwrap_or(14.0),
        embolden: input.contains("--embolden"),
        align: input
            .opt_value_from_fn("--align", parse_align)?
            .unwrap_or_default(),
        offset: input.opt_value_from_str("--offset")?.unwrap_or(0.0),
        origin: Point::new(
            input.opt_value_from_str("--origin-x")?.unwrap_or(0.0),
            input.opt_value_from_str("--origin-y")?.unwrap_or(0.0),
        ),
        tolerance: input
            .opt_value_from_str("--tolerance")?
            .unwrap_or(textpath::path::DEFAULT_TOLERANCE),
        color: input
            .opt_value_from_str("--color")?
            .unwrap_or_else(svgtypes::Color::black),
        background: input.opt_value_from_str("--background")?,
        guide: input.opt_value_from_str("--guide")?,
        guide_width: input
            .opt_value_from_fn("--guide-width", parse_positive)?
            .unwrap_or(1.0),
        shadow_color: input.opt_value_from_str("--shadow-color")?,
        shadow_blur: input
            .opt_value_from_fn("--shadow-blur", parse_blur_radius)?
            .unwrap_or(2.5),
        shadow_dx: input.opt_value_from_str("--shadow-dx")?.unwrap_or(0.0),
        shadow_dy: input.opt_value_from_str("--shadow-dy")?.unwrap_or(0.0),
        width: input
            .opt_value_from_fn(["-w", "--width"], parse_length)?
            .unwrap_or(500),
        height: input
            .opt_value_from_fn("--height", parse_length)?
            .unwrap_or(400),
        quiet: input.contains("--quiet"),
        text: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_positive(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid number")?;
    if n > 0.0 {
        Ok(n)
    } else {
        Err("number must be positive".to_string())
    }
}

fn parse_blur_radius(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid number")?;
    if (0.0..=Shadow::MAX_BLUR_RADIUS).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "blur radius must be in 0..{}",
            Shadow::MAX_BLUR_RADIUS
        ))
    }
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;
    if n > 0 {
        Ok(n)
    } else {
        Err("length cannot be zero".to_string())
    }
}

fn parse_align(s: &str) -> Result<AlignmentMode, String> {
    match s {
        "start" => Ok(AlignmentMode::Start),
        "center" => Ok(AlignmentMode::Center),
        "end" => Ok(AlignmentMode::End),
        _ => Err("invalid alignment".to_string()),
    }
}

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    if let Ok(()) = log::set_logger(&LOGGER) {
        let level = if args.quiet {
            log::LevelFilter::Off
        } else {
            log::LevelFilter::Warn
        };
        log::set_max_level(level);
    }

    let path = textpath::path::parse(&args.path).map_err(|e| e.to_string())?;

    let mut db = fontdb::Database::new();
    let font = match args.font {
        Some(ref file) => {
            db.load_font_file(file)
                .map_err(|e| format!("failed to load '{}' cause {}", file.display(), e))?;
            let id = db
                .faces()
                .next()
                .map(|face| face.id)
                .ok_or("font file has no faces")?;
            Font {
                id,
                size: args.size,
            }
        }
        None => {
            db.load_system_fonts();
            let family = match args.family {
                Some(ref name) => fontdb::Family::Name(name),
                None => fontdb::Family::SansSerif,
            };
            Font::query(&db, &[family], args.size).ok_or("no matching font")?
        }
    };

    let shaper = FontShaper::new(Arc::new(db));
    let run = shaper
        .shape(&args.text, &font, args.origin)
        .ok_or("failed to shape text")?;

    let options = LayoutOptions {
        align: args.align,
        perpendicular_offset: args.offset,
        tolerance: args.tolerance,
    };
    let glyphs = textpath::layout_with_options(&run, &path, &options).map_err(|e| e.to_string())?;
    if glyphs.len() < run.len() {
        log::warn!(
            "{} of {} glyphs do not fit the path.",
            run.len() - glyphs.len(),
            run.len()
        );
    }

    let outlines = shaper.outlines(&font, glyphs.iter().map(|g| g.id));

    let style = TextStyle {
        color: convert_color(args.color),
        font_size: args.size,
        embolden: args.embolden,
    };
    let shadow = args.shadow_color.map(|color| Shadow {
        color: convert_color(color),
        offset: tiny_skia::Point::from_xy(args.shadow_dx, args.shadow_dy),
        blur_radius: args.shadow_blur,
    });
    let guide = args.guide.map(|color| GuideStroke {
        path: &path,
        color: convert_color(color),
        width: args.guide_width,
    });

    let size = tiny_skia::IntSize::from_wh(args.width, args.height).ok_or("invalid size")?;

    let is_svg = args
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let svg = textpath_render::svg::write(
            &glyphs,
            &outlines,
            &style,
            shadow.as_ref(),
            guide.as_ref(),
            size,
        );
        std::fs::write(&args.output, svg).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or("invalid size")?;
    if let Some(background) = args.background {
        pixmap.fill(convert_color(background));
    }

    if let Some(ref guide) = guide {
        textpath_render::stroke_guide(
            guide.path,
            guide.color,
            guide.width,
            tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );
    }

    textpath_render::render(
        &glyphs,
        &outlines,
        &style,
        shadow.as_ref(),
        tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    pixmap.save_png(&args.output).map_err(|e| e.to_string())?;

    Ok(())
}

fn convert_color(c: svgtypes::Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, c.alpha)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
