extern crate clap;
extern crate lyon_brace;
#[macro_use]
extern crate log;

mod commands;
mod demo;
mod inspect;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use commands::*;
use lyon_brace::{BraceParams, CanvasOptions, StrokeStyle};

use std::fs::File;
use std::io::{self, stdout};

fn brace_args() -> Vec<Arg<'static, 'static>> {
    let number = |name: &'static str, long: &'static str, help: &'static str| {
        Arg::with_name(name)
            .long(long)
            .help(help)
            .value_name("NUMBER")
            .takes_value(true)
            .allow_hyphen_values(true)
    };

    vec![
        number("X", "x", "x position of the left edge (0 by default)"),
        number("Y", "y", "y position of the bottom edge (0 by default)"),
        number("WIDTH", "width", "Horizontal span (0.125 by default)"),
        number("HEIGHT", "height", "Vertical span (1 by default)"),
        number("CURLINESS", "curliness", "Extent of curliness (1/e by default)"),
        Arg::with_name("POINTING")
            .short("p")
            .long("pointing")
            .help("Direction the brace points to")
            .possible_values(&["left", "right"])
            .default_value("left"),
    ]
}

fn style_arg() -> Arg<'static, 'static> {
    Arg::with_name("STYLE")
        .short("s")
        .long("style")
        .help("Sets a style option, for example -s color=red -s lw=2")
        .value_name("KEY=VALUE")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
}

fn app() -> App<'static, 'static> {
    App::new("Lyon brace command-line interface")
        .version("0.1")
        .author("Nicolas Silva <nical@fastmail.com>")
        .about("Curly brace paths")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("demo")
                .about("Renders a grid of braces as an SVG document")
                .arg(
                    Arg::with_name("SIZE")
                        .long("size")
                        .help("Width and height of the document in pixels (480 by default)")
                        .value_name("PIXELS")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("FIT")
                        .long("fit")
                        .help("Fits the view to the braces instead of the unit square"),
                ),
        )
        .subcommand(
            SubCommand::with_name("points")
                .about("Prints the points and verbs of a brace")
                .args(&brace_args()),
        )
        .subcommand(
            SubCommand::with_name("path")
                .about("Prints the SVG path data of a brace")
                .args(&brace_args())
                .arg(style_arg()),
        )
        .subcommand(
            SubCommand::with_name("tessellate")
                .about("Tessellates the stroke of a brace")
                .args(&brace_args())
                .arg(style_arg())
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Prints the number of vertices and indices"),
                ),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
}

fn main() {
    env_logger::init();

    let matches = app().get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let output: Box<dyn io::Write> = match matches.value_of("OUTPUT") {
        Some(file_name) => {
            debug!("writing to {}", file_name);
            Box::new(File::create(file_name)?)
        }
        None => Box::new(stdout()),
    };

    match matches.subcommand() {
        ("demo", Some(sub)) => demo::demo(DemoCmd {
            output,
            size: get_number(sub, "SIZE", "size")?.unwrap_or(CanvasOptions::DEFAULT_SIZE),
            fit: sub.is_present("FIT"),
        }),
        ("points", Some(sub)) => inspect::points(PointsCmd {
            params: get_params(sub)?,
            output,
        }),
        ("path", Some(sub)) => inspect::path(PathCmd {
            params: get_params(sub)?,
            style: get_style(sub)?,
            output,
        }),
        ("tessellate", Some(sub)) => inspect::tessellate(TessellateCmd {
            params: get_params(sub)?,
            style: get_style(sub)?,
            output,
            count: sub.is_present("COUNT"),
        }),
        _ => Ok(()),
    }
}

fn get_number(
    matches: &ArgMatches,
    name: &str,
    arg: &'static str,
) -> Result<Option<f32>, CliError> {
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CliError::InvalidNumber {
                arg,
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}

fn get_params(matches: &ArgMatches) -> Result<BraceParams, CliError> {
    let d = BraceParams::DEFAULT;
    let params = BraceParams::at(
        get_number(matches, "X", "x")?.unwrap_or(d.x),
        get_number(matches, "Y", "y")?.unwrap_or(d.y),
    )
    .with_size(
        get_number(matches, "WIDTH", "width")?.unwrap_or(d.width),
        get_number(matches, "HEIGHT", "height")?.unwrap_or(d.height),
    )
    .with_curliness(get_number(matches, "CURLINESS", "curliness")?.unwrap_or(d.curliness))
    .with_pointing(matches.value_of("POINTING").unwrap_or("left").parse()?);

    debug!("{:?}", params);

    Ok(params)
}

fn get_style(matches: &ArgMatches) -> Result<StrokeStyle, CliError> {
    let mut pairs = Vec::new();
    for option in matches.values_of("STYLE").into_iter().flatten() {
        match option.split_once('=') {
            Some((key, value)) => pairs.push((key.trim(), value)),
            None => return Err(CliError::InvalidStyleOption(option.to_string())),
        }
    }

    Ok(StrokeStyle::from_pairs(pairs)?)
}

#[cfg(test)]
fn subcommand_matches(args: &[&str]) -> ArgMatches<'static> {
    let mut argv = vec!["brace"];
    argv.extend_from_slice(args);
    let matches = app().get_matches_from(argv);
    match matches.subcommand() {
        (_, Some(sub)) => sub.clone(),
        _ => panic!("no subcommand in {:?}", args),
    }
}

#[test]
fn default_params() {
    let params = get_params(&subcommand_matches(&["points"])).unwrap();
    assert_eq!(params, BraceParams::DEFAULT);
}

#[test]
fn negative_numbers() {
    let matches = subcommand_matches(&["points", "--x", "-1", "--y", "-0.5", "-p", "right"]);
    let params = get_params(&matches).unwrap();
    assert_eq!(params.x, -1.0);
    assert_eq!(params.y, -0.5);
    assert_eq!(params.width, BraceParams::DEFAULT_WIDTH);
    assert_eq!(params.pointing, lyon_brace::Pointing::Right);
}

#[test]
fn invalid_number() {
    match get_params(&subcommand_matches(&["points", "--width", "wide"])) {
        Err(CliError::InvalidNumber { arg, value }) => {
            assert_eq!(arg, "width");
            assert_eq!(value, "wide");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn style_options() {
    let matches = subcommand_matches(&["path", "-s", "color=red", "-s", "lw=2"]);
    let style = get_style(&matches).unwrap();
    assert_eq!(style.color, Some(lyon_brace::Color::rgb(255, 0, 0)));
    assert_eq!(style.line_width, Some(2.0));

    let style = get_style(&subcommand_matches(&["path"])).unwrap();
    assert_eq!(style, StrokeStyle::DEFAULT);
}

#[test]
fn invalid_style_options() {
    match get_style(&subcommand_matches(&["tessellate", "-s", "lw"])) {
        Err(CliError::InvalidStyleOption(option)) => assert_eq!(option, "lw"),
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(
        get_style(&subcommand_matches(&["tessellate", "-s", "hatch=//"])),
        Err(CliError::Brace(lyon_brace::BraceError::UnknownStyleKey(_)))
    ));
}
