extern crate clap;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use mandelbrot::config::{
    DEFAULT_ANIMATION_DENSITY, DEFAULT_DENSITY, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_INTERVAL_MS,
    DEFAULT_GROWTH_BASE, DEFAULT_IMAGINARY_RANGE, DEFAULT_REAL_RANGE, DEFAULT_THRESHOLD,
};
use mandelbrot::{write_gif, write_png, ColorMap, Config, FieldGenerator, Frames, Region};
use num::Complex;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_growth(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(base) if base.is_finite() && base >= 1.0 => Ok(()),
        Ok(_) => Err("Growth base must be a finite number of at least 1.0".to_string()),
        Err(_) => Err("Could not parse growth base".to_string()),
    }
}

const STILL: &str = "still";
const ANIMATE: &str = "animate";
const OUTPUT: &str = "output";
const DENSITY: &str = "density";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const FRAMES: &str = "frames";
const INTERVAL: &str = "interval";
const GROWTH: &str = "growth";

const MAX_DENSITY: usize = 16_384;

fn output_arg<'a, 'b>() -> Arg<'a, 'b>
where
    'a: 'b,
{
    Arg::with_name(OUTPUT)
        .required(true)
        .long(OUTPUT)
        .short("o")
        .takes_value(true)
        .help("Output file")
}

fn threads_arg<'a, 'b>(default: &'a str) -> Arg<'a, 'b>
where
    'a: 'b,
{
    let max_threads = num_cpus::get();
    Arg::with_name(THREADS)
        .required(false)
        .long(THREADS)
        .short("t")
        .takes_value(true)
        .default_value(default)
        .validator(move |s| {
            validate_range(
                &s,
                1,
                max_threads,
                "Could not parse thread count",
                &format!("Thread count must be between 1 and {}", max_threads),
            )
        })
        .help("Number of threads to use in solver")
}

fn density_arg<'a, 'b>(default: &'a str) -> Arg<'a, 'b>
where
    'a: 'b,
{
    Arg::with_name(DENSITY)
        .required(false)
        .long(DENSITY)
        .short("d")
        .takes_value(true)
        .default_value(default)
        .validator(|s| {
            validate_range(
                &s,
                1,
                MAX_DENSITY,
                "Could not parse density",
                &format!("Density must be between 1 and {}", MAX_DENSITY),
            )
        })
        .help("Samples per axis; the output is this many pixels square")
}

fn corner_args<'a, 'b>(leftlower: &'a str, rightupper: &'a str) -> Vec<Arg<'a, 'b>>
where
    'a: 'b,
{
    vec![
        Arg::with_name(LEFTLOWER)
            .required(false)
            .long(LEFTLOWER)
            .short("l")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(leftlower)
            .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
            .help("Left lower corner of the mandelbrot space"),
        Arg::with_name(RIGHTUPPER)
            .required(false)
            .long(RIGHTUPPER)
            .short("r")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(rightupper)
            .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
            .help("Right upper corner of the mandelbrot space"),
    ]
}

struct Defaults {
    threads: String,
    still_density: String,
    animation_density: String,
    threshold: String,
    frames: String,
    interval: String,
    growth: String,
    leftlower: String,
    rightupper: String,
}

impl Defaults {
    fn new() -> Self {
        Defaults {
            threads: num_cpus::get().to_string(),
            still_density: DEFAULT_DENSITY.to_string(),
            animation_density: DEFAULT_ANIMATION_DENSITY.to_string(),
            threshold: DEFAULT_THRESHOLD.to_string(),
            frames: DEFAULT_FRAME_COUNT.to_string(),
            interval: DEFAULT_FRAME_INTERVAL_MS.to_string(),
            growth: DEFAULT_GROWTH_BASE.to_string(),
            leftlower: format!("{},{}", DEFAULT_REAL_RANGE.0, DEFAULT_IMAGINARY_RANGE.0),
            rightupper: format!("{},{}", DEFAULT_REAL_RANGE.1, DEFAULT_IMAGINARY_RANGE.1),
        }
    }
}

fn args<'a>(defaults: &'a Defaults) -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot escape-time renderer")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name(STILL)
                .about("Renders a single field as a PNG")
                .arg(output_arg())
                .arg(threads_arg(&defaults.threads))
                .arg(density_arg(&defaults.still_density))
                .args(&corner_args(&defaults.leftlower, &defaults.rightupper))
                .arg(
                    Arg::with_name(ITERATIONS)
                        .required(false)
                        .long(ITERATIONS)
                        .short("i")
                        .takes_value(true)
                        .default_value(&defaults.threshold)
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                1_000_000,
                                "Could not parse iteration count",
                                "Iteration count must be between 1 and 1000000",
                            )
                        })
                        .help("Iteration budget per point"),
                ),
        )
        .subcommand(
            SubCommand::with_name(ANIMATE)
                .about("Renders a sequence of fields with a growing budget as a GIF")
                .arg(output_arg())
                .arg(threads_arg(&defaults.threads))
                .arg(density_arg(&defaults.animation_density))
                .args(&corner_args(&defaults.leftlower, &defaults.rightupper))
                .arg(
                    Arg::with_name(FRAMES)
                        .required(false)
                        .long(FRAMES)
                        .short("f")
                        .takes_value(true)
                        .default_value(&defaults.frames)
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                10_000,
                                "Could not parse frame count",
                                "Frame count must be between 1 and 10000",
                            )
                        })
                        .help("Number of frames"),
                )
                .arg(
                    Arg::with_name(INTERVAL)
                        .required(false)
                        .long(INTERVAL)
                        .takes_value(true)
                        .default_value(&defaults.interval)
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                60_000,
                                "Could not parse frame interval",
                                "Frame interval must be between 1 and 60000 ms",
                            )
                        })
                        .help("Milliseconds between frames"),
                )
                .arg(
                    Arg::with_name(GROWTH)
                        .required(false)
                        .long(GROWTH)
                        .short("g")
                        .takes_value(true)
                        .default_value(&defaults.growth)
                        .validator(|s| validate_growth(&s))
                        .help("Frame i runs round(GROWTH^(i+1)) iterations"),
                ),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| failure::err_msg(format!("Could not parse {}", name)))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, failure::Error> {
    matches
        .value_of(name)
        .and_then(parse_complex)
        .ok_or_else(|| failure::err_msg(format!("Could not parse {}", name)))
}

fn config_from(matches: &ArgMatches) -> Result<Config, failure::Error> {
    let region = Region::new(corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?;
    Ok(Config::default()
        .with_region(region)
        .with_density(value(matches, DENSITY)?))
}

fn still(matches: &ArgMatches, threads: usize) -> Result<(), failure::Error> {
    let config = config_from(matches)?;
    let threshold: u32 = value(matches, ITERATIONS)?;
    let output = matches.value_of(OUTPUT).unwrap_or("mandelbrot.png");

    let generator = FieldGenerator::new(&config)?;
    let field = generator.field_threaded(threshold, threads)?;
    write_png(output, &field, &ColorMap::default())?;
    Ok(())
}

fn animate(matches: &ArgMatches, threads: usize) -> Result<(), failure::Error> {
    let config = config_from(matches)?
        .with_frame_count(value(matches, FRAMES)?)
        .with_frame_interval_ms(value(matches, INTERVAL)?)
        .with_growth_base(value(matches, GROWTH)?);
    let output = matches.value_of(OUTPUT).unwrap_or("mandelbrot.gif");

    let frames = Frames::new(&config)?;
    if threads > 1 {
        let fields = frames.in_parallel(threads)?;
        write_gif(output, fields, config.frame_interval_ms, ColorMap::default())?;
    } else {
        write_gif(output, frames, config.frame_interval_ms, ColorMap::default())?;
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let started = Instant::now();
    let outcome = match matches.subcommand() {
        (STILL, Some(sub)) => still(sub, value(sub, THREADS)?),
        (ANIMATE, Some(sub)) => animate(sub, value(sub, THREADS)?),
        (other, _) => Err(failure::err_msg(format!("Unknown command '{}'", other))),
    };
    info!("Finished in {:?}", started.elapsed());
    outcome
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let defaults = Defaults::new();
    let matches = args(&defaults);

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
