//! Very simple tool that applies alpha fade to an image and saves it as a transparent PNG
#![deny(warnings)]

use alphafade::{codec, *};
use std::{
    env,
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    output_file: Option<String>,
    params: GradParams,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut params_file = None;
        let mut shape = None;
        let mut angle = None;
        let mut fade_start = None;
        let mut fade_end = None;
        let mut invert = false;
        let mut input_file = None;
        let mut output_file = None;

        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "fade".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-p" => {
                    params_file = Some(args.next().ok_or("-p requires argument")?);
                }
                "-r" => {
                    shape = Some(GradShape::Radial);
                }
                "-l" => {
                    shape = Some(GradShape::Linear);
                }
                "-i" => {
                    invert = true;
                }
                "-a" => {
                    angle = Some(args.next().ok_or("-a requires argument")?.parse()?);
                }
                "-s" => {
                    fade_start = Some(args.next().ok_or("-s requires argument")?.parse()?);
                }
                "-e" => {
                    fade_end = Some(args.next().ok_or("-e requires argument")?.parse()?);
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => input_file = Some(arg),
                        2 => output_file = Some(arg),
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        let Some(input_file) = input_file.filter(|_| positional > 0) else {
            eprintln!(
                "Very simple tool that applies alpha fade to an image and saves it as a transparent PNG"
            );
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-p <params.json>] [-l|-r] [-a <angle>] [-s <start>] [-e <end>] [-i] <input> [<output.png>]",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -p <params.json>   load gradient parameters from JSON file");
            eprintln!("    -l                 linear fade (default)");
            eprintln!("    -r                 radial fade");
            eprintln!("    -a <angle>         direction of linear fade in degrees, 0 is up");
            eprintln!("    -s <start>         start of the fade zone in percents");
            eprintln!("    -e <end>           end of the fade zone in percents");
            eprintln!("    -i                 invert opaque and transparent sides");
            eprintln!("    <input>            PNG, JPEG, GIF, WebP or BMP image ('-' means stdin)");
            eprintln!(
                "    <output.png>       output PNG image ('-' means stdout, default: <input>{}.png)",
                codec::EXPORT_SUFFIX
            );
            std::process::exit(1);
        };

        // parameters file first, flags override it
        let mut params = match params_file {
            Some(params_file) => {
                let mut json = String::new();
                File::open(params_file)?.read_to_string(&mut json)?;
                GradParams::from_json(&json)?
            }
            None => GradParams::default(),
        };
        if let Some(shape) = shape {
            params.shape = shape;
        }
        if let Some(angle) = angle {
            params.angle = angle;
        }
        if let Some(fade_start) = fade_start {
            params.fade_start = fade_start;
        }
        if let Some(fade_end) = fade_end {
            params.fade_end = fade_end;
        }
        params.invert |= invert;

        Ok(Args {
            input_file,
            output_file,
            params,
        })
    }
}

/// Load and decode image from the file
fn image_load(path: &str) -> Result<Bitmap, Error> {
    let mut contents = Vec::new();
    if path != "-" {
        File::open(path)?.read_to_end(&mut contents)?;
    } else {
        std::io::stdin().read_to_end(&mut contents)?;
    }
    Ok(codec::decode(&contents)?)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    tracing::debug!(params = ?args.params, "[args]");

    let image = image_load(&args.input_file)?;
    let faded = composite(&image, &args.params)?;

    let output_file = match args.output_file {
        Some(output_file) => output_file,
        None if args.input_file == "-" => "-".to_owned(),
        None => {
            // next to the input file
            let input = Path::new(&args.input_file);
            let output = input.with_file_name(codec::export_file_name(input));
            output.to_string_lossy().into_owned()
        }
    };
    if output_file != "-" {
        let mut output = BufWriter::new(File::create(&output_file)?);
        codec::write_png(&faded, &mut output)?;
        output.flush()?;
        tracing::info!(path = %output_file, "[saved]");
    } else {
        let stdout = std::io::stdout();
        let mut output = stdout.lock();
        codec::write_png(&faded, &mut output)?;
        output.flush()?;
    }

    Ok(())
}
