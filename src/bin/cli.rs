//! This is the command line tool that loads an input image and converts it to
//! a .pai file, or converts a .pai file back into an image.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pai::codec::{
    decode_bytes, encode_grid, encode_text, output_path, Codec, Hooks,
    Operation, Options,
};
use pai::compression::{Method, MAX_QUALITY, MIN_QUALITY};
use pai::raster::{ImageFiles, ImageIo};
use pai::utils::atomic_file;
use pai::utils::signatures::FILE_EXTENSION;
use pai::{Context, PaiError, Separators};

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, time::Instant};

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

/// Reports the progress of the pipeline.
struct Progress;

impl Hooks for Progress {
    fn on_start(&mut self, op: Operation) {
        log::info!("{:?} started", op);
    }

    fn on_end(&mut self, op: Operation, ok: bool) {
        if ok {
            log::info!("{:?} finished", op);
        } else {
            log::info!("{:?} failed", op);
        }
    }
}

fn save_file(data: &[u8], path: &Path) -> Result<(), PaiError> {
    atomic_file::write(path, data)?;
    log::info!("Wrote {}.", path.display());
    Ok(())
}

fn parse_options(matches: &ArgMatches) -> Result<Options, PaiError> {
    let quality = *matches.get_one::<u8>("quality").unwrap_or(&MAX_QUALITY);
    let mut context = Context::new(quality);
    if let Some(seps) = matches.get_one::<String>("separators") {
        context = context.with_separators(seps.parse::<Separators>()?);
    }

    let method = matches
        .get_one::<String>("mode")
        .and_then(|name| Method::from_name(name))
        .unwrap_or_default();

    Ok(Options {
        context,
        method,
        framed: matches.get_flag("framed"),
        ..Options::default()
    })
}

fn compress(
    input: &Path,
    output: &Path,
    options: Options,
    as_text: bool,
    checked: bool,
) -> Result<(), PaiError> {
    let grid = ImageFiles.read_pixel_grid(input)?;
    let raw_size = grid.width() * grid.height() * 3;

    if as_text {
        let text = encode_text(&grid, &options)?;
        log::info!("Encoded {} pixel bytes into {} characters.", raw_size, text.len());
        return save_file(text.as_bytes(), output);
    }

    let encoded = encode_grid(&grid, &options)?;
    log::info!("Compressed from {} to {} bytes.", raw_size, encoded.len());
    log::info!(
        "Compression ratio is {:.4}x.",
        raw_size as f64 / encoded.len() as f64
    );
    save_file(&encoded, output)?;

    if checked {
        let decoded = decode_bytes(&encoded, &options)?;
        if decoded == grid {
            log::info!("Correct!");
        } else {
            log::info!("Incorrect!");
        }
    }
    Ok(())
}

fn decompress(
    input: &Path,
    output: &Path,
    options: Options,
) -> Result<(), PaiError> {
    let size = fs::metadata(input)?.len();
    let codec = Codec::new(options);
    codec.decode_file(input, output, &mut Progress)?;
    log::info!("Decompressed {} bytes into {}.", size, output.display());
    Ok(())
}

fn main() -> ExitCode {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Decode the result and compare it with the input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .help("Convert a .pai file into an image")
                .action(ArgAction::SetTrue)
                .conflicts_with("compress"),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .help("Convert an image into a .pai file")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("The algorithm used for compression.")
                .value_parser(["brotli", "deflate"])
                .num_args(1),
        )
        .arg(
            Arg::new("quality")
                .short('q')
                .long("quality")
                .value_name("LEVEL")
                .help("Compression quality, higher is smaller and slower")
                .value_parser(
                    value_parser!(u8)
                        .range(MIN_QUALITY as i64..=MAX_QUALITY as i64),
                )
                .num_args(1),
        )
        .arg(
            Arg::new("framed")
                .long("framed")
                .help("Prefix the output with a signature header")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("separators")
                .long("separators")
                .value_name("CHARS")
                .help("Pixel, line, size and repeat separators, e.g. \"@&:x\"")
                .num_args(1),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .help("Write the uncompressed PAI text")
                .action(ArgAction::SetTrue)
                .conflicts_with("decompress"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut cli_compress = matches.get_flag("compress");
    let cli_decompress = matches.get_flag("decompress");
    let cli_checked_mode = matches.get_flag("checked");
    let cli_text = matches.get_flag("text");

    let options = match parse_options(&matches) {
        Ok(options) => options,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    // The argument is required, so clap guarantees that it's present.
    let input_path = PathBuf::from(matches.get_one::<String>("INPUT").unwrap());

    // The user did not specify if this is compress or decompress. Try to figure
    // out using the extension.
    let is_pai = input_path
        .extension()
        .map_or(false, |ext| ext == FILE_EXTENSION);
    if !cli_compress && !cli_decompress && !is_pai {
        cli_compress = true;
    }

    // Come up with a file name.
    let op = if cli_compress {
        Operation::Encode
    } else {
        Operation::Decode
    };
    let output = matches.get_one::<String>("output").map(Path::new);
    let output_path = match output_path(&input_path, output, op) {
        Ok(path) => path,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let timer = Timer::new();
    let res = if cli_compress {
        compress(
            &input_path,
            &output_path,
            options,
            cli_text,
            cli_checked_mode,
        )
    } else {
        decompress(&input_path, &output_path, options)
    };
    drop(timer);

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
