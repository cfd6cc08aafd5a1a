use crate::formats::TargetFormat;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "heic-convert",
    about = "Convert and save HEIC/HEIF images as jpeg, jpg or png images",
    long_about = "heic-convert scans a directory for HEIC/HEIF images and re-encodes each one as JPEG or PNG. \
                  Only the top level of SOURCE is scanned. Files that fail to convert are reported at the end \
                  and never stop the rest of the batch.",
    version,
    after_help = "EXAMPLES:\n  \
    heic-convert ~/Pictures/iphone png\n  \
    heic-convert ./photos jpg -o ./jpegs -q 90\n  \
    heic-convert ./photos png --optimize -j 4"
)]
pub struct Args {
    #[arg(
        value_name = "SOURCE",
        help = "Path to directory that contains HEIC/HEIF images to convert"
    )]
    pub source: PathBuf,

    #[arg(
        value_name = "FORMAT",
        value_parser = TargetFormat::from_str,
        help = "Format to convert images to, supported formats: jpeg, jpg, png"
    )]
    pub format: TargetFormat,

    #[arg(
        short = 'o',
        long = "out",
        value_name = "OUT",
        help = "Path to directory where images will be saved. Default is ./converted_images",
        long_help = "Directory where converted images are written. It is created (with parents) \
                     if missing; existing files with the same name are overwritten."
    )]
    pub out: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        help = "JPEG quality (1-100, default: 75)",
        long_help = "JPEG quality from 1 (lowest) to 100 (highest). Ignored for PNG output."
    )]
    pub quality: Option<u8>,

    #[arg(
        long,
        help = "Losslessly optimize PNG output with oxipng",
        long_help = "Run every PNG through oxipng after encoding. Pixels are unchanged; \
                     files are smaller but conversion is slower."
    )]
    pub optimize: bool,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of worker threads. If not specified, uses number of CPU cores. \
                     Use 1 for strictly sequential conversion."
    )]
    pub jobs: Option<usize>,

    #[arg(long, help = "Only print errors and the final summary")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print debug details for every file", conflicts_with = "quiet")]
    pub verbose: bool,

    #[arg(long, help = "Hide the progress bar")]
    pub no_progress: bool,
}
