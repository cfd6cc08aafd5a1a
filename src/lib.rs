pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod formats;
pub mod logger;
pub mod utils;
pub mod validation;

pub use batch::{
    collect_heif_files, convert_batch, convert_file, generate_output_path, print_report,
    BatchReport, FileFailure,
};
pub use config::ConvertOptions;
pub use decode::{HeifDecoder, LibHeifDecoder};
pub use encode::{encode_image, optimize_png};
pub use error::{ConvertError, Result};
pub use formats::{is_heif_file, TargetFormat};
