//! texconv argument construction

use crate::model::{CompressionFormat, ExportOptions};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension texconv gives its output when `-ft DDS` is requested
pub const OUTPUT_EXTENSION: &str = "DDS";

/// One texconv invocation: a single input file converted into a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexconvCommand {
    format: CompressionFormat,
    overwrite: bool,
    output_dir: PathBuf,
    input: PathBuf,
    mipmaps: bool,
    srgb: bool,
}

impl TexconvCommand {
    /// Create the command converting `input` into `output_dir` with the given options
    pub fn new(input: &Path, output_dir: &Path, options: &ExportOptions) -> Self {
        let output_dir = if output_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            output_dir.to_path_buf()
        };

        Self {
            format: options.format,
            overwrite: options.overwrite_existing,
            output_dir,
            input: input.to_path_buf(),
            mipmaps: options.generate_mipmaps,
            srgb: options.use_srgb,
        }
    }

    /// Argument list, in the order texconv documents them
    ///
    /// Disabled flags are left out entirely rather than passed as empty strings.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-f".into(), self.format.texconv_token().into()];

        if self.overwrite {
            args.push("-y".into());
        }

        args.push("-o".into());
        args.push(self.output_dir.clone().into_os_string());
        args.push("-ft".into());
        args.push(OUTPUT_EXTENSION.into());
        args.push(self.input.clone().into_os_string());

        if self.mipmaps {
            // 0 = generate the full chain down to 1x1
            args.push("-m".into());
            args.push("0".into());
        }
        if self.srgb {
            args.push("-srgb".into());
        }

        args
    }

    /// Where texconv will write its result
    pub fn expected_output(&self) -> PathBuf {
        expected_output_path(&self.input, &self.output_dir)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// texconv names its output after the input's stem with an upper-case `.DDS`
pub fn expected_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(command: &TexconvCommand) -> Vec<String> {
        command
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_bc7_scenario() {
        let options = ExportOptions::new(CompressionFormat::Bc7).with_overwrite(false);
        let command = TexconvCommand::new(Path::new("/tmp/dds-export-abc.png"), Path::new("out"), &options);

        assert_eq!(
            args_of(&command),
            vec!["-f", "BC7_UNORM", "-o", "out", "-ft", "DDS", "/tmp/dds-export-abc.png", "-m", "0", "-srgb"]
        );
    }

    #[test]
    fn test_each_format_emits_only_its_token() {
        let tokens: Vec<&str> = CompressionFormat::ALL.iter().map(|f| f.texconv_token()).collect();

        for format in CompressionFormat::ALL {
            let command = TexconvCommand::new(Path::new("in.png"), Path::new("out"), &ExportOptions::new(format));
            let args = args_of(&command);

            assert_eq!(args[0], "-f");
            assert_eq!(args[1], format.texconv_token());
            let found: Vec<&String> = args.iter().filter(|a| tokens.contains(&a.as_str())).collect();
            assert_eq!(found, vec![format.texconv_token()]);
        }
    }

    #[test]
    fn test_flags_follow_toggles() {
        for bits in 0..8u8 {
            let options = ExportOptions::new(CompressionFormat::Bc3)
                .with_overwrite(bits & 1 != 0)
                .with_mipmaps(bits & 2 != 0)
                .with_srgb(bits & 4 != 0);
            let args = args_of(&TexconvCommand::new(Path::new("in.png"), Path::new("out"), &options));

            assert_eq!(args.iter().any(|a| a == "-y"), options.overwrite_existing);
            assert_eq!(args.windows(2).any(|w| w[0] == "-m" && w[1] == "0"), options.generate_mipmaps);
            assert_eq!(args.iter().any(|a| a == "-srgb"), options.use_srgb);
            assert!(args.iter().all(|a| !a.is_empty()), "empty token in {:?}", args);
        }
    }

    #[test]
    fn test_empty_output_dir_becomes_current_dir() {
        let command = TexconvCommand::new(Path::new("in.png"), Path::new(""), &ExportOptions::default());
        assert_eq!(command.output_dir(), Path::new("."));
        assert!(command.args().iter().all(|a| !a.is_empty()));
    }

    #[test]
    fn test_expected_output() {
        let command = TexconvCommand::new(
            Path::new("/tmp/dds-export-x1.png"),
            Path::new("/home/me/textures"),
            &ExportOptions::default(),
        );
        assert_eq!(command.input(), Path::new("/tmp/dds-export-x1.png"));
        assert_eq!(command.expected_output(), PathBuf::from("/home/me/textures/dds-export-x1.DDS"));
    }
}
