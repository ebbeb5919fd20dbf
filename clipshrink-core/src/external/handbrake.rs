// ============================================================================
// clipshrink-core/src/external/handbrake.rs
// ============================================================================
//
// HANDBRAKE: Encode Parameters and Argument Construction
//
// Builds the HandBrakeCLI argument list for one staged file. The list is
// always `-i <in> -o <out> -e <encoder> -q <quality> --cfr`, followed by
// `-r <fps>` only when probing produced a frame rate.

use crate::config::CoreConfig;
use crate::processing::probe::FrameRate;

use std::ffi::OsString;
use std::path::PathBuf;

/// Everything needed to run one encode.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoder: String,
    pub quality: u8,
    pub frame_rate: Option<FrameRate>,
}

impl EncodeParams {
    /// Parameters for `input_path` using the encoder settings in `config`.
    pub fn from_config(
        config: &CoreConfig,
        input_path: PathBuf,
        output_path: PathBuf,
        frame_rate: Option<FrameRate>,
    ) -> Self {
        Self {
            input_path,
            output_path,
            encoder: config.encoder.clone(),
            quality: config.quality,
            frame_rate,
        }
    }
}

/// Builds the HandBrakeCLI argument list.
pub fn build_handbrake_args(params: &EncodeParams) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-i".into(),
        params.input_path.clone().into_os_string(),
        "-o".into(),
        params.output_path.clone().into_os_string(),
        "-e".into(),
        params.encoder.clone().into(),
        "-q".into(),
        params.quality.to_string().into(),
        "--cfr".into(),
    ];

    if let Some(rate) = params.frame_rate {
        args.push("-r".into());
        args.push(rate.to_string().into());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(frame_rate: Option<FrameRate>) -> EncodeParams {
        EncodeParams::from_config(
            &CoreConfig::default(),
            PathBuf::from("/r/staging/clip.mp4"),
            PathBuf::from("/r/HB clip.mp4"),
            frame_rate,
        )
    }

    fn as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn args_without_frame_rate() {
        let args = as_strings(build_handbrake_args(&params(None)));
        assert_eq!(
            args,
            vec![
                "-i", "/r/staging/clip.mp4", "-o", "/r/HB clip.mp4", "-e", "x264", "-q", "22",
                "--cfr"
            ]
        );
    }

    #[test]
    fn args_with_frame_rate() {
        let rate = FrameRate::new(25.0).unwrap();
        let args = as_strings(build_handbrake_args(&params(Some(rate))));
        assert_eq!(args[args.len() - 2..], ["-r".to_string(), "25".to_string()]);
        assert!(args.contains(&"--cfr".to_string()));
    }
}
