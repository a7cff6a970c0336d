/// Viewer configuration assembled from command-line arguments
use anyhow::{bail, Context, Result};
use fly3d_core::CameraSettings;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: fly3d-terminal [OPTIONS] [MESH...]

Loads each MESH from <res>/<MESH>.obj (default meshes: house ball).

Options:
  --res <DIR>    asset directory (default: res)
  --fps <N>      target frame rate (default: 60)
  --fov <DEG>    vertical field of view in degrees (default: 60)
  -h, --help     print this help

Controls:
  W/S or Up/Down      forward / backward
  A/D or Left/Right   strafe (walking) or roll (free-fly)
  X/Y/Z               nudge along a world axis, Shift reverses
  mouse               look around
  Space               toggle walking / free-fly camera
  Esc                 grab / release the mouse
  Q or Ctrl-C         quit";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub asset_dir: PathBuf,
    pub meshes: Vec<String>,
    pub fps: u32,
    pub fov_deg: f32,
    pub camera: CameraSettings,
    /// Pointer units per terminal column and row, roughly one glyph in pixels
    pub pointer_scale: (f32, f32),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("res"),
            meshes: vec!["house".to_string(), "ball".to_string()],
            fps: 60,
            fov_deg: 60.0,
            camera: CameraSettings::default(),
            pointer_scale: (8.0, 16.0),
        }
    }
}

impl ViewerConfig {
    /// Parses arguments (without the program name)
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut meshes = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--res" => {
                    config.asset_dir = PathBuf::from(args.next().context("--res needs a directory")?);
                }
                "--fps" => {
                    let value = args.next().context("--fps needs a number")?;
                    config.fps = value
                        .parse()
                        .with_context(|| format!("invalid frame rate {value:?}"))?;
                    if config.fps == 0 {
                        bail!("frame rate must be positive");
                    }
                }
                "--fov" => {
                    let value = args.next().context("--fov needs a number of degrees")?;
                    config.fov_deg = value
                        .parse()
                        .with_context(|| format!("invalid field of view {value:?}"))?;
                    if !(1.0..179.0).contains(&config.fov_deg) {
                        bail!("field of view must be between 1 and 179 degrees");
                    }
                }
                flag if flag.starts_with('-') => bail!("unknown option {flag}\n\n{USAGE}"),
                name => meshes.push(name.to_string()),
            }
        }

        if !meshes.is_empty() {
            config.meshes = meshes;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ViewerConfig> {
        ViewerConfig::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.meshes, vec!["house", "ball"]);
    }

    #[test]
    fn test_options_and_meshes() {
        let config = parse(&["--res", "assets", "--fps", "30", "--fov", "75", "teapot"]).unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert_eq!(config.fps, 30);
        assert_eq!(config.fov_deg, 75.0);
        assert_eq!(config.meshes, vec!["teapot"]);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(parse(&["--fps"]).is_err());
        assert!(parse(&["--fps", "fast"]).is_err());
        assert!(parse(&["--fps", "0"]).is_err());
        assert!(parse(&["--fov", "200"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
