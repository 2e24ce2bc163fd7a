use crate::error::ConfigError;
use crate::models::Model;

/// Steps per second once the simulation is running
pub const DEFAULT_FPS: u32 = 10;

/// Logical grid dimensions in cells
pub const DEFAULT_CELLS_X: usize = 128;
pub const DEFAULT_CELLS_Y: usize = 72;

/// Window (and painted buffer) dimensions in pixels
pub const DEFAULT_WINDOW_X: usize = 1280;
pub const DEFAULT_WINDOW_Y: usize = 720;

/// Everything the viewer needs to launch, passed explicitly to the app
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    pub fps: u32,
    pub cells_x: usize,
    pub cells_y: usize,
    pub window_x: usize,
    pub window_y: usize,
    pub model: Model,
    /// Seed for reproducible probabilistic runs; fresh randomness when unset
    pub seed: Option<u64>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            cells_x: DEFAULT_CELLS_X,
            cells_y: DEFAULT_CELLS_Y,
            window_x: DEFAULT_WINDOW_X,
            window_y: DEFAULT_WINDOW_Y,
            model: Model::Conways,
            seed: None,
        }
    }
}

impl LaunchConfig {
    /// Reject settings the viewer cannot honour: every cell needs at least
    /// one pixel, the window must fit `u32` and steps need a non-zero rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        self.window_size()?;
        crate::simulation::Canvas::new(self.cells_x, self.cells_y, self.window_x, self.window_y)?;
        Ok(())
    }

    /// Window dimensions as the `u32` pair winit and wgpu take
    pub fn window_size(&self) -> Result<(u32, u32), ConfigError> {
        match (u32::try_from(self.window_x), u32::try_from(self.window_y)) {
            (Ok(width), Ok(height)) => Ok((width, height)),
            _ => Err(ConfigError::WindowTooLarge {
                width: self.window_x,
                height: self.window_y,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(LaunchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = LaunchConfig {
            fps: 0,
            ..LaunchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn test_window_size_converts() {
        assert_eq!(LaunchConfig::default().window_size(), Ok((1280, 720)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_window_must_fit_u32() {
        let wide = LaunchConfig {
            window_x: u32::MAX as usize + 1,
            ..LaunchConfig::default()
        };
        assert_eq!(
            wide.validate(),
            Err(ConfigError::WindowTooLarge {
                width: u32::MAX as usize + 1,
                height: DEFAULT_WINDOW_Y,
            })
        );

        let tall = LaunchConfig {
            window_y: usize::MAX,
            ..LaunchConfig::default()
        };
        assert!(matches!(tall.window_size(), Err(ConfigError::WindowTooLarge { .. })));
        assert!(tall.validate().is_err());
    }

    #[test]
    fn test_cells_must_fit_window() {
        let config = LaunchConfig {
            cells_y: 800,
            ..LaunchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CanvasTooSmall { axis: 'y', .. })
        ));
    }
}
