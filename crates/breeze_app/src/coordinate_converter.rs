#[derive(Debug, Clone, Copy)]
pub struct DisplayInfo {
    pub logical_width: f32,
    pub logical_height: f32,
    pub buffer_width: f32,
    pub buffer_height: f32,
}

/// Handles DPI scaling and logical-to-buffer coordinate conversion for touch input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateConverter {
    logical_to_buffer_scale_x: f32,
    logical_to_buffer_scale_y: f32,
    scale_factor: f32,
}

impl CoordinateConverter {
    pub fn new(display_info: DisplayInfo, scale_factor: f32) -> Self {
        if display_info.logical_width <= 0.0 || display_info.logical_height <= 0.0 {
            return Self::default();
        }
        Self {
            logical_to_buffer_scale_x: display_info.buffer_width / display_info.logical_width,
            logical_to_buffer_scale_y: display_info.buffer_height / display_info.logical_height,
            scale_factor,
        }
    }

    /// Convert window coordinates (from winit) to buffer coordinates
    pub fn window_to_buffer(&self, window_x: f32, window_y: f32) -> (f32, f32) {
        if self.scale_factor == 1.0 || self.scale_factor <= 0.0 {
            (window_x, window_y)
        } else {
            let logical_x = window_x / self.scale_factor;
            let logical_y = window_y / self.scale_factor;
            (
                logical_x * self.logical_to_buffer_scale_x,
                logical_y * self.logical_to_buffer_scale_y,
            )
        }
    }
}

impl Default for CoordinateConverter {
    /// Pass-through converter
    fn default() -> Self {
        Self {
            logical_to_buffer_scale_x: 1.0,
            logical_to_buffer_scale_y: 1.0,
            scale_factor: 1.0,
        }
    }
}

/// Desktop windows render at physical size, so the buffer is the physical surface
#[cfg_attr(target_arch = "wasm32", allow(unused))]
pub fn create_desktop_converter(
    physical_size: (f32, f32),
    scale_factor: f32,
) -> CoordinateConverter {
    let (physical_width, physical_height) = physical_size;

    let display_info = DisplayInfo {
        logical_width: physical_width / scale_factor,
        logical_height: physical_height / scale_factor,
        buffer_width: physical_width,
        buffer_height: physical_height,
    };

    CoordinateConverter::new(display_info, scale_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pass_through() {
        assert_eq!(CoordinateConverter::default().window_to_buffer(12.0, 34.0), (12.0, 34.0));
    }

    #[test]
    fn desktop_converter_keeps_physical_pixels() {
        let c = create_desktop_converter((1800.0, 2000.0), 2.0);
        let (x, y) = c.window_to_buffer(900.0, 1000.0);
        assert!((x - 900.0).abs() < 1e-3);
        assert!((y - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn css_sized_canvas_is_scaled_to_its_buffer() {
        // 400 css px wide canvas backed by an 800 px buffer on a 2x display
        let info = DisplayInfo {
            logical_width: 400.0,
            logical_height: 300.0,
            buffer_width: 800.0,
            buffer_height: 600.0,
        };
        let c = CoordinateConverter::new(info, 2.0);
        assert_eq!(c.window_to_buffer(200.0, 100.0), (200.0, 100.0));
    }

    #[test]
    fn zero_sized_display_falls_back() {
        let c = create_desktop_converter((0.0, 0.0), 2.0);
        assert_eq!(c, CoordinateConverter::default());
    }
}
