use color::{AlphaColor, LinearSrgb, Srgb};

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    inner: AlphaColor<Srgb>,
}

impl Color {
    /// Create a new Color from sRGB RGBA components in [0..1]
    pub const fn new(components: [f32; 4]) -> Self {
        Self {
            inner: AlphaColor::new(components),
        }
    }

    /// Create a Color from a packed `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xff) as f32 / 255.0;
        let r = ((argb >> 16) & 0xff) as f32 / 255.0;
        let g = ((argb >> 8) & 0xff) as f32 / 255.0;
        let b = (argb & 0xff) as f32 / 255.0;
        Self::new([r, g, b, a])
    }

    /// Get raw sRGB RGBA components
    pub fn components(&self) -> [f32; 4] {
        self.inner.components
    }

    /// Components converted to linear sRGB, as the GPU surface expects them
    pub fn linear_components(&self) -> [f32; 4] {
        self.inner.convert::<LinearSrgb>().components
    }

    pub fn alpha(&self) -> f32 {
        self.inner.components[3]
    }

    /// Interpolates component-wise in sRGB space
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let (a, b) = (self.components(), other.components());
        let t = t.clamp(0.0, 1.0);
        Color::new(std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t))
    }
}

impl Color {
    pub const BLACK: Color = Self {
        inner: AlphaColor::BLACK,
    };
    pub const WHITE: Color = Self {
        inner: AlphaColor::WHITE,
    };
    pub const TRANSPARENT: Color = Self {
        inner: AlphaColor::TRANSPARENT,
    };
    pub const GRAY: Color = Color::from_argb(0xff88_8888);
}

/// Colors of the fan, bezel & control bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub cord: Color,
    pub frame: Color,
    pub blade: [Color; 2],
    pub panel: Color,
    pub indicator_lit: Color,
    pub indicator_unlit: Color,
    pub switch_track: Color,
    pub knob_on: Color,
    pub knob_off: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_argb(0xfffa_fafa),
            cord: Color::from_argb(0xffe6_a639),
            frame: Color::from_argb(0xff21_2121),
            blade: [Color::from_argb(0xff75_7575), Color::from_argb(0xfff9_f9f9)],
            panel: Color::from_argb(0xffe6_a639),
            indicator_lit: Color::from_argb(0xffff_4252),
            indicator_unlit: Color::from_argb(0xffcc_cccc),
            switch_track: Color::from_argb(0x80cc_cccc),
            knob_on: Color::from_argb(0xffff_4252),
            knob_off: Color::GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let c = Color::from_argb(0x80ff_0000);
        let [r, g, b, a] = c.components();
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
        assert!((a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_hits_both_ends() {
        let [dark, light] = Palette::default().blade;
        assert_eq!(dark.lerp(light, 0.0), dark);
        assert_eq!(dark.lerp(light, 1.0), light);
        let mid = dark.lerp(light, 0.5).components();
        assert!(mid[0] > dark.components()[0] && mid[0] < light.components()[0]);
    }

    #[test]
    fn linear_conversion_darkens_midtones() {
        // sRGB 0.5 is ~0.21 linear
        let [r, _, _, a] = Color::new([0.5, 0.5, 0.5, 1.0]).linear_components();
        assert!((r - 0.214).abs() < 0.01);
        assert_eq!(a, 1.0);
    }
}
