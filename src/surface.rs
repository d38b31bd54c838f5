use image::DynamicImage;
use image::RgbaImage;

/// The drawing surface: the decoded image held as an addressable grid of
/// RGBA pixels. Written once at decode time and replaced wholesale when a
/// new image is loaded, so its dimensions always equal the decoded image's
/// native dimensions.
pub struct ImageSurface {
    pixels: RgbaImage,
}

impl ImageSurface {
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read the pixel at surface coordinates.
    ///
    /// Reads outside the surface on any side return transparent black,
    /// matching 2D-canvas read-back semantics. The magnifier relies on this
    /// when its neighborhood runs past the far edges.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return [0, 0, 0, 0];
        }
        self.pixels.get_pixel(x as u32, y as u32).0
    }

    /// Convert the surface to an egui image for texture upload.
    pub fn color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker_surface(width: u32, height: u32) -> ImageSurface {
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        ImageSurface::from_image(DynamicImage::ImageRgba8(pixels))
    }

    #[test]
    fn dimensions_match_the_decoded_image() {
        let surface = checker_surface(7, 3);
        assert_eq!(surface.width(), 7);
        assert_eq!(surface.height(), 3);

        let color_image = surface.color_image();
        assert_eq!(color_image.size, [7, 3]);
    }

    #[test]
    fn in_bounds_reads_return_the_painted_color() {
        let surface = checker_surface(4, 4);
        assert_eq!(surface.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(1, 0), [0, 0, 255, 255]);
        assert_eq!(surface.pixel(3, 3), [255, 0, 0, 255]);
    }

    #[test]
    fn reads_outside_the_surface_are_transparent_black() {
        let surface = checker_surface(4, 4);
        assert_eq!(surface.pixel(-1, 0), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(0, -1), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(4, 0), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(0, 4), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(1000, 1000), [0, 0, 0, 0]);
    }

    #[test]
    fn a_new_surface_fully_replaces_an_old_one() {
        let old = checker_surface(8, 8);
        let current = checker_surface(2, 2);
        assert_ne!((old.width(), old.height()), (current.width(), current.height()));
        assert_eq!((current.width(), current.height()), (2, 2));
        // Anything past the new bounds reads as empty, not as leftovers.
        assert_eq!(current.pixel(5, 5), [0, 0, 0, 0]);
    }
}
