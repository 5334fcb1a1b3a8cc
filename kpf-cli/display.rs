use image::RgbImage;
use log::debug;
use minifb::{Window, WindowOptions};

use crate::CliResult;

/// On-screen window that lives exactly as long as this value.
///
/// The OS window is released when the value is dropped, including on early
/// returns and unwinding.
pub struct DisplayWindow {
    window: Window,
    title: String,
    width: usize,
    height: usize,
}

impl DisplayWindow {
    pub fn open(title: &str, width: usize, height: usize) -> CliResult<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(60);
        debug!("opened window '{}' ({}x{})", title, width, height);

        Ok(Self {
            window,
            title: title.to_string(),
            width,
            height,
        })
    }

    /// Show `img` and block until a key is pressed or the window is closed
    pub fn show_until_key(&mut self, img: &RgbImage) -> CliResult<()> {
        let (w, h) = img.dimensions();
        let (w, h) = (w as usize, h as usize);
        let fb = frame_buffer(img);

        while self.window.is_open() {
            self.window.update_with_buffer(&fb, w, h)?;
            if !self.window.get_keys().is_empty() {
                break;
            }
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl Drop for DisplayWindow {
    fn drop(&mut self) {
        debug!("closing window '{}'", self.title);
    }
}

/// Pack RGB pixels into the 0RGB `u32` layout minifb expects
pub fn frame_buffer(img: &RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect()
}

/// Open a window sized to `img`, show it until dismissed, then release it
pub fn show_image(title: &str, img: &RgbImage) -> CliResult<()> {
    let (w, h) = img.dimensions();
    let mut window = DisplayWindow::open(title, w as usize, h as usize)?;
    window.show_until_key(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_frame_buffer_packing() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0x12, 0x34, 0x56]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        assert_eq!(frame_buffer(&img), vec![0x0012_3456, 0x00FF_0000]);
    }

    #[test]
    fn test_frame_buffer_is_row_major() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([0, 0, (y * 3 + x) as u8]));
        assert_eq!(frame_buffer(&img), vec![0, 1, 2, 3, 4, 5]);
    }
}
